//! Code generation errors.

use thiserror::Error;
use wenyan_diagnostics::SourceLocation;

/// Code generation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("answer {offset} requested but only {available} pending")]
    AnswerUnderflow {
        offset: usize,
        available: usize,
        loc: Option<SourceLocation>,
    },

    #[error("undefined name 「{name}」")]
    UndefinedName {
        name: String,
        loc: Option<SourceLocation>,
    },

    #[error("unknown target `{0}`")]
    UnknownTarget(String),
}

impl CodegenError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CodegenError::AnswerUnderflow { loc, .. } | CodegenError::UndefinedName { loc, .. } => {
                loc.as_ref()
            }
            CodegenError::UnknownTarget(_) => None,
        }
    }
}
