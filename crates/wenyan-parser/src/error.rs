//! Parser error definitions.

use thiserror::Error;
use wenyan_diagnostics::{FatalError, SourceLocation};
use wenyan_lexer::TokenKind;

/// A parser error.
///
/// Only [`ParseError::UnexpectedToken`] and
/// [`ParseError::InvalidAssignTarget`] are recoverable: the statement is
/// dropped and parsing resumes after the next end marker. Everything else
/// aborts the parse.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found `{found}`")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        loc: SourceLocation,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof {
        expected: String,
        loc: SourceLocation,
    },

    #[error("no statement starts with `{found}`")]
    UnknownStatement {
        found: TokenKind,
        loc: SourceLocation,
    },

    #[error("expected {expected} {what}, found {found}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
        loc: SourceLocation,
    },

    #[error("cannot declare {count} at once, the limit is {limit}")]
    CountTooLarge {
        count: i64,
        limit: usize,
        loc: SourceLocation,
    },

    #[error("only a name or an item can be reassigned")]
    InvalidAssignTarget {
        loc: SourceLocation,
    },

    /// A fatal diagnostic already recorded by the tracker.
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl ParseError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseError::UnexpectedToken { loc, .. } => Some(loc),
            ParseError::UnexpectedEof { loc, .. } => Some(loc),
            ParseError::UnknownStatement { loc, .. } => Some(loc),
            ParseError::CountMismatch { loc, .. } => Some(loc),
            ParseError::CountTooLarge { loc, .. } => Some(loc),
            ParseError::InvalidAssignTarget { loc, .. } => Some(loc),
            ParseError::Fatal(_) => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::UnexpectedToken { .. } | ParseError::InvalidAssignTarget { .. }
        )
    }
}
