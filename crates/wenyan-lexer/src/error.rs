//! Lexer error definitions.

use thiserror::Error;
use wenyan_diagnostics::SourceLocation;

/// The error produced by the generated automaton, before positions are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedChar,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated identifier")]
    UnterminatedIdentifier,

    #[error("invalid numeral")]
    InvalidNumeral,
}

/// A lexer error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character `{text}`")]
    UnexpectedChar {
        text: String,
        span: std::ops::Range<usize>,
        loc: SourceLocation,
    },

    #[error("unterminated string literal")]
    UnterminatedString {
        span: std::ops::Range<usize>,
        loc: SourceLocation,
    },

    #[error("unterminated identifier")]
    UnterminatedIdentifier {
        span: std::ops::Range<usize>,
        loc: SourceLocation,
    },

    #[error("invalid numeral `{text}`")]
    InvalidNumeral {
        text: String,
        span: std::ops::Range<usize>,
        loc: SourceLocation,
    },
}

impl LexError {
    pub(crate) fn new(
        kind: LexErrorKind,
        text: &str,
        span: std::ops::Range<usize>,
        loc: SourceLocation,
    ) -> Self {
        match kind {
            LexErrorKind::UnexpectedChar => LexError::UnexpectedChar {
                text: text.to_string(),
                span,
                loc,
            },
            LexErrorKind::UnterminatedString => LexError::UnterminatedString { span, loc },
            LexErrorKind::UnterminatedIdentifier => LexError::UnterminatedIdentifier { span, loc },
            LexErrorKind::InvalidNumeral => LexError::InvalidNumeral {
                text: text.to_string(),
                span,
                loc,
            },
        }
    }

    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            LexError::UnexpectedChar { span, .. } => span.clone(),
            LexError::UnterminatedString { span, .. } => span.clone(),
            LexError::UnterminatedIdentifier { span, .. } => span.clone(),
            LexError::InvalidNumeral { span, .. } => span.clone(),
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            LexError::UnexpectedChar { loc, .. } => loc,
            LexError::UnterminatedString { loc, .. } => loc,
            LexError::UnterminatedIdentifier { loc, .. } => loc,
            LexError::InvalidNumeral { loc, .. } => loc,
        }
    }

    /// A bad numeral still yields a placeholder token; everything else stops
    /// the scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LexError::InvalidNumeral { .. })
    }
}
