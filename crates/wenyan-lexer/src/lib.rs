//! # Wenyan Lexer
//!
//! Tokenizes wenyan source text into a stream of tokens.
//!
//! wenyan has no whitespace between words, so keyword phrases are recognized
//! by the `logos` automaton with longest-match semantics. Quoted spans are
//! opaque, numeral words are composed into integers.
//!
//! ## Example
//!
//! ```
//! use wenyan_lexer::{Keyword, Lexer, TokenKind};
//!
//! let source = "吾有一數。曰三。";
//! let kinds: Vec<_> = Lexer::new(source)
//!     .filter_map(|r| r.ok())
//!     .map(|t| t.kind)
//!     .collect();
//!
//! assert_eq!(kinds[0], TokenKind::Keyword(Keyword::DeclarePrivate));
//! assert_eq!(kinds[5], TokenKind::Number(3));
//! ```

mod error;
mod lexer;
mod numeral;
mod token;

pub use error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenClass, TokenKind, TypeName};

use wenyan_diagnostics::{DiagnosticKind, DiagnosticsTracker, FatalError};

/// Tokenize source code, reporting scan errors to the tracker.
///
/// An invalid numeral is recoverable and leaves a `0` token in its place.
/// Any other scan error is fatal.
pub fn tokenize(source: &str, tracker: &mut DiagnosticsTracker) -> Result<Vec<Token>, FatalError> {
    let mut tokens = Vec::new();

    for result in Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => tracker.report(
                DiagnosticKind::Scan,
                err.to_string(),
                Some(err.location()),
                err.is_recoverable(),
            )?,
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let mut tracker = DiagnosticsTracker::new();
        let tokens = tokenize("", &mut tracker).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_bad_numeral_is_recoverable() {
        let mut tracker = DiagnosticsTracker::new();
        let tokens = tokenize("曰十十。", &mut tracker).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Number(0));
        assert_eq!(tracker.recoverable_count(), 1);
        assert_eq!(tracker.diagnostics()[0].kind, DiagnosticKind::Scan);
        assert_eq!(tracker.diagnostics()[0].column, 2);
    }

    #[test]
    fn test_unterminated_quote_is_fatal() {
        let mut tracker = DiagnosticsTracker::new();
        let err = tokenize("書之「「未完", &mut tracker).unwrap_err();
        assert_eq!(err.diagnostic().kind, DiagnosticKind::Scan);
        assert!(!err.diagnostic().recoverable);
        assert_eq!(err.diagnostic().column, 3);
    }

    #[test]
    fn test_token_classes() {
        let mut tracker = DiagnosticsTracker::new();
        let tokens = tokenize("書之「甲」「「乙」」三、。", &mut tracker).unwrap();
        let classes: Vec<_> = tokens.iter().map(|t| t.kind.class()).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::Keyword,
                TokenClass::QuotedIdentifier,
                TokenClass::QuotedLiteral,
                TokenClass::Numeral,
                TokenClass::Separator,
                TokenClass::EndMarker,
                TokenClass::EndMarker,
            ]
        );
    }
}
