//! High-level lexer interface.

use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};
use logos::Logos;
use wenyan_diagnostics::LineIndex;

/// A lexer for wenyan source code.
///
/// Wraps the logos-generated lexer, attaching line/column locations to every
/// token and error.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    lines: LineIndex,
    /// Placeholder queued behind a recoverable error.
    pending: Option<Token>,
    /// Track if we've emitted EOF
    done: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
            pending: None,
            done: false,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    fn next_inner(&mut self) -> Option<Result<Token, LexError>> {
        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                let loc = self.lines.location(span.clone());
                Some(Ok(Token::new(kind, span, loc)))
            }
            Some(Err(kind)) => {
                let span = self.inner.span();
                let loc = self.lines.location(span.clone());
                if kind == LexErrorKind::InvalidNumeral {
                    self.pending = Some(Token::new(TokenKind::Number(0), span.clone(), loc));
                }
                Some(Err(LexError::new(kind, self.inner.slice(), span, loc)))
            }
            None => {
                if !self.done {
                    self.done = true;
                    let pos = self.source().len();
                    let loc = self.lines.location(pos..pos);
                    return Some(Ok(Token::new(TokenKind::Eof, pos..pos, loc)));
                }
                None
            }
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(Ok(pending));
        }
        self.next_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Keyword, TypeName};
    use smol_str::SmolStr;

    #[test]
    fn test_simple_tokenization() {
        let source = "吾有一數。";
        let tokens: Vec<_> = Lexer::new(source).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 5); // 吾有, 一, 數, 。, EOF
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::DeclarePrivate));
        assert_eq!(tokens[1].kind, TokenKind::Number(1));
        assert_eq!(tokens[2].kind, TokenKind::Type(TypeName::Number));
        assert_eq!(tokens[3].kind, TokenKind::Period);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_locations_count_characters() {
        let source = "吾有一數。\n曰「甲」。";
        let tokens: Vec<_> = Lexer::new(source).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens[1].loc.start.column, 3);
        assert_eq!(tokens[1].span, 6..9);
        let ident = &tokens[5];
        assert_eq!(ident.kind, TokenKind::Identifier(SmolStr::from("甲")));
        assert_eq!((ident.loc.start.line, ident.loc.start.column), (2, 2));
        assert_eq!((ident.loc.end.line, ident.loc.end.column), (2, 5));
    }

    #[test]
    fn test_invalid_numeral_yields_placeholder() {
        let results: Vec<_> = Lexer::new("十十").collect();

        assert!(matches!(results[0], Err(LexError::InvalidNumeral { .. })));
        let placeholder = results[1].as_ref().unwrap();
        assert_eq!(placeholder.kind, TokenKind::Number(0));
        assert_eq!(placeholder.span, 0..6);
        assert_eq!(results[2].as_ref().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_unexpected_char() {
        let results: Vec<_> = Lexer::new("噫x").collect();

        match &results[1] {
            Err(LexError::UnexpectedChar { text, span, .. }) => {
                assert_eq!(text, "x");
                assert_eq!(span, &(3..4));
            }
            other => panic!("expected unexpected char, got {other:?}"),
        }
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.span(), 3..4);
        assert_eq!(err.location().start.column, 2);
    }
}
