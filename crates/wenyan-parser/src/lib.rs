//! # Wenyan Parser
//!
//! Parses a wenyan token stream into an Abstract Syntax Tree.
//!
//! Statements are dispatched on their leading keyword through a static rule
//! table; expressions use precedence climbing. `或云 ... 蓋謂 ...` macros
//! rewrite the not-yet-parsed tokens as soon as they are parsed.
//!
//! ## Example
//!
//! ```
//! use wenyan_ast::StatementKind;
//! use wenyan_parser::parse;
//!
//! let result = parse("吾有一數。曰三。名之曰「甲」。");
//! assert!(result.diagnostics.is_empty());
//!
//! let ast = result.ast.unwrap();
//! assert!(matches!(ast.body[0].node, StatementKind::VariableDeclaration(_)));
//! ```

mod error;
mod expr;
mod macros;
mod parser;

pub use error::ParseError;
pub use parser::{ParseOptions, Parser, MAX_COUNT};

use wenyan_ast::Program;
use wenyan_diagnostics::{Diagnostic, DiagnosticsTracker, FatalError};
use wenyan_lexer::Token;

/// Result of parsing.
pub struct ParseResult {
    /// The parsed AST, or `None` when a fatal diagnostic stopped the parse
    pub ast: Option<Program>,
    /// Every diagnostic, recoverable or not, in encounter order
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token stream, reporting to `tracker`.
pub fn parse_program(
    tokens: Vec<Token>,
    tracker: &mut DiagnosticsTracker,
    options: ParseOptions,
) -> Result<Program, FatalError> {
    Parser::new(tokens, tracker, options).parse_program()
}

/// Scan and parse source code.
pub fn parse(source: &str) -> ParseResult {
    let mut tracker = DiagnosticsTracker::new();
    let ast = wenyan_lexer::tokenize(source, &mut tracker)
        .and_then(|tokens| parse_program(tokens, &mut tracker, ParseOptions::default()))
        .ok();
    ParseResult {
        ast,
        diagnostics: tracker.into_diagnostics(),
    }
}
