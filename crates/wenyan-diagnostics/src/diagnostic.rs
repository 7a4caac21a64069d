//! Diagnostic records.

use crate::SourceLocation;
use serde::Serialize;
use std::fmt;

/// The stage-level classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Malformed numeral, unterminated quotation, unexpected character.
    #[serde(rename = "ScanError")]
    Scan,
    /// No statement rule matches, or declaration counts disagree.
    #[serde(rename = "StructuralParseError")]
    StructuralParse,
    /// A statement parsed with a locally ignorable inconsistency.
    #[serde(rename = "RecoverableParseError")]
    RecoverableParse,
    /// Answer underflow or unresolved identifier during code generation.
    #[serde(rename = "GenerationError")]
    Generation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Scan => "ScanError",
            DiagnosticKind::StructuralParse => "StructuralParseError",
            DiagnosticKind::RecoverableParse => "RecoverableParseError",
            DiagnosticKind::Generation => "GenerationError",
        };
        f.write_str(name)
    }
}

/// A single diagnostic, in the shape callers render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// 1-based line, 0 when the diagnostic has no location.
    pub line: usize,
    /// 1-based column in characters, 0 when the diagnostic has no location.
    pub column: usize,
    pub recoverable: bool,
    /// Byte range for renderers that underline source text.
    #[serde(skip)]
    pub span: std::ops::Range<usize>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        location: Option<&SourceLocation>,
        recoverable: bool,
    ) -> Self {
        let (line, column, span) = match location {
            Some(loc) => (loc.start.line, loc.start.column, loc.span()),
            None => (0, 0, 0..0),
        };
        Self {
            kind,
            message: message.into(),
            line,
            column,
            recoverable,
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(
                f,
                "{} at {}:{}: {}",
                self.kind, self.line, self.column, self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_record_shape_is_stable() {
        let loc = SourceLocation::new(Position::new(2, 5, 14), Position::new(2, 6, 17));
        let diag = Diagnostic::new(DiagnosticKind::Scan, "bad numeral", Some(&loc), true);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "ScanError",
                "message": "bad numeral",
                "line": 2,
                "column": 5,
                "recoverable": true,
            })
        );
        assert_eq!(diag.span, 14..17);
    }

    #[test]
    fn test_display_without_location() {
        let diag = Diagnostic::new(DiagnosticKind::Generation, "no answer", None, false);
        assert_eq!(diag.to_string(), "GenerationError: no answer");
    }
}
