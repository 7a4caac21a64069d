//! Source location tracking.

use serde::{Deserialize, Serialize};

/// A point in the source text.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes,
/// so an ideographic character advances it by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the source.
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// The source range a token or AST node was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a location covering two locations.
    pub fn merge(self, other: SourceLocation) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    /// Byte range of this location.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    source: String,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            source: source.to_string(),
        }
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|text| text.chars().count())
            .unwrap_or(0);
        Position::new(line + 1, column + 1, offset)
    }

    /// Location of a byte range.
    pub fn location(&self, span: std::ops::Range<usize>) -> SourceLocation {
        SourceLocation::new(self.position(span.start), self.position(span.end))
    }

    /// The text of a 1-based line, without its terminator.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.source.lines().nth(line.checked_sub(1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_positions() {
        let index = LineIndex::new("吾有一數。");
        assert_eq!(index.position(0), Position::new(1, 1, 0));
        // Each ideograph is three bytes but one column.
        assert_eq!(index.position(6), Position::new(1, 3, 6));
    }

    #[test]
    fn test_multiline_positions() {
        let source = "書之。\n噫。";
        let index = LineIndex::new(source);
        let offset = source.find('噫').unwrap();
        assert_eq!(index.position(offset), Position::new(2, 1, offset));
        assert_eq!(index.line_text(2), Some("噫。"));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(10), Position::new(1, 3, 2));
    }

    #[test]
    fn test_merge_covers_both() {
        let a = SourceLocation::new(Position::new(1, 1, 0), Position::new(1, 2, 3));
        let b = SourceLocation::new(Position::new(1, 4, 9), Position::new(1, 5, 12));
        let merged = a.merge(b);
        assert_eq!(merged.span(), 0..12);
    }
}
