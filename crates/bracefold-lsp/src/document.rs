//! Open document adapter
//!
//! Wraps an editor buffer snapshot so the core scanner and span translator
//! can work on it, and converts core positions to LSP types. Columns are
//! counted in UTF-16 code units, the LSP default position encoding.

use bracefold_core::{ColumnEncoding, Position, SourceText, SpanError, SpanRange, TextDocument};
use tower_lsp::lsp_types;

/// Text of one open document at a given version
#[derive(Debug, Clone)]
pub struct OpenDocument {
    version: i32,
    source: SourceText,
}

impl OpenDocument {
    pub fn new(text: impl Into<String>, version: i32) -> Self {
        Self {
            version,
            source: SourceText::with_encoding(text, ColumnEncoding::Utf16),
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

impl TextDocument for OpenDocument {
    fn text(&self) -> &str {
        self.source.text()
    }

    fn position_at(&self, offset: usize) -> Result<Position, SpanError> {
        self.source.position_at(offset)
    }

    fn offset_at(&self, position: Position) -> Result<usize, SpanError> {
        self.source.offset_at(position)
    }
}

/// Convert a core position to an LSP position
pub fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line, position.column)
}

/// Convert an LSP position to a core position
pub fn from_lsp_position(position: lsp_types::Position) -> Position {
    Position::new(position.line, position.character)
}

/// Convert a core range to an LSP range
pub fn to_lsp_range(range: SpanRange) -> lsp_types::Range {
    lsp_types::Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_utf16() {
        let doc = OpenDocument::new("😀 sx={}", 3);

        assert_eq!(doc.version(), 3);
        assert_eq!(doc.position_at(5).unwrap(), Position::new(0, 3));
        assert_eq!(doc.offset_at(Position::new(0, 3)).unwrap(), 5);
        // Inside the surrogate pair
        assert_eq!(doc.offset_at(Position::new(0, 1)).unwrap(), 0);
    }

    #[test]
    fn test_position_conversion() {
        let lsp = to_lsp_position(Position::new(2, 7));
        assert_eq!(lsp, lsp_types::Position::new(2, 7));
        assert_eq!(from_lsp_position(lsp), Position::new(2, 7));
    }

    #[test]
    fn test_range_conversion() {
        let range = to_lsp_range(SpanRange::new(Position::new(0, 1), Position::new(3, 2)));
        assert_eq!(range.start, lsp_types::Position::new(0, 1));
        assert_eq!(range.end, lsp_types::Position::new(3, 2));
    }
}
