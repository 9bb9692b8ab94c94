//! Text document capability consumed by the span translator

use super::{ColumnEncoding, LineIndex, Position};
use crate::error::SpanError;

/// What the core needs from a host document
///
/// Host layers adapt their own document types to this trait; the core never
/// depends on a concrete editor buffer.
pub trait TextDocument {
    /// Full current text
    fn text(&self) -> &str;

    /// Position of a byte offset into [`TextDocument::text`]
    fn position_at(&self, offset: usize) -> Result<Position, SpanError>;

    /// Byte offset of `position`, the inverse of [`TextDocument::position_at`]
    fn offset_at(&self, position: Position) -> Result<usize, SpanError>;
}

/// Owned text with a prebuilt line index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    index: LineIndex,
    encoding: ColumnEncoding,
}

impl SourceText {
    /// Wrap `text`, counting columns in characters
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_encoding(text, ColumnEncoding::default())
    }

    /// Wrap `text`, counting columns in `encoding`
    pub fn with_encoding(text: impl Into<String>, encoding: ColumnEncoding) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        Self {
            text,
            index,
            encoding,
        }
    }

}

impl TextDocument for SourceText {
    fn text(&self) -> &str {
        &self.text
    }

    fn position_at(&self, offset: usize) -> Result<Position, SpanError> {
        self.index.position(&self.text, offset, self.encoding)
    }

    fn offset_at(&self, position: Position) -> Result<usize, SpanError> {
        self.index.offset(&self.text, position, self.encoding)
    }
}
