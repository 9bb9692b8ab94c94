//! Offset to line/column translation
//!
//! Maps the scanner's byte offsets to 0-based `(line, column)` positions and
//! derives the presentation ranges editor hosts consume:
//! - Fold ranges over a block's lines (closing line left visible)
//! - Hover ranges over the keyword token
//!
//! Lines are split on `\n` only. A `\r` before the newline stays part of the
//! previous line's content, matching the scanner's raw offsets.

mod document;
mod ranges;


use serde::{Deserialize, Serialize};

use crate::error::SpanError;

pub use document::{SourceText, TextDocument};
pub use ranges::{fold_range, FoldRange, MatchSpan, SpanRange};

/// A 0-based line/column pair
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Unit in which columns are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnEncoding {
    /// UTF-8 bytes
    Utf8,
    /// UTF-16 code units, as used by LSP clients
    Utf16,
    /// Unicode scalar values
    #[default]
    Char,
}

impl ColumnEncoding {
    /// Width of `text` in this encoding
    pub fn measure(self, text: &str) -> usize {
        match self {
            ColumnEncoding::Utf8 => text.len(),
            ColumnEncoding::Utf16 => text.encode_utf16().count(),
            ColumnEncoding::Char => text.chars().count(),
        }
    }

    fn width(self, c: char) -> usize {
        match self {
            ColumnEncoding::Utf8 => c.len_utf8(),
            ColumnEncoding::Utf16 => c.len_utf16(),
            ColumnEncoding::Char => 1,
        }
    }
}

/// Map a UTF-8 byte `offset` in `text` to a position, counting columns in
/// characters
///
/// The offset is a byte index, as carried by scanner matches, not a character
/// index. Offsets that split a character are rejected.
///
/// Builds a throwaway [`LineIndex`]; keep one around when translating many
/// offsets of the same text.
pub fn to_position(text: &str, offset: usize) -> Result<Position, SpanError> {
    LineIndex::new(text).position(text, offset, ColumnEncoding::Char)
}

/// Newline table for one text
///
/// Must only be queried with the text it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset at which each line starts; always begins with 0
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line containing `offset`
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// Translate a byte offset into a position
    pub fn position(
        &self,
        text: &str,
        offset: usize,
        encoding: ColumnEncoding,
    ) -> Result<Position, SpanError> {
        if offset > text.len() {
            return Err(SpanError::OffsetOutOfBounds {
                offset,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(offset) {
            return Err(SpanError::NotCharBoundary(offset));
        }

        let line = self.line_of(offset);
        let column = encoding.measure(&text[self.line_starts[line]..offset]);

        Ok(Position::new(line as u32, column as u32))
    }

    /// Translate a position back into a byte offset
    ///
    /// A column that falls inside a character resolves to that character's
    /// start. Columns past the end of the line are an error.
    pub fn offset(
        &self,
        text: &str,
        position: Position,
        encoding: ColumnEncoding,
    ) -> Result<usize, SpanError> {
        let out_of_bounds = SpanError::PositionOutOfBounds {
            line: position.line,
            column: position.column,
        };

        let line = position.line as usize;
        let Some(&start) = self.line_starts.get(line) else {
            return Err(out_of_bounds);
        };
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(text.len(), |&next| next - 1);

        let column = position.column as usize;
        let mut consumed = 0;
        for (idx, c) in text[start..end].char_indices() {
            let next = consumed + encoding.width(c);
            if next > column {
                return Ok(start + idx);
            }
            consumed = next;
        }

        if consumed == column {
            Ok(end)
        } else {
            Err(out_of_bounds)
        }
    }
}
