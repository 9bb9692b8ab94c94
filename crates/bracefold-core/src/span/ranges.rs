//! Presentation ranges derived from matches

use serde::{Deserialize, Serialize};

use super::{Position, TextDocument};
use crate::error::SpanError;
use crate::scanner::Match;

/// Inclusive range of lines an editor may collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoldRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// Fold range for a block whose braces sit on the given lines
///
/// The closing brace line stays visible so the editor can show a collapsed
/// `{...}` marker. A two-line block folds only its opening line, and a
/// single-line block has nothing to hide.
pub fn fold_range(brace_start_line: u32, brace_end_line: u32) -> Option<FoldRange> {
    let end_line = match brace_end_line.checked_sub(brace_start_line)? {
        0 => return None,
        1 => brace_start_line,
        _ => brace_end_line - 1,
    };

    Some(FoldRange {
        start_line: brace_start_line,
        end_line,
    })
}

/// Half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanRange {
    pub start: Position,
    pub end: Position,
}

impl SpanRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether `position` lies in the range, end included
    ///
    /// The end is inclusive so a cursor placed right after a keyword still
    /// counts as on it.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

/// A match resolved to positions in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    /// Keyword token, the hover trigger region
    pub keyword: SpanRange,
    /// Opening brace
    pub brace_start: Position,
    /// Closing brace
    pub brace_end: Position,
    /// Just past the closing brace
    pub block_end: Position,
}

impl MatchSpan {
    /// Resolve the offsets of `m` against `document`
    pub fn resolve<D>(document: &D, m: &Match<'_>) -> Result<Self, SpanError>
    where
        D: TextDocument + ?Sized,
    {
        Ok(Self {
            keyword: SpanRange::new(
                document.position_at(m.keyword_start)?,
                document.position_at(m.keyword_end)?,
            ),
            brace_start: document.position_at(m.brace_start)?,
            brace_end: document.position_at(m.brace_end)?,
            block_end: document.position_at(m.brace_end + 1)?,
        })
    }

    /// Lines to fold, if the block spans more than one line
    pub fn fold_range(&self) -> Option<FoldRange> {
        fold_range(self.brace_start.line, self.brace_end.line)
    }

    /// Region that triggers the hover preview
    pub fn hover_range(&self) -> SpanRange {
        self.keyword
    }

    /// Keyword start through the closing brace
    pub fn block_range(&self) -> SpanRange {
        SpanRange::new(self.keyword.start, self.block_end)
    }
}
