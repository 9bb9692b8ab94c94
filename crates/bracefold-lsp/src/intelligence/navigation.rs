//! Next/previous block navigation
//!
//! Moves between keyword blocks in document order, wrapping around at
//! either end.

use bracefold_core::{MatchSpan, Position, Scanner, SpanRange, TextDocument};

/// Finds neighbouring keyword blocks
pub struct Navigator;

impl Navigator {
    /// Keyword range of the first block starting after `cursor`
    pub fn next<D>(document: &D, scanner: &Scanner, cursor: Position) -> Option<SpanRange>
    where
        D: TextDocument + ?Sized,
    {
        let keywords = Self::keyword_ranges(document, scanner);
        keywords
            .iter()
            .find(|range| range.start > cursor)
            .or_else(|| keywords.first())
            .copied()
    }

    /// Keyword range of the last block ending before `cursor`
    ///
    /// A cursor on a keyword skips that keyword's own block.
    pub fn previous<D>(document: &D, scanner: &Scanner, cursor: Position) -> Option<SpanRange>
    where
        D: TextDocument + ?Sized,
    {
        let keywords = Self::keyword_ranges(document, scanner);
        keywords
            .iter()
            .rev()
            .find(|range| range.end < cursor)
            .or_else(|| keywords.last())
            .copied()
    }

    fn keyword_ranges<D>(document: &D, scanner: &Scanner) -> Vec<SpanRange>
    where
        D: TextDocument + ?Sized,
    {
        scanner
            .scan(document.text())
            .filter_map(|m| MatchSpan::resolve(document, &m).ok())
            .map(|span| span.hover_range())
            .collect()
    }
}
