//! Hover previews for keyword blocks
//!
//! Hovering a keyword shows its block verbatim in a fenced code block.
//! Only the keyword token triggers the hover, not the whole block.

use bracefold_core::{MatchSpan, Position, Scanner, TextDocument};
use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::document::to_lsp_range;

/// Analyzer for hover requests
pub struct HoverAnalyzer;

impl HoverAnalyzer {
    /// Hover for the first block whose keyword contains `cursor`
    ///
    /// The cursor is resolved to a byte offset first; the offset just past the
    /// keyword still counts as on it.
    pub fn hover_at<D>(
        document: &D,
        scanner: &Scanner,
        cursor: Position,
        language: &str,
    ) -> Option<Hover>
    where
        D: TextDocument + ?Sized,
    {
        let offset = document.offset_at(cursor).ok()?;

        let m = scanner
            .scan(document.text())
            .take_while(|m| m.keyword_start <= offset)
            .find(|m| offset <= m.keyword_end)?;
        let span = MatchSpan::resolve(document, &m).ok()?;

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: Self::render(m.raw_content, language),
            }),
            range: Some(to_lsp_range(span.hover_range())),
        })
    }

    /// Render block content as a Markdown code fence
    pub fn render(raw_content: &str, language: &str) -> String {
        // Longer fences than any backtick run in the content keep it intact
        let longest_run = raw_content
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest_run.max(2) + 1);

        format!("{fence}{language}\n{raw_content}\n{fence}")
    }
}
