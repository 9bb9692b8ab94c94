//! Folding range generation
//!
//! One `Region` fold per multi-line keyword block. The closing brace line
//! stays visible, so a collapsed block reads `sx={{ ... }}`.

use bracefold_core::{MatchSpan, Scanner, TextDocument};
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};
use tracing::warn;

/// Analyzer for generating folding ranges
pub struct FoldingAnalyzer;

impl FoldingAnalyzer {
    /// Generate folding ranges for the entire document
    pub fn generate_ranges<D>(
        document: &D,
        scanner: &Scanner,
        collapsed_text: Option<&str>,
    ) -> Vec<FoldingRange>
    where
        D: TextDocument + ?Sized,
    {
        scanner
            .scan(document.text())
            .filter_map(|m| match MatchSpan::resolve(document, &m) {
                Ok(span) => span.fold_range(),
                Err(e) => {
                    warn!("Skipping fold for match at {}: {}", m.keyword_start, e);
                    None
                }
            })
            .map(|fold| FoldingRange {
                start_line: fold.start_line,
                end_line: fold.end_line,
                kind: Some(FoldingRangeKind::Region),
                start_character: None,
                end_character: None,
                collapsed_text: collapsed_text.map(str::to_string),
            })
            .collect()
    }
}
