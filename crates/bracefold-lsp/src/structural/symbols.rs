//! Document symbol generation
//!
//! Lists every keyword block in the outline view so users can jump between
//! them. Each symbol spans the keyword through the closing brace; its
//! selection range is the keyword itself.

use bracefold_core::{Match, MatchSpan, Scanner, TextDocument};
use tower_lsp::lsp_types::{DocumentSymbol, SymbolKind};
use tracing::warn;

use crate::document::to_lsp_range;

/// Longest detail shown next to a symbol, in characters
const MAX_DETAIL_CHARS: usize = 60;

/// Main analyzer for extracting document symbols
pub struct SymbolAnalyzer;

impl SymbolAnalyzer {
    /// Extract one symbol per keyword block
    pub fn extract_symbols<D>(document: &D, scanner: &Scanner) -> Vec<DocumentSymbol>
    where
        D: TextDocument + ?Sized,
    {
        scanner
            .scan(document.text())
            .filter_map(|m| match MatchSpan::resolve(document, &m) {
                Ok(span) => Some(Self::symbol(scanner.keyword(), &m, &span)),
                Err(e) => {
                    warn!("Skipping symbol for match at {}: {}", m.keyword_start, e);
                    None
                }
            })
            .collect()
    }

    fn symbol(keyword: &str, m: &Match<'_>, span: &MatchSpan) -> DocumentSymbol {
        #[allow(deprecated)]
        DocumentSymbol {
            name: keyword.to_string(),
            detail: Some(Self::detail(m.raw_content)),
            kind: SymbolKind::OBJECT,
            tags: None,
            deprecated: None,
            range: to_lsp_range(span.block_range()),
            selection_range: to_lsp_range(span.hover_range()),
            children: None,
        }
    }

    /// First line of the block, shortened for display
    fn detail(raw_content: &str) -> String {
        let first_line = raw_content.lines().next().unwrap_or_default().trim_end();
        let multiline = raw_content.contains('\n');

        let mut detail: String = first_line.chars().take(MAX_DETAIL_CHARS).collect();
        if multiline || first_line.chars().count() > MAX_DETAIL_CHARS {
            detail.push_str(" ...");
        }
        detail
    }
}
