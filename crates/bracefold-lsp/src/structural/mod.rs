//! Structural intelligence for bracefold LSP
//!
//! This module turns scanner matches into document structure:
//! - Folding ranges (multi-line keyword blocks)
//! - Document symbols (outline view)

pub mod folding;
pub mod symbols;

pub use folding::FoldingAnalyzer;
pub use symbols::SymbolAnalyzer;
