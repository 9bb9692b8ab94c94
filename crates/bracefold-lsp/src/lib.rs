//! bracefold Language Server Protocol implementation
//!
//! This library exposes bracefold's keyword block scanner to editors:
//! - Folding ranges for multi-line `keyword={ ... }` blocks
//! - Hover previews of a block's content on its keyword
//! - Document symbols for outline navigation
//! - Commands for fold toggling, previews and next/previous navigation
//!
//! # Library Usage
//!
//! ```ignore
//! use bracefold_lsp::{run_server, structural::FoldingAnalyzer};
//!
//! // Run the LSP server
//! run_server().await;
//!
//! // Or compute folding ranges directly
//! let ranges = FoldingAnalyzer::generate_ranges(&document, &scanner, None);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! bracefold-lsp
//!
//! # With debug logging
//! RUST_LOG=debug bracefold-lsp
//! ```

pub mod commands;
pub mod config;
pub mod document;
pub mod intelligence;
pub mod server;
pub mod structural;

// Re-export main entry point
pub use server::run_server;

// Re-export commonly used types
pub use config::Settings;
pub use document::OpenDocument;
