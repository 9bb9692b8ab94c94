//! bracefold-core - Find keyword-anchored brace blocks in source text
//!
//! Core library for bracefold, providing:
//! - A string/comment-aware scanner that finds `keyword={ ... }` style
//!   object literals and their correctly nested closing brace
//! - A span translator that maps scanner offsets to line/column positions
//!   and derives fold and hover ranges for editor hosts
//!
//! # Example
//!
//! ```
//! use bracefold_core::{scan, to_position, Position, ScanOptions};
//!
//! let text = "<Box sx={{ color: 'red' }} />";
//! let matches = scan(text, "sx", ScanOptions::default()).unwrap();
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].raw_content, "{{ color: 'red' }}");
//! assert_eq!(
//!     to_position(text, matches[0].brace_start).unwrap(),
//!     Position::new(0, 8)
//! );
//! ```

pub mod error;
pub mod scanner;
pub mod span;

// Re-export main types and functions
pub use error::{Result, ScanError, SpanError};
pub use scanner::{scan, Match, Matches, ScanOptions, Scanner, DEFAULT_KEYWORD};
pub use span::{
    fold_range, to_position, ColumnEncoding, FoldRange, LineIndex, MatchSpan, Position,
    SourceText, SpanRange, TextDocument,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
