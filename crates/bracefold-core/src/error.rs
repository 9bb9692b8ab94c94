//! Error types for scanning and span translation
//!
//! Only caller bugs are errors here. Malformed document content (a missing
//! brace, an unterminated string) never produces an error, just fewer matches.

use thiserror::Error;

/// Result type for bracefold-core operations
pub type Result<T, E = ScanError> = std::result::Result<T, E>;

/// Errors raised when building a scanner
#[derive(Error, Debug)]
pub enum ScanError {
    /// The keyword to search for was empty
    #[error("keyword must not be empty")]
    EmptyKeyword,

    /// The keyword could not be compiled into a matcher
    #[error("invalid keyword: {0}")]
    InvalidKeyword(#[from] regex::Error),
}

/// Errors raised when translating between offsets and positions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// Offset lies past the end of the text
    #[error("offset {offset} is out of bounds for text of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Offset splits a multi-byte character
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    /// Position does not exist in the text
    #[error("position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: u32, column: u32 },
}
