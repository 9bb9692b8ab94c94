//! Configuration Engine
//!
//! Provides the settings that shape every scan.
//!
//! # Configuration File
//!
//! Settings are loaded from `bracefold.toml` in the workspace root:
//!
//! ```toml
//! [scanner]
//! keyword = "sx"
//! ignore_keyword_in_comments = true
//!
//! [hover]
//! language = "tsx"
//!
//! [folding]
//! collapsed_text = "{...}"
//! ```
//!
//! Editors may override the file through `initializationOptions` or
//! `workspace/didChangeConfiguration`, using the same structure as JSON.

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{ConfigError, FoldingSettings, HoverSettings, ScannerSettings, Settings};
