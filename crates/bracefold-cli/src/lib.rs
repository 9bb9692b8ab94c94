//! bracefold CLI - Command-line interface library
//!
//! This library provides the CLI functionality for bracefold:
//! - Scan: List keyword blocks across files
//! - Folds: Print the fold ranges an editor would offer for a file
//!
//! # Library Usage
//!
//! ```ignore
//! use bracefold_cli::{run_cli, scan_files, OutputFormat};
//!
//! // Run the full CLI
//! run_cli()?;
//!
//! // Or collect matches programmatically
//! let reports = scan_files(&["src/**/*.tsx".to_string()], &scanner)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # List every sx block in a project
//! bracefold scan "src/**/*.tsx"
//!
//! # Scan for another keyword, including commented-out blocks
//! bracefold scan App.jsx --keyword css --include-comments --format json
//!
//! # Show fold ranges
//! bracefold folds App.jsx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{folds_command, scan_command};
pub use app::{fold_file, render_folds, render_matches, resolve_inputs, scan_files, scan_file};
pub use app::{run_cli, FileFolds, MatchReport, OutputFormat, ScanArgs};
