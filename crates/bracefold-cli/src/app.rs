//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use tracing::{debug, warn};

use bracefold_core::{FoldRange, MatchSpan, Position, Scanner, SourceText, TextDocument};
use bracefold_lsp::config::Settings;

/// File extensions searched when a directory is given
const SOURCE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "bracefold")]
#[command(author, version, about = "Find and fold keyword blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List keyword blocks in files, directories or glob patterns
    Scan {
        /// Files, directories or glob patterns to scan
        #[arg(required = true)]
        paths: Vec<String>,

        #[command(flatten)]
        args: ScanArgs,
    },

    /// Print the fold ranges of a file
    Folds {
        /// Input source file
        input: PathBuf,

        #[command(flatten)]
        args: ScanArgs,
    },
}

/// Options shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Keyword that introduces a block [default: from config, or "sx"]
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Also report blocks inside comments
    #[arg(long)]
    pub include_comments: bool,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ScanArgs {
    /// Build the scanner from the config file and command-line overrides
    pub fn scanner(&self) -> Result<Scanner> {
        let mut settings = load_settings(self.config.as_deref())?;
        if let Some(keyword) = &self.keyword {
            settings.scanner.keyword = keyword.clone();
        }
        if self.include_comments {
            settings.scanner.ignore_keyword_in_comments = false;
        }

        settings
            .scanner
            .build()
            .with_context(|| format!("Invalid keyword: {:?}", settings.scanner.keyword))
    }
}

/// One keyword block found in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub path: String,
    pub keyword: String,
    /// Zero-based position of the keyword, columns in characters
    pub position: Position,
    pub keyword_start: usize,
    pub keyword_end: usize,
    pub brace_start: usize,
    pub brace_end: usize,
    pub content: String,
}

/// Fold ranges of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFolds {
    pub path: String,
    pub folds: Vec<FoldRange>,
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { paths, args } => {
            scan_command(&paths, &args)?;
        }
        Commands::Folds { input, args } => {
            folds_command(&input, &args)?;
        }
    }

    Ok(())
}

/// Scan files and print every keyword block
pub fn scan_command(patterns: &[String], args: &ScanArgs) -> Result<()> {
    let scanner = args.scanner()?;
    let reports = scan_files(patterns, &scanner)?;
    debug!("Found {} blocks", reports.len());

    let output = render_matches(&reports, args.format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Print the fold ranges of one file
pub fn folds_command(input: &Path, args: &ScanArgs) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let scanner = args.scanner()?;
    let folds = fold_file(input, &scanner)?;

    let output = render_folds(&folds, args.format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Expand files, directories and glob patterns into a list of files
///
/// A pattern that names nothing is an error, so typos don't pass silently.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        let expanded = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            let mut found = Vec::new();
            for extension in SOURCE_EXTENSIONS {
                let nested = path.join(format!("**/*.{}", extension));
                found.extend(glob_files(&nested.display().to_string())?);
            }
            found.sort();
            found
        } else {
            glob_files(pattern)?
        };

        if expanded.is_empty() {
            anyhow::bail!("No files match: {}", pattern);
        }

        for file in expanded {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Could not read {}", e),
        }
    }
    Ok(files)
}

/// Scan every file named by `patterns`
pub fn scan_files(patterns: &[String], scanner: &Scanner) -> Result<Vec<MatchReport>> {
    let mut reports = Vec::new();
    for path in resolve_inputs(patterns)? {
        reports.extend(scan_file(&path, scanner)?);
    }
    Ok(reports)
}

/// Scan one file
pub fn scan_file(path: &Path, scanner: &Scanner) -> Result<Vec<MatchReport>> {
    let source = read_source(path)?;
    debug!("Scanning {}", path.display());

    scanner
        .scan(source.text())
        .map(|m| -> Result<MatchReport> {
            let position = source
                .position_at(m.keyword_start)
                .with_context(|| format!("Failed to locate match in {}", path.display()))?;

            Ok(MatchReport {
                path: path.display().to_string(),
                keyword: scanner.keyword().to_string(),
                position,
                keyword_start: m.keyword_start,
                keyword_end: m.keyword_end,
                brace_start: m.brace_start,
                brace_end: m.brace_end,
                content: m.raw_content.to_string(),
            })
        })
        .collect()
}

/// Fold ranges of one file
pub fn fold_file(path: &Path, scanner: &Scanner) -> Result<FileFolds> {
    let source = read_source(path)?;

    let mut folds = Vec::new();
    for m in scanner.scan(source.text()) {
        let span = MatchSpan::resolve(&source, &m)
            .with_context(|| format!("Failed to locate match in {}", path.display()))?;
        folds.extend(span.fold_range());
    }

    Ok(FileFolds {
        path: path.display().to_string(),
        folds,
    })
}

fn read_source(path: &Path) -> Result<SourceText> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(SourceText::new(content))
}

/// Render match reports
///
/// Text lines read `path:line:col: first line of the block`, with one-based
/// line and column numbers.
pub fn render_matches(reports: &[MatchReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(reports).context("Failed to serialize matches to JSON")
        }
        OutputFormat::Text => Ok(reports
            .iter()
            .map(|report| {
                let first_line = report.content.lines().next().unwrap_or_default();
                format!(
                    "{}:{}:{}: {}",
                    report.path,
                    report.position.line + 1,
                    report.position.column + 1,
                    first_line
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render fold ranges
///
/// Text lines read `path:start-end` with one-based, inclusive line numbers.
pub fn render_folds(folds: &FileFolds, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(folds).context("Failed to serialize folds to JSON")
        }
        OutputFormat::Text => Ok(folds
            .folds
            .iter()
            .map(|fold| {
                format!(
                    "{}:{}-{}",
                    folds.path,
                    fold.start_line + 1,
                    fold.end_line + 1
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Load settings from an explicit path, or from a config file in the
/// working directory
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            let candidates = [Settings::FILE_NAME, ".bracefold.toml"];
            for candidate in candidates {
                if Path::new(candidate).exists() {
                    let content = fs::read_to_string(candidate)?;
                    match Settings::from_toml_str(&content) {
                        Ok(settings) => return Ok(settings),
                        Err(e) => warn!("Ignoring {}: {}", candidate, e),
                    }
                }
            }
            Ok(Settings::default())
        }
    }
}
