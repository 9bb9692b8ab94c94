//! Command dispatch for `workspace/executeCommand`
//!
//! Every command takes the document URI as its first argument. The
//! fold-all toggle is owned by the client and passed in with each call,
//! so the server keeps no per-session command state.

use bracefold_core::{MatchSpan, Scanner, TextDocument};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::{Position, Url};
use tracing::debug;

use crate::config::Settings;
use crate::document::{from_lsp_position, to_lsp_position, to_lsp_range};
use crate::intelligence::Navigator;
use crate::structural::FoldingAnalyzer;


/// Fold or unfold every block: `[uri, folded]`
pub const TOGGLE_FOLD: &str = "bracefold.toggleFold";
/// List every block for a preview panel: `[uri]`
pub const PREVIEW: &str = "bracefold.preview";
/// Jump to the next block: `[uri, position]`
pub const NEXT: &str = "bracefold.next";
/// Jump to the previous block: `[uri, position]`
pub const PREVIOUS: &str = "bracefold.previous";

/// Names advertised in the server capabilities
pub fn all() -> Vec<String> {
    [TOGGLE_FOLD, PREVIEW, NEXT, PREVIOUS]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Errors raised while parsing or running a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid arguments for {command}: {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("document not open: {0}")]
    DocumentNotFound(Url),
}

impl From<CommandError> for jsonrpc::Error {
    fn from(error: CommandError) -> Self {
        jsonrpc::Error::invalid_params(error.to_string())
    }
}

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleFold { uri: Url, folded: bool },
    Preview { uri: Url },
    Next { uri: Url, position: Position },
    Previous { uri: Url, position: Position },
}

impl Command {
    /// Parse a command name and its JSON arguments
    pub fn parse(name: &str, arguments: Vec<Value>) -> Result<Self, CommandError> {
        let mut args = Arguments::new(name, arguments);

        let command = match name {
            TOGGLE_FOLD => Self::ToggleFold {
                uri: args.next("uri")?,
                folded: args.next("folded")?,
            },
            PREVIEW => Self::Preview {
                uri: args.next("uri")?,
            },
            NEXT => Self::Next {
                uri: args.next("uri")?,
                position: args.next("position")?,
            },
            PREVIOUS => Self::Previous {
                uri: args.next("uri")?,
                position: args.next("position")?,
            },
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        };

        Ok(command)
    }

    /// Document the command applies to
    pub fn uri(&self) -> &Url {
        match self {
            Self::ToggleFold { uri, .. }
            | Self::Preview { uri }
            | Self::Next { uri, .. }
            | Self::Previous { uri, .. } => uri,
        }
    }

    /// Run the command against a document snapshot
    pub fn run<D>(&self, document: &D, scanner: &Scanner, settings: &Settings) -> Value
    where
        D: TextDocument + ?Sized,
    {
        match self {
            Self::ToggleFold { folded, .. } => {
                let ranges = FoldingAnalyzer::generate_ranges(
                    document,
                    scanner,
                    settings.folding.collapsed_text.as_deref(),
                );
                debug!("Toggling {} folds (folded: {})", ranges.len(), !folded);
                json!({ "folded": !folded, "ranges": ranges })
            }
            Self::Preview { .. } => {
                let blocks: Vec<Value> = scanner
                    .scan(document.text())
                    .filter_map(|m| {
                        let span = MatchSpan::resolve(document, &m).ok()?;
                        Some(json!({
                            "keyword": scanner.keyword(),
                            "position": to_lsp_position(span.keyword.start),
                            "range": to_lsp_range(span.block_range()),
                            "content": m.raw_content,
                        }))
                    })
                    .collect();
                json!({ "language": settings.hover.language, "blocks": blocks })
            }
            Self::Next { position, .. } => {
                Navigator::next(document, scanner, from_lsp_position(*position))
                    .map_or(Value::Null, |range| json!(to_lsp_range(range)))
            }
            Self::Previous { position, .. } => {
                Navigator::previous(document, scanner, from_lsp_position(*position))
                    .map_or(Value::Null, |range| json!(to_lsp_range(range)))
            }
        }
    }
}

/// Positional argument reader
struct Arguments<'a> {
    command: &'a str,
    values: std::vec::IntoIter<Value>,
}

impl<'a> Arguments<'a> {
    fn new(command: &'a str, values: Vec<Value>) -> Self {
        Self {
            command,
            values: values.into_iter(),
        }
    }

    fn next<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, CommandError> {
        let value = self.values.next().ok_or_else(|| self.invalid(format!("missing {name}")))?;
        serde_json::from_value(value).map_err(|e| self.invalid(format!("bad {name}: {e}")))
    }

    fn invalid(&self, reason: String) -> CommandError {
        CommandError::InvalidArguments {
            command: self.command.to_string(),
            reason,
        }
    }
}
