//! Configuration Settings
//!
//! Defines the configuration structures and how they are loaded.

use std::path::Path;

use bracefold_core::{ScanError, ScanOptions, Scanner, DEFAULT_KEYWORD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or applying settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid settings payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scanner settings: {0}")]
    Scanner(#[from] ScanError),
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// What to scan for
    pub scanner: ScannerSettings,
    /// Hover preview rendering
    pub hover: HoverSettings,
    /// Folding presentation
    pub folding: FoldingSettings,
}

impl Settings {
    /// Name of the settings file looked up in the workspace root
    pub const FILE_NAME: &'static str = "bracefold.toml";

    /// Section name used by editors for JSON settings
    pub const SECTION: &'static str = "bracefold";

    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Parse settings from an editor JSON payload
    ///
    /// Accepts either the bare settings object or one wrapped in a
    /// `"bracefold"` section, as sent by `workspace/didChangeConfiguration`.
    /// `null` yields the defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        let value = match value {
            serde_json::Value::Object(mut map) if map.contains_key(Self::SECTION) => {
                map.remove(Self::SECTION).unwrap_or_default()
            }
            other => other,
        };
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load `bracefold.toml` from `root`, if present
    pub fn load(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(Self::FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(Some(Self::from_toml_str(&content)?))
    }
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    /// Keyword that introduces a foldable block
    pub keyword: String,
    /// Skip keyword occurrences inside comments
    #[serde(alias = "ignoreKeywordInComments")]
    pub ignore_keyword_in_comments: bool,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            ignore_keyword_in_comments: ScanOptions::default().ignore_keyword_in_comments,
        }
    }
}

impl ScannerSettings {
    /// Scan options described by these settings
    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            ignore_keyword_in_comments: self.ignore_keyword_in_comments,
        }
    }

    /// Build a scanner from these settings
    pub fn build(&self) -> Result<Scanner, ConfigError> {
        Ok(Scanner::new(&self.keyword, self.options())?)
    }
}

/// Hover configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverSettings {
    /// Language tag of the fenced code block in the preview
    pub language: String,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            language: "tsx".to_string(),
        }
    }
}

/// Folding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldingSettings {
    /// Text shown in place of a collapsed block
    #[serde(alias = "collapsedText")]
    pub collapsed_text: Option<String>,
}

impl Default for FoldingSettings {
    fn default() -> Self {
        Self {
            collapsed_text: Some("{...}".to_string()),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_scanner_settings_default() {
        let settings = ScannerSettings::default();
        assert_eq!(settings.keyword, "sx");
        assert!(settings.ignore_keyword_in_comments);
    }

    #[test]
    fn test_settings_debug() {
        let settings = Settings::default();
        let debug_str = format!("{:?}", settings);
        assert!(debug_str.contains("Settings"));
    }
}
