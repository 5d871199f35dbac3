//! Configuration loading.
//!
//! Output and logging settings are read from a TOML file. Scoring itself has
//! no tunables; nothing here changes how distances are computed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Complete matcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MatcherConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// How scored tables are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON array of records
    #[default]
    Json,
    /// One record per line
    Jsonl,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON output (ignored for jsonl)
    pub pretty: bool,
    /// Log a summary line after scoring
    pub include_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: false,
            include_summary: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `matcher=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error writing TOML
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the default configuration as a commented TOML document.
pub fn default_config_toml() -> String {
    r#"# Matcher Configuration

[output]
# json: one array of records; jsonl: one record per line
format = "json"
pretty = false
include_summary = true

[logging]
# Overridden by RUST_LOG when set
level = "info"
"#
    .to_string()
}
