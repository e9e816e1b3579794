use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

/// How updates are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One snapshot JSON object per line.
    Json,
    /// Human-readable waterfall rows.
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => anyhow::bail!("unknown output format: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event feed path, `-` for stdin.
    pub input: String,
    pub format: OutputFormat,
    /// Milliseconds per bar character in text output.
    pub bar_scale_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: "-".to_string(),
            format: OutputFormat::Json,
            bar_scale_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `WATERFALL_CONFIG` names an optional YAML file; `WATERFALL_INPUT`,
    /// `WATERFALL_FORMAT` and `WATERFALL_LOG` override what it says.
    pub fn load() -> Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with a custom variable lookup.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = match lookup("WATERFALL_CONFIG") {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("Invalid config file {}", path))?
            }
            None => Self::default(),
        };

        if let Some(input) = lookup("WATERFALL_INPUT") {
            cfg.input = input;
        }
        if let Some(format) = lookup("WATERFALL_FORMAT") {
            cfg.format = format.parse()?;
        }
        if let Some(level) = lookup("WATERFALL_LOG") {
            cfg.log_level = level;
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse YAML config")
    }

    /// Maximum level for the log subscriber.
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level: {}", self.log_level))
    }

    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}
