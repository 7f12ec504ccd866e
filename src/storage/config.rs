//! Configuration handling for Veille
//!
//! Configuration is read from `~/.config/veille/config.toml` (or the
//! platform equivalent), or from an explicit path given with `--config`.
//! Nothing is written back; every run starts from the file and defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Validator;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for the simulated backend submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Simulated backend latency in milliseconds
    pub delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

/// Settings for date range validation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest accepted range in days (no limit when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_range_days: Option<u32>,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default output format when `--format` is not given
    pub default_format: OutputFormat,

    pub submission: SubmissionConfig,

    pub validation: ValidationConfig,
}

impl Config {
    /// Loads configuration from an explicit file, or the default location
    ///
    /// An explicit file must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "veille", "veille-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        Ok(config)
    }

    /// Parses and checks configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.validation.max_range_days == Some(0) {
            return Err(ConfigError::Invalid(
                "validation.max_range_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Simulated backend latency
    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission.delay_ms)
    }

    /// Builds the validator for these settings
    pub fn validator(&self) -> Validator {
        match self.validation.max_range_days {
            Some(max_days) => Validator::with_max_range_days(max_days),
            None => Validator::default(),
        }
    }
}
