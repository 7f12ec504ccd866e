//! # Storage Layer
//!
//! Veille keeps no state between runs. The only thing read from disk is
//! user configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `~/.config/veille/config.toml` or `--config <path>` |
//!
//! ## Key Types
//!
//! - [`Config`] - Submission and validation settings

mod config;

pub use config::{Config, ConfigError, OutputFormat, SubmissionConfig, ValidationConfig};
