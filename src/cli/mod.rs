//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `check` | Validate a date range only |
//! | `summary` | Validate and generate a custom range summary |
//! | `daily` | Generate the last-24h summary |
//! | `flash` | Generate a Flash News summary |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the config file.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! veille --verbose summary --start 2024-01-01 --end 2024-01-31
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod summary;

pub use app::{Cli, Commands, DateArgs, run};
pub use output::{Output, OutputFormat};
