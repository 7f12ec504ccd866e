//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::summary;
use crate::domain::{DateRange, DATE_FORMAT};
use crate::storage::Config;
use crate::workflow::{Clock, FixedClock, SystemClock};

#[derive(Parser)]
#[command(name = "veille")]
#[command(author, version, about = "Summary requests for media monitoring")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, global = true, env = "VEILLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pin today's date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date range as typed by the user; empty or omitted means "not selected"
#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

impl DateArgs {
    pub fn to_range(&self) -> Result<DateRange> {
        DateRange::parse(
            self.start.as_deref().unwrap_or(""),
            self.end.as_deref().unwrap_or(""),
        )
        .context("Invalid date input")
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a date range without submitting it
    Check {
        #[command(flatten)]
        dates: DateArgs,
    },

    /// Generate a summary for a custom date range
    Summary {
        #[command(flatten)]
        dates: DateArgs,
    },

    /// Generate the summary of the last 24 hours
    Daily,

    /// Generate a "Flash News" summary
    Flash,

    /// Show the effective configuration
    Config,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD", value))
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Veille starting");
    if let Some(path) = &cli.config {
        output.verbose_ctx("config", &format!("Loaded configuration from: {}", path.display()));
    }

    let clock: Box<dyn Clock> = match cli.today {
        Some(today) => {
            output.verbose_ctx("clock", &format!("Using pinned date: {}", today));
            Box::new(FixedClock(today))
        }
        None => Box::new(SystemClock),
    };

    match cli.command {
        Commands::Check { dates } => {
            let range = dates.to_range()?;
            summary::check(&output, &config, clock.as_ref(), range)?
        }
        Commands::Summary { dates } => {
            let range = dates.to_range()?;
            summary::custom(&output, &config, clock.as_ref(), range)?
        }
        Commands::Daily => summary::daily(&output, &config, clock.as_ref())?,
        Commands::Flash => summary::flash(&output, &config, clock.as_ref())?,
        Commands::Config => show_config(&output, &config, cli.config.as_deref())?,
    }

    Ok(())
}

fn show_config(output: &Output, config: &Config, explicit: Option<&std::path::Path>) -> Result<()> {
    let source = explicit
        .map(|p| p.to_path_buf())
        .or_else(Config::default_path);

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": source,
            "config": config,
        }));
    } else {
        match &source {
            Some(path) => println!("# {}", path.display()),
            None => println!("# (no config directory)"),
        }
        let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
        print!("{}", text);
    }

    Ok(())
}
