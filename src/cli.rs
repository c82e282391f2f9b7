//! Command-line interface argument parsing.
//!
//! Every flag is optional: running without arguments reads the default
//! seed directory and prints the text report.

use clap::Parser;
use std::path::PathBuf;

/// seedtally - question counts and coverage for yearly exam seed files
///
/// Reads `questions-<year>.json` from the seed directory, counts the
/// questions of each year, estimates coverage against a per-year quota
/// and breaks the questions down by category.
///
/// Examples:
///   seedtally
///   seedtally --seed-dir ./seeds --format json
///   seedtally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the questions-<year>.json files
    ///
    /// Overrides the directory from .seedtally.toml.
    #[arg(long, value_name = "DIR", env = "SEEDTALLY_SEED_DIR")]
    pub seed_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .seedtally.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .seedtally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level, taking `verbose` from the merged configuration.
    ///
    /// Logs go to stderr, so the default stays at WARN to keep the report
    /// the only regular output.
    pub fn log_level(&self, verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
