//! seedtally - question statistics for yearly exam seed files
//!
//! Counts the questions in `questions-<year>.json` for each configured
//! year, estimates coverage against a per-year quota and prints a
//! per-category breakdown.
//!
//! Exit codes:
//!   0 - Report printed (missing or malformed year files count as zero)
//!   1 - Seed directory not found, or invalid arguments/configuration

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod seeds;

use analysis::{AggregateError, AggregatorConfig};
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use std::io;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // The config can turn on verbose logging, so it is loaded first
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("seedtally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .seedtally.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change the seed directory, year range, or quota.");
    Ok(())
}

/// Install the stderr logger.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Aggregate the seed files and print the report. Returns the exit code.
fn run(args: &Args, config: &Config) -> Result<i32> {
    config.validate()?;

    let settings = AggregatorConfig::from(&config.seeds);

    let result = match analysis::aggregate(&settings, &mut io::stderr()) {
        Ok(result) => result,
        Err(AggregateError::MissingSeedDirectory(dir)) => {
            debug!("Seed directory missing: {}", dir.display());
            println!("{}", report::MISSING_SEED_DIR_MESSAGE);
            return Ok(1);
        }
    };

    info!(
        "{} questions over {} years, {} categories",
        result.total,
        result.years.len(),
        result.categories.len()
    );
    if result.categories.total() != result.total {
        debug!(
            "Category total {} differs from question total {}",
            result.categories.total(),
            result.total
        );
    }

    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(&result),
        OutputFormat::Json => report::generate_json_report(&result, &settings.seed_dir)? + "\n",
    };

    print!("{}", output);
    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is installed, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", DEFAULT_CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}
