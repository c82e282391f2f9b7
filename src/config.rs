//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.seedtally.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".seedtally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Seed data settings.
    #[serde(default)]
    pub seeds: SeedsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where the seed files live and how they are judged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedsConfig {
    /// Seed directory, relative to the working directory.
    #[serde(default = "default_seed_dir")]
    pub dir: PathBuf,

    /// First year read.
    #[serde(default = "default_start_year")]
    pub start_year: u32,

    /// Year after the last one read.
    #[serde(default = "default_end_year")]
    pub end_year: u32,

    /// Assumed number of questions per year.
    #[serde(default = "default_per_year_quota")]
    pub per_year_quota: usize,
}

impl Default for SeedsConfig {
    fn default() -> Self {
        Self {
            dir: default_seed_dir(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            per_year_quota: default_per_year_quota(),
        }
    }
}

fn default_seed_dir() -> PathBuf {
    PathBuf::from("ap-study-backend/src/infrastructure/database/seeds")
}

fn default_start_year() -> u32 {
    2020
}

fn default_end_year() -> u32 {
    2026
}

fn default_per_year_quota() -> usize {
    80
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.seed_dir {
            self.seeds.dir = dir.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check settings that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.seeds.end_year < self.seeds.start_year {
            bail!(
                "Invalid year range: end_year ({}) is before start_year ({})",
                self.seeds.end_year,
                self.seeds.start_year
            );
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
