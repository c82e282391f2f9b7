//! Question aggregation across yearly seed files.
//!
//! The run is split into two independent passes. The counting pass reads
//! every year's file and reports failures; the category pass re-reads the
//! files that counted above zero and silently drops any that no longer
//! parse. Because the passes do not share parsed content, a file that
//! changes between them can leave the category total out of step with the
//! question total.

use crate::models::{AggregateResult, CategoryCounts, YearCounts, UNCATEGORIZED};
use crate::seeds::{count_questions_in_file, load_seed, seed_path};
use serde_json::Value;
use std::io::Write;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Fatal aggregation failures.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("seed directory not found: {}", .0.display())]
    MissingSeedDirectory(PathBuf),
}

/// Settings for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Directory holding `questions-<year>.json` files.
    pub seed_dir: PathBuf,
    /// Years to read, end exclusive.
    pub years: Range<u32>,
    /// Assumed number of questions per year.
    pub per_year_quota: usize,
}

impl From<&crate::config::SeedsConfig> for AggregatorConfig {
    fn from(config: &crate::config::SeedsConfig) -> Self {
        Self {
            seed_dir: config.dir.clone(),
            years: config.start_year..config.end_year,
            per_year_quota: config.per_year_quota,
        }
    }
}

/// Run both passes and build the result.
///
/// Counting-pass failures are written to `diag`, one line per file.
pub fn aggregate(
    config: &AggregatorConfig,
    diag: &mut dyn Write,
) -> Result<AggregateResult, AggregateError> {
    if !config.seed_dir.exists() {
        return Err(AggregateError::MissingSeedDirectory(
            config.seed_dir.clone(),
        ));
    }

    info!("Reading seed files from {}", config.seed_dir.display());

    let years = count_pass(config, diag);
    let categories = category_pass(config, &years);

    Ok(AggregateResult::new(
        years,
        categories,
        config.per_year_quota,
    ))
}

/// Count the questions of every configured year.
///
/// Absent files count as zero without a diagnostic.
pub fn count_pass(config: &AggregatorConfig, diag: &mut dyn Write) -> YearCounts {
    let mut years = YearCounts::new(config.years.clone());

    for year in config.years.clone() {
        let path = seed_path(&config.seed_dir, year);
        if !path.exists() {
            debug!("No seed file for {}", year);
            continue;
        }

        let count = count_questions_in_file(&path, diag);
        debug!("{}: {} questions", year, count);
        years.record(year, count);
    }

    years
}

/// Tally categories across the years that counted above zero.
pub fn category_pass(config: &AggregatorConfig, years: &YearCounts) -> CategoryCounts {
    let mut categories = CategoryCounts::default();

    for (year, count) in years.iter() {
        if count == 0 {
            continue;
        }

        let path = seed_path(&config.seed_dir, year);
        let value = match load_seed(&path) {
            Ok(value) => value,
            Err(e) => {
                debug!(
                    "Skipping {} in category pass ({}): {}",
                    path.display(),
                    e.kind(),
                    e
                );
                continue;
            }
        };

        match file_categories(&value) {
            Some(file) => categories.merge(file),
            None => debug!(
                "Skipping {} in category pass: not a list of questions",
                path.display()
            ),
        }
    }

    categories
}

/// Categories of one parsed seed file.
///
/// Returns `None` unless the value is an array. Questions are tallied in
/// order up to the first element that is not an object; everything from
/// that element on is dropped.
fn file_categories(value: &Value) -> Option<CategoryCounts> {
    let questions = value.as_array()?;
    let mut categories = CategoryCounts::default();

    for (position, question) in questions.iter().enumerate() {
        let Some(question) = question.as_object() else {
            debug!(
                "Element {} is not a question object; ignoring the rest of the file",
                position
            );
            break;
        };
        let category = question
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or(UNCATEGORIZED);
        categories.increment(category);
    }

    Some(categories)
}
