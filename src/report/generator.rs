//! Report generation.
//!
//! This module renders an [`AggregateResult`] as the text report printed
//! by default, or as a JSON document.

use crate::models::{AggregateResult, CategoryCount, Coverage, YearCounts};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Printed instead of a report when the seed directory is missing.
pub const MISSING_SEED_DIR_MESSAGE: &str = "シードデータディレクトリが見つかりません";

/// Width of the category label column.
const CATEGORY_WIDTH: usize = 20;

/// Generate the complete text report.
pub fn generate_text_report(result: &AggregateResult) -> String {
    let mut output = String::new();

    output.push_str(&generate_totals_section(result));
    output.push_str(&generate_years_section(&result.years));
    output.push_str(&generate_coverage_section(&result.coverage));
    output.push_str(&generate_categories_section(result));

    output
}

fn generate_totals_section(result: &AggregateResult) -> String {
    let mut section = String::new();

    section.push_str("📊 現在の問題数統計:\n");
    section.push_str(&format!("総問題数: {}\n", result.total));
    section.push('\n');

    section
}

/// Per-year breakdown, count right-aligned to three columns.
fn generate_years_section(years: &YearCounts) -> String {
    let mut section = String::new();

    section.push_str("年度別問題数:\n");
    for (year, count) in years.iter() {
        section.push_str(&format!("  {}年度: {:3}問\n", year, count));
    }

    section
}

fn generate_coverage_section(coverage: &Coverage) -> String {
    format!(
        "\n推定網羅率: {}% ({}/{})\n",
        coverage.percent, coverage.present, coverage.capacity
    )
}

/// Category breakdown, omitted entirely when no category was seen.
fn generate_categories_section(result: &AggregateResult) -> String {
    if result.categories.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("\nカテゴリ別問題数:\n");
    for entry in result.categories.sorted() {
        section.push_str(&format!(
            "  {:<width$}: {:3}問\n",
            entry.category,
            entry.count,
            width = CATEGORY_WIDTH
        ));
    }

    section
}

/// JSON view of a report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    seed_dir: &'a Path,
    total: usize,
    years: &'a YearCounts,
    coverage: &'a Coverage,
    categories: Vec<&'a CategoryCount>,
}

/// Generate a JSON report.
pub fn generate_json_report(result: &AggregateResult, seed_dir: &Path) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        seed_dir,
        total: result.total,
        years: &result.years,
        coverage: &result.coverage,
        categories: result.categories.sorted(),
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}
