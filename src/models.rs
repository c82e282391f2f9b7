//! Data models for the seed statistics report.
//!
//! This module contains the derived structures produced by one run of the
//! aggregator. None of them are persisted.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Label for questions without a usable `category` field.
pub const UNCATEGORIZED: &str = "未分類";

/// Question counts keyed by year.
///
/// Every year of the configured range has an entry from construction on,
/// so a missing file still shows up as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YearCounts {
    counts: BTreeMap<u32, usize>,
}

impl YearCounts {
    /// Creates a zero-filled map for every year in `years`.
    pub fn new(years: Range<u32>) -> Self {
        Self {
            counts: years.map(|year| (year, 0)).collect(),
        }
    }

    /// Sets the count for `year`. Years outside the range are ignored.
    pub fn record(&mut self, year: u32, count: usize) {
        if let Some(slot) = self.counts.get_mut(&year) {
            *slot = count;
        }
    }

    /// Returns the count for `year`, if it is in range.
    #[allow(dead_code)]
    pub fn get(&self, year: u32) -> Option<usize> {
        self.counts.get(&year).copied()
    }

    /// Iterates `(year, count)` in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.counts.iter().map(|(year, count)| (*year, *count))
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all per-year counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// A single category tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Category tallies in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
    index: HashMap<String, usize>,
}

impl CategoryCounts {
    /// Adds one question to `category`.
    pub fn increment(&mut self, category: &str) {
        self.add(category, 1);
    }

    /// Adds `count` questions to `category`.
    pub fn add(&mut self, category: &str, count: usize) {
        match self.index.get(category) {
            Some(&pos) => self.entries[pos].count += count,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryCount {
                    category: category.to_string(),
                    count,
                });
            }
        }
    }

    /// Folds another tally into this one, keeping this one's order first.
    pub fn merge(&mut self, other: CategoryCounts) {
        for entry in other.entries {
            self.add(&entry.category, entry.count);
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, category: &str) -> Option<usize> {
        self.index.get(category).map(|&pos| self.entries[pos].count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all category counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries by count, highest first. Equal counts keep first-seen order.
    pub fn sorted(&self) -> Vec<&CategoryCount> {
        let mut sorted: Vec<&CategoryCount> = self.entries.iter().collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.count));
        sorted
    }
}

/// Share of the assumed question capacity that is actually present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// `present * 100 / capacity`, rounded down.
    pub percent: usize,
    /// Questions found.
    pub present: usize,
    /// Years multiplied by the per-year quota.
    pub capacity: usize,
}

impl Coverage {
    /// Computes coverage for `present` questions over `years` years.
    pub fn compute(present: usize, years: usize, per_year_quota: usize) -> Self {
        let capacity = years.saturating_mul(per_year_quota);
        let percent = if capacity > 0 {
            present.saturating_mul(100) / capacity
        } else {
            0
        };

        Self {
            percent,
            present,
            capacity,
        }
    }
}

/// Everything one run of the aggregator found.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Sum of `years`.
    pub total: usize,
    /// Per-year counts from the counting pass.
    pub years: YearCounts,
    /// Category tallies from the category pass.
    pub categories: CategoryCounts,
    pub coverage: Coverage,
}

impl AggregateResult {
    /// Builds the result, deriving the total and coverage from `years`.
    pub fn new(years: YearCounts, categories: CategoryCounts, per_year_quota: usize) -> Self {
        let total = years.total();
        let coverage = Coverage::compute(total, years.len(), per_year_quota);

        Self {
            total,
            years,
            categories,
            coverage,
        }
    }
}
