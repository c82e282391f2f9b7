//! Seed file loading and question counting.
//!
//! Every read is a full open-read-close cycle; nothing parsed here is
//! cached between calls.

use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Recoverable failures when reading a single seed file.
///
/// All of them degrade to a zero count (or a skipped file) at the call site.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// The file does not exist.
    #[error("{0}")]
    NotFound(#[source] io::Error),

    /// The file exists but cannot be opened.
    #[error("{0}")]
    PermissionDenied(#[source] io::Error),

    /// Any other read failure (directory in place of a file, invalid UTF-8, ...).
    #[error("{0}")]
    Io(#[source] io::Error),

    /// The contents are not valid JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl From<io::Error> for SeedFileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SeedFileError::NotFound(err),
            io::ErrorKind::PermissionDenied => SeedFileError::PermissionDenied(err),
            _ => SeedFileError::Io(err),
        }
    }
}

impl SeedFileError {
    /// Short label used when logging the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            SeedFileError::NotFound(_) => "not-found",
            SeedFileError::PermissionDenied(_) => "permission-denied",
            SeedFileError::Io(_) => "io",
            SeedFileError::Parse(_) => "parse",
        }
    }
}

/// Path of the seed file for `year` inside `seed_dir`.
pub fn seed_path(seed_dir: &Path, year: u32) -> PathBuf {
    seed_dir.join(format!("questions-{}.json", year))
}

/// Read and parse a seed file.
pub fn load_seed(path: &Path) -> Result<Value, SeedFileError> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Number of questions represented by a parsed seed value.
///
/// An array counts its elements; any other value counts as one question
/// when truthy and zero otherwise.
pub fn count_questions(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        other if is_truthy(other) => 1,
        _ => 0,
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings/objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Count the questions in a seed file.
///
/// Never fails: any error writes one line to `diag` and yields 0.
pub fn count_questions_in_file(path: &Path, diag: &mut dyn Write) -> usize {
    match load_seed(path) {
        Ok(value) => count_questions(&value),
        Err(e) => {
            debug!("Counting {} failed ({})", path.display(), e.kind());
            let _ = writeln!(diag, "エラー {}: {}", path.display(), e);
            0
        }
    }
}
