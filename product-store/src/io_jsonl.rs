//! Tolerant JSONL reader for catalog exports.
//!
//! - Empty lines are skipped.
//! - Bare `NaN` / `Infinity` tokens (written by Python's `json`) become `null`.
//! - Lines that still fail to parse are logged with `warn!` and counted.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::StoreError;

static NON_FINITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([:\[,]\s*)-?(?:NaN|Infinity)\b").expect("non-finite token regex is valid")
});

/// Parsed rows plus the number of lines that could not be parsed.
#[derive(Debug, Default)]
pub struct JsonlRead {
    pub rows: Vec<Value>,
    pub malformed: usize,
}

/// Reads a JSONL file into raw [`serde_json::Value`]s.
///
/// # Errors
/// - [`StoreError::Io`] if the file cannot be opened or read.
pub fn read_all_jsonl(jsonl_path: impl AsRef<Path>) -> Result<JsonlRead, StoreError> {
    info!(target: "product_store::io", path = ?jsonl_path.as_ref(), "reading JSONL");

    let file = File::open(jsonl_path.as_ref())?;
    let reader = BufReader::new(file);

    let mut out = JsonlRead::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(v) => out.rows.push(v),
            Err(e) => {
                warn!(target: "product_store::io", line = i + 1, error = %e, "skipping malformed JSON");
                out.malformed += 1;
            }
        }
    }

    debug!(
        target: "product_store::io",
        rows = out.rows.len(),
        malformed = out.malformed,
        "JSONL loaded"
    );
    Ok(out)
}

/// Strict parse first; on failure retry with non-finite tokens nulled.
fn parse_line(line: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str::<Value>(line) {
        Ok(v) => Ok(v),
        Err(e) => match repair_non_finite(line) {
            Cow::Owned(fixed) => serde_json::from_str::<Value>(&fixed),
            Cow::Borrowed(_) => Err(e),
        },
    }
}

fn repair_non_finite(line: &str) -> Cow<'_, str> {
    NON_FINITE_RE.replace_all(line, "${1}null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_and_counts_malformed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"id": "a", "retail_price": 10}}"#).unwrap();
        writeln!(f).unwrap();
        writeln!(f, "{{not json").unwrap();
        writeln!(f, r#"{{"id": "b", "product_rating": NaN, "x": [1, -Infinity]}}"#).unwrap();

        let read = read_all_jsonl(f.path()).unwrap();
        assert_eq!(read.rows.len(), 2);
        assert_eq!(read.malformed, 1);
        assert!(read.rows[1]["product_rating"].is_null());
        assert!(read.rows[1]["x"][1].is_null());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_all_jsonl("/definitely/not/here.jsonl").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
