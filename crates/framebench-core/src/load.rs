//! Newline-delimited JSON loading.
//!
//! Each non-empty line of a results file is one JSON object. Lines that do
//! not parse are logged and skipped so that a single corrupt write does not
//! hide the rest of a benchmark campaign.

use crate::error::{ReportError, ReportResult};
use crate::record::BenchmarkRecord;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// A line that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// Trimmed line content.
    pub content: String,
    /// Parser error message.
    pub error: String,
}

/// Records loaded from a results file.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// Successfully parsed records, in file order.
    pub records: Vec<BenchmarkRecord>,
    /// Lines that could not be parsed.
    pub skipped: Vec<SkippedLine>,
}

impl LoadedRecords {
    /// Whether no record was loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load records from a reader of newline-delimited JSON.
///
/// Only read errors are fatal. Lines that are not UTF-8 or not a record
/// are collected in [`LoadedRecords::skipped`].
pub fn load_records<R: BufRead>(reader: R) -> std::io::Result<LoadedRecords> {
    let mut loaded = LoadedRecords::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_number = index + 1;

        let parsed = match std::str::from_utf8(&raw) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() {
                    continue;
                }
                serde_json::from_str::<BenchmarkRecord>(line)
                    .map_err(|e| (line.to_string(), e.to_string()))
            }
            Err(e) => {
                let lossy = String::from_utf8_lossy(&raw);
                Err((lossy.trim().to_string(), e.to_string()))
            }
        };

        match parsed {
            Ok(record) => loaded.records.push(record),
            Err((content, error)) => {
                warn!(line = line_number, %content, %error, "Error parsing line");
                loaded.skipped.push(SkippedLine {
                    line_number,
                    content,
                    error,
                });
            }
        }
    }

    debug!(
        records = loaded.records.len(),
        skipped = loaded.skipped.len(),
        "Loaded benchmark records"
    );

    Ok(loaded)
}

/// Load records from a results file.
pub fn load_file<P: AsRef<Path>>(path: P) -> ReportResult<LoadedRecords> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    load_records(BufReader::new(file)).map_err(|e| ReportError::io(path, e))
}
