//! JSONL record reader for translation event files

use super::schema::RawRecord;
use crate::error::{DeliveryError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a single JSONL line into a raw record.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_record_line(line: &str, line_number: usize) -> Result<RawRecord> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(DeliveryError::MalformedRecord {
            line: line_number,
            details: format!("expected an object, found {}", super::schema::json_kind_name(&other)),
        }),
        Err(e) => Err(DeliveryError::MalformedRecord {
            line: line_number,
            details: e.to_string(),
        }),
    }
}

/// Read every record of a JSONL file, in file order.
///
/// Blank lines are skipped. Records are not validated here.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DeliveryError::FileNotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record_line(line.trim(), idx + 1)?);
    }

    log::debug!("📖 Read {} records from {}", records.len(), path.display());
    Ok(records)
}
