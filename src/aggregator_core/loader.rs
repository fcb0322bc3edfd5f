//! Event loading: validation, deduplication and timestamp parsing

use super::reader::read_records;
use super::schema::{validate_record, RawRecord};
use crate::error::{DeliveryError, Result};
use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Input timestamp format, e.g. `2018-12-26 18:11:08.509654`.
///
/// `%.f` alone also accepts a missing fraction or nanoseconds, so
/// [`parse_timestamp`] checks the fraction first.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Longest fractional part accepted: microseconds.
const MAX_FRACTION_DIGITS: usize = 6;

/// A validated translation delivery event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEvent {
    pub timestamp: NaiveDateTime,
    pub translation_id: String,
    pub source_language: String,
    pub target_language: String,
    pub client_name: String,
    pub event_name: String,
    pub nr_words: u64,
    pub duration: u64,
}

#[derive(Debug, Deserialize)]
struct RawTranslationEvent {
    timestamp: String,
    translation_id: String,
    source_language: String,
    target_language: String,
    client_name: String,
    event_name: String,
    nr_words: u64,
    duration: u64,
}

impl TranslationEvent {
    /// Decode an already-validated record, parsing its timestamp.
    fn from_validated(record: RawRecord) -> Result<Self> {
        let raw: RawTranslationEvent = serde_json::from_value(Value::Object(record))?;
        let timestamp = parse_timestamp(&raw.timestamp)?;

        Ok(Self {
            timestamp,
            translation_id: raw.translation_id,
            source_language: raw.source_language,
            target_language: raw.target_language,
            client_name: raw.client_name,
            event_name: raw.event_name,
            nr_words: raw.nr_words,
            duration: raw.duration,
        })
    }
}

/// Parse `Year-Month-Day Hour:Minute:Second.Microsecond`.
///
/// The fraction is mandatory and holds 1 to 6 digits. Leap seconds are
/// rejected.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let format_error = || DeliveryError::TimestampFormat(text.to_string());

    let fraction = text.rsplit_once('.').map(|(_, f)| f).ok_or_else(format_error)?;
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(format_error());
    }

    let ts = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| format_error())?;
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(format_error());
    }
    Ok(ts)
}

/// Validate and deduplicate raw records, keeping input order.
///
/// Every record is validated, duplicates included; the first occurrence of
/// a `translation_id` wins. Input order is preserved, never sorted.
pub fn load_events<I>(records: I) -> Result<Vec<TranslationEvent>>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut events = Vec::new();
    let mut duplicates = 0usize;

    for record in records {
        validate_record(&record)?;

        let translation_id = record
            .get("translation_id")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if seen_ids.contains(translation_id) {
            log::debug!("Skipping duplicate translation {}", translation_id);
            duplicates += 1;
            continue;
        }
        seen_ids.insert(translation_id.to_string());

        events.push(TranslationEvent::from_validated(record)?);
    }

    if duplicates > 0 {
        log::info!("🧹 Dropped {} duplicate translations", duplicates);
    }

    Ok(events)
}

/// Read a JSONL file and load its events.
pub fn load_events_from_path(path: impl AsRef<Path>) -> Result<Vec<TranslationEvent>> {
    let records = read_records(path)?;
    load_events(records)
}
