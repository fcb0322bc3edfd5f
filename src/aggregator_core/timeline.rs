//! Minute timeline spanning the loaded events

use super::loader::TranslationEvent;
use crate::error::{DeliveryError, Result};
use chrono::{Duration, NaiveDateTime, Timelike};

/// Zero the seconds and sub-second part of `ts`.
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts - Duration::seconds(i64::from(ts.second()))
        - Duration::nanoseconds(i64::from(ts.nanosecond()))
}

/// Every minute from the first event's minute to the last event's minute
/// plus one, inclusive.
///
/// Events must be ordered oldest first. The check only catches inputs
/// where the last event's minute plus one lands before the first event's
/// minute; it is not a full sortedness check.
pub fn build_timeline(events: &[TranslationEvent]) -> Result<Vec<NaiveDateTime>> {
    let (first, last) = match (events.first(), events.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(DeliveryError::EmptyInput),
    };

    let start = truncate_to_minute(first.timestamp);
    let end = truncate_to_minute(last.timestamp) + Duration::minutes(1);

    if start > end {
        return Err(DeliveryError::OrderingViolation);
    }

    let mut minutes = Vec::with_capacity(((end - start).num_minutes() + 1) as usize);
    let mut current = start;
    while current <= end {
        minutes.push(current);
        current += Duration::minutes(1);
    }

    log::debug!("Timeline spans {} minutes ({} → {})", minutes.len(), start, end);
    Ok(minutes)
}
