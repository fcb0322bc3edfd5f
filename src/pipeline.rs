//! End-to-end moving average computation: load → timeline → window averages

use crate::aggregator_core::{
    build_timeline, compute_window_averages, load_events, read_records, AggregateRecord, RawRecord,
};
use crate::error::Result;
use std::path::Path;

/// Run the whole pipeline over in-memory records.
pub fn compute_moving_averages<I>(records: I, window_size: i64) -> Result<Vec<AggregateRecord>>
where
    I: IntoIterator<Item = RawRecord>,
{
    let events = load_events(records)?;
    log::info!("📥 Loaded {} translation events", events.len());

    let timeline = build_timeline(&events)?;
    if let (Some(first), Some(last)) = (timeline.first(), timeline.last()) {
        log::info!("🕐 Timeline: {} → {} ({} minutes)", first, last, timeline.len());
    }

    compute_window_averages(&timeline, &events, window_size)
}

/// Run the whole pipeline over a JSONL file.
pub fn compute_moving_averages_from_path(
    path: impl AsRef<Path>,
    window_size: i64,
) -> Result<Vec<AggregateRecord>> {
    let records = read_records(path)?;
    compute_moving_averages(records, window_size)
}
