//! Trailing time window aggregation of delivery durations

use super::loader::TranslationEvent;
use crate::error::{DeliveryError, Result};
use chrono::{Duration, NaiveDateTime};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Output date format; seconds are always `00`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing window length in whole minutes, always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(i64);

impl WindowSize {
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(DeliveryError::InvalidWindowSize(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }

    /// `None` when the window is too long to express as a `Duration`.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_minutes(self.0)
    }

    /// Earliest timestamp inside the window ending at `minute`.
    ///
    /// Windows reaching past the representable range are unbounded.
    pub fn cutoff(&self, minute: NaiveDateTime) -> NaiveDateTime {
        self.duration()
            .and_then(|d| minute.checked_sub_signed(d))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn as_string(&self) -> String {
        format!("{}m", self.0)
    }
}

/// Running sum and count for the window ending at one minute.
#[derive(Debug, Clone)]
pub struct MinuteWindow {
    pub minute: NaiveDateTime,
    pub total_duration: u128,
    pub samples: usize,
}

impl MinuteWindow {
    pub fn new(minute: NaiveDateTime) -> Self {
        Self {
            minute,
            total_duration: 0,
            samples: 0,
        }
    }

    pub fn add_sample(&mut self, duration: u64) {
        self.total_duration += u128::from(duration);
        self.samples += 1;
    }

    /// Mean duration, or `0.0` when the window holds no events.
    pub fn average(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total_duration as f64 / self.samples as f64
        }
    }

    pub fn into_record(self) -> AggregateRecord {
        AggregateRecord {
            date: self.minute.format(DATE_FORMAT).to_string(),
            average_delivery_time: self.average(),
            samples: self.samples,
        }
    }
}

/// Average delivery time for one minute of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord {
    pub date: String,
    pub average_delivery_time: f64,
    pub samples: usize,
}

impl Serialize for AggregateRecord {
    /// Empty windows are written as the integer `0`; computed averages
    /// always carry a fractional part (`20.0`, `25.5`).
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AggregateRecord", 2)?;
        state.serialize_field("date", &self.date)?;
        if self.samples == 0 {
            state.serialize_field("average_delivery_time", &0u64)?;
        } else {
            state.serialize_field("average_delivery_time", &self.average_delivery_time)?;
        }
        state.end()
    }
}

/// Average the durations of events in `[minute - window, minute]` for
/// every minute of `timeline`.
///
/// Events must be ordered oldest first: the scan for a minute stops at the
/// first event later than that minute.
pub fn compute_window_averages(
    timeline: &[NaiveDateTime],
    events: &[TranslationEvent],
    window_size: i64,
) -> Result<Vec<AggregateRecord>> {
    let window = WindowSize::new(window_size)?;

    let records = timeline
        .iter()
        .map(|&minute| {
            let cutoff = window.cutoff(minute);
            let mut acc = MinuteWindow::new(minute);

            for event in events {
                if event.timestamp > minute {
                    break;
                }
                if event.timestamp >= cutoff {
                    acc.add_sample(event.duration);
                }
            }

            acc.into_record()
        })
        .collect();

    Ok(records)
}
