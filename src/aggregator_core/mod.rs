//! Aggregator Core - Translation Delivery Moving Averages
//!
//! Turns a JSONL stream of translation delivery events into one average
//! delivery time per minute over a trailing window.
//!
//! # Architecture
//!
//! ```text
//! JSONL file → read_records → load_events (validate + dedup)
//!     ↓
//! build_timeline (first minute .. last minute + 1)
//!     ↓
//! compute_window_averages ([m - window, m] per minute)
//!     ↓
//! AggregateWriter → JSONL or SQLite backend
//! ```

pub mod schema;
pub mod reader;
pub mod loader;
pub mod timeline;
pub mod window;
pub mod writer_backend;
pub mod jsonl_writer;
pub mod sqlite_writer;
pub mod writer;

pub use schema::{validate_record, FieldKind, RawRecord, EXPECTED_FIELDS};
pub use reader::read_records;
pub use loader::{load_events, load_events_from_path, TranslationEvent};
pub use timeline::{build_timeline, truncate_to_minute};
pub use window::{compute_window_averages, AggregateRecord, MinuteWindow, WindowSize};
pub use writer_backend::{AggregateWriterBackend, WriterError};
pub use jsonl_writer::JsonlAggregateWriter;
pub use sqlite_writer::SqliteAggregateWriter;
pub use writer::AggregateWriter;
