//! Unified writer interface for minute aggregates
//!
//! Routes writes to either JSONL or SQLite backend based on configuration.

use super::jsonl_writer::JsonlAggregateWriter;
use super::sqlite_writer::SqliteAggregateWriter;
use super::window::{AggregateRecord, WindowSize};
use super::writer_backend::{AggregateWriterBackend, WriterError};
use crate::config::{BackendType, OutputConfig};

/// Unified writer that routes to either JSONL or SQLite backend
pub enum AggregateWriter {
    Jsonl(JsonlAggregateWriter),
    Sqlite(SqliteAggregateWriter),
}

impl AggregateWriter {
    /// Open the backend named by `config`
    pub fn new(config: &OutputConfig, window: WindowSize) -> Result<Self, WriterError> {
        match config.backend {
            BackendType::Jsonl => Ok(AggregateWriter::Jsonl(JsonlAggregateWriter::new(
                &config.output_path,
            )?)),
            BackendType::Sqlite => Ok(AggregateWriter::Sqlite(SqliteAggregateWriter::new(
                &config.output_path,
                window,
            )?)),
        }
    }

    fn backend(&mut self) -> &mut dyn AggregateWriterBackend {
        match self {
            AggregateWriter::Jsonl(w) => w,
            AggregateWriter::Sqlite(w) => w,
        }
    }

    pub async fn write_record(&mut self, record: &AggregateRecord) -> Result<(), WriterError> {
        self.backend().write_record(record).await
    }

    pub async fn flush(&mut self) -> Result<(), WriterError> {
        self.backend().flush().await
    }

    /// Write every record in order, then flush
    pub async fn write_all(&mut self, records: &[AggregateRecord]) -> Result<usize, WriterError> {
        for record in records {
            self.write_record(record).await?;
        }
        self.flush().await?;
        Ok(records.len())
    }

    pub fn backend_type(&self) -> &'static str {
        match self {
            AggregateWriter::Jsonl(_) => "JSONL",
            AggregateWriter::Sqlite(_) => "SQLite",
        }
    }
}
