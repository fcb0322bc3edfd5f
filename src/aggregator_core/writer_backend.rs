//! Writer backend trait for minute aggregates
//!
//! Defines the interface for persisting moving-average records to different backends.

use super::window::AggregateRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for WriterError {
    fn from(err: rusqlite::Error) -> Self {
        WriterError::Database(err.to_string())
    }
}

/// Backend trait for writing aggregate records
#[async_trait]
pub trait AggregateWriterBackend: Send {
    /// Write a single minute aggregate
    async fn write_record(&mut self, record: &AggregateRecord) -> Result<(), WriterError>;

    /// Flush pending writes to storage
    async fn flush(&mut self) -> Result<(), WriterError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
