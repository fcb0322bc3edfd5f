//! SQLite writer for minute aggregates
//!
//! Rows are keyed by minute, so re-running the same input upserts
//! identical rows instead of appending.

use super::window::{AggregateRecord, WindowSize};
use super::writer_backend::{AggregateWriterBackend, WriterError};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;

pub struct SqliteAggregateWriter {
    conn: Connection,
    window: WindowSize,
    batch: Vec<AggregateRecord>,
    batch_size: usize,
}

impl SqliteAggregateWriter {
    pub fn new(db_path: impl AsRef<Path>, window: WindowSize) -> Result<Self, WriterError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        // journal_mode reports the resulting mode as a row
        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        log::debug!("SQLite journal mode: {}", journal_mode);

        conn.execute(
            "CREATE TABLE IF NOT EXISTS delivery_averages (
                date TEXT PRIMARY KEY,
                average_delivery_time REAL NOT NULL,
                samples INTEGER NOT NULL,
                window_minutes INTEGER NOT NULL
            )",
            [],
        )?;

        log::info!("✅ SQLite aggregate writer initialized with WAL mode");

        Ok(Self {
            conn,
            window,
            batch: Vec::with_capacity(500),
            batch_size: 500,
        })
    }

    fn flush_batch(&mut self) -> Result<(), WriterError> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;

        for record in &self.batch {
            tx.execute(
                "INSERT INTO delivery_averages (date, average_delivery_time, samples, window_minutes)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(date) DO UPDATE SET
                    average_delivery_time = excluded.average_delivery_time,
                    samples = excluded.samples,
                    window_minutes = excluded.window_minutes",
                params![
                    record.date,
                    record.average_delivery_time,
                    record.samples as i64,
                    self.window.minutes(),
                ],
            )?;
        }

        tx.commit()?;

        log::debug!("✅ Flushed {} aggregates to SQLite", self.batch.len());
        self.batch.clear();

        Ok(())
    }
}

impl Drop for SqliteAggregateWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush_batch() {
            log::warn!("Failed to flush pending aggregates: {}", e);
        }
    }
}

#[async_trait]
impl AggregateWriterBackend for SqliteAggregateWriter {
    async fn write_record(&mut self, record: &AggregateRecord) -> Result<(), WriterError> {
        self.batch.push(record.clone());
        if self.batch.len() >= self.batch_size {
            self.flush_batch()?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), WriterError> {
        self.flush_batch()
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}
