//! JSONL writer for minute aggregates - one `{"date", "average_delivery_time"}` object per line

use super::window::AggregateRecord;
use super::writer_backend::{AggregateWriterBackend, WriterError};
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct JsonlAggregateWriter {
    file: BufWriter<File>,
    path: PathBuf,
    records_written: usize,
}

impl JsonlAggregateWriter {
    /// Create (or truncate) the output file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, WriterError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        log::info!("📝 Writing moving averages to: {}", path.display());

        Ok(Self {
            file: BufWriter::new(file),
            path: path.to_path_buf(),
            records_written: 0,
        })
    }

    pub fn write_record(&mut self, record: &AggregateRecord) -> Result<(), WriterError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.file, "{}", json)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), WriterError> {
        self.file.flush()?;
        log::debug!("Flushed {} records to {}", self.records_written, self.path.display());
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

impl Drop for JsonlAggregateWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}

#[async_trait]
impl AggregateWriterBackend for JsonlAggregateWriter {
    async fn write_record(&mut self, record: &AggregateRecord) -> Result<(), WriterError> {
        JsonlAggregateWriter::write_record(self, record)
    }

    async fn flush(&mut self) -> Result<(), WriterError> {
        JsonlAggregateWriter::flush(self)
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
