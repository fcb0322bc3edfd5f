//! Error taxonomy for the delivery-average pipeline
//!
//! Every variant is fatal: the pipeline stops at the first error and the
//! binary turns it into a message and a non-zero exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a raw record does not match the translation event schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("Field \"{0}\" is not expected in the translation data. Please correct input.")]
    UnexpectedField(String),
    #[error("Field \"{0}\" is missing in the translation data. Please correct the input.")]
    MissingField(String),
    #[error("Type of the field \"{field}\" is not the expected one: received \"{received}\", expected \"{expected}\".")]
    WrongType {
        field: String,
        received: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
    #[error("Timestamp field must be in this format: Year-Month-Day Hours:Minutes:Seconds.Microseconds. Correct the file. (got \"{0}\")")]
    TimestampFormat(String),
    #[error("File \"{}\" not found. Insert an existing one.", .0.display())]
    FileNotFound(PathBuf),
    #[error("File must be ordered from the oldest translation to the most recent, please correct the input file.")]
    OrderingViolation,
    #[error("Window size value must be greater than 0.")]
    InvalidWindowSize(i64),
    #[error("No translation events found in the input.")]
    EmptyInput,
    #[error("Line {line} is not a valid JSON object: {details}")]
    MalformedRecord { line: usize, details: String },
    /// Only reachable if [`validate_record`](crate::aggregator_core::validate_record)
    /// and the event decoder disagree on the schema; validated records always decode.
    #[error("translation record could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
