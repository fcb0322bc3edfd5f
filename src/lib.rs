
pub mod aggregator_core;
pub mod config;
pub mod error;
pub mod pipeline;

pub use error::{DeliveryError, Result, SchemaViolation};
pub use pipeline::{compute_moving_averages, compute_moving_averages_from_path};
