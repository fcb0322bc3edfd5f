//! Output configuration from environment variables

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendType {
    Jsonl,
    Sqlite,
}

impl BackendType {
    /// Environment variable naming the output location for this backend
    pub fn path_variable(&self) -> &'static str {
        match self {
            BackendType::Jsonl => "DELIVERY_OUTPUT_PATH",
            BackendType::Sqlite => "DELIVERY_DB_PATH",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            BackendType::Jsonl => "output_file.json",
            BackendType::Sqlite => "data/delivery_averages.db",
        }
    }
}

/// Where and how minute aggregates are persisted
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub backend: BackendType,
    pub output_path: PathBuf,
}

impl OutputConfig {
    /// Load the output path for `backend` from the environment
    ///
    /// Environment variables:
    /// - `DELIVERY_OUTPUT_PATH` (JSONL, default: output_file.json)
    /// - `DELIVERY_DB_PATH` (SQLite, default: data/delivery_averages.db)
    pub fn from_env(backend: BackendType) -> Self {
        let output_path = env::var(backend.path_variable())
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| backend.default_path().to_string());

        Self {
            backend,
            output_path: output_path.into(),
        }
    }

    /// An explicit path wins over the environment
    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.output_path = path;
        }
        self
    }
}
