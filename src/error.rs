use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Failed to open catalogue {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read catalogue: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid version range: start {start}.0 is after end {end}.0")]
    Inverted { start: u32, end: u32 },

    #[error("Malformed version label: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Analysis interrupted by user")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The {format} renderer does not support the {report} report")]
    Unsupported { report: String, format: &'static str },
}
