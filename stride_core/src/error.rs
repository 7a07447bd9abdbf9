//! Error types for the stride_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stride_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Record did not split into the expected number of fields
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Step field unparseable or not positive
    #[error("Invalid step count: {0}")]
    InvalidStepCount(String),

    /// Duration field unparseable or not positive
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Weight or height not positive
    #[error("Invalid body metrics: {0}")]
    InvalidBodyMetrics(String),

    /// Activity label outside the recognized set
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
