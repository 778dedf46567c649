//! Error types for cnb-fx

use thiserror::Error;

/// Main error type for cnb-fx
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Malformed header field: {0:?}")]
    MalformedHeader(String),

    #[error("Invalid rate value: {0:?}")]
    InvalidRate(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Insufficient data for {code}: {reason}")]
    InsufficientData { code: String, reason: String },

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FxError {
    /// Shorthand for the per-currency statistics failure
    pub fn insufficient(code: &str, reason: &str) -> Self {
        FxError::InsufficientData {
            code: code.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for cnb-fx operations
pub type Result<T> = std::result::Result<T, FxError>;
