//! Configuration errors. The tick path itself has no error type.

use thiserror::Error;

/// Failure while loading or checking a vehicle description.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field holds a value the stepper cannot use.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name.
        field: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
