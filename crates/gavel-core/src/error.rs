//! Error types for gavel.

use thiserror::Error;

/// Result type alias using gavel's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gavel operations.
///
/// The engine never retries internally; every variant is surfaced to the
/// caller exactly once. Transport layers map variants to status codes
/// (`Validation` → 4xx, `Timeout` → 504, everything else → 5xx).
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed validation (empty query/response, malformed payload)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scoring exceeded the configured deadline
    #[error("Scoring timed out after {budget_ms}ms")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        budget_ms: u64,
    },

    /// Unexpected failure inside a scorer
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
