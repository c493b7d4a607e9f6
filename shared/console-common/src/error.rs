//! Shared Error Types

use thiserror::Error;

/// Errors raised while talking to the hosted backend.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend request failed or timed out.
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// The backend returned a record that could not be interpreted.
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using the shared [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
