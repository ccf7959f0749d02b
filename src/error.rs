//! Error types for the Prashna library.
//!
//! All fallible operations return [`Result`], with [`PrashnaError`] carrying
//! the failure category. Recoverable conditions (malformed filter input, a
//! too-short suggestion query, a missing question) are *not* errors; they
//! degrade to "no filter", an empty list, or `None` respectively.

use std::io;

use thiserror::Error;

/// The main error type for Prashna operations.
#[derive(Error, Debug)]
pub enum PrashnaError {
    /// I/O errors (reading question files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Embedding provider failures.
    ///
    /// These propagate as hard failures of the calling operation: a
    /// degraded or zero vector would silently corrupt ranking, so the
    /// provider error is never swallowed into a fallback vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Store-related errors (duplicate keys, dimension mismatches).
    #[error("Store error: {0}")]
    Store(String),

    /// Query-related errors.
    #[error("Query error: {0}")]
    Query(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`PrashnaError`].
pub type Result<T> = std::result::Result<T, PrashnaError>;

impl PrashnaError {
    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        PrashnaError::Embedding(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        PrashnaError::Store(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        PrashnaError::Query(msg.into())
    }

    /// Create a new duplicate-key store error.
    pub fn duplicate<S: Into<String>>(external_id: S) -> Self {
        PrashnaError::Store(format!(
            "question with external id '{}' already exists",
            external_id.into()
        ))
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PrashnaError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PrashnaError::Other(msg.into())
    }
}
