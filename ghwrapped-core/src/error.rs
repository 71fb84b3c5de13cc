//! Error types for ghwrapped-core

use thiserror::Error;

/// Main error type for the ghwrapped-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A dataset the computation cannot run without is absent
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Input that is present but malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No stored wrapped record for the requested user and year
    #[error("wrapped not found for {username} ({year})")]
    WrappedNotFound { username: String, year: i32 },
}

/// Result type alias for ghwrapped-core
pub type Result<T> = std::result::Result<T, Error>;
