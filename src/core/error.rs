//! Custom error types for landrecords
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for land-record searches
#[derive(Error, Debug)]
pub enum LandRecordsError {
    /// Caller supplied criteria or settings that break a contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Results markup could not be parsed at all
    #[error("Markup parse error: {0}")]
    MarkupParse(String),

    /// Remote executor rejected the request or returned an unusable payload
    #[error("Executor error: {0}")]
    Executor(String),

    /// A search was requested without an executor endpoint
    #[error("No executor endpoint configured. Set LANDRECORDS_EXECUTOR_URL or pass --endpoint")]
    ExecutorNotConfigured,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for land-record operations
pub type Result<T> = std::result::Result<T, LandRecordsError>;

impl LandRecordsError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a markup parse error
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::MarkupParse(msg.into())
    }

    /// Create an executor error
    pub fn executor(msg: impl Into<String>) -> Self {
        Self::Executor(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether callers should treat this error as "no records" rather than a failure
    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::MarkupParse(_))
    }
}
