//! Error types for the launch search page.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Launch API errors - rendered as a failed search, logged with their cause.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The API did not answer in time.
    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Parse error.
    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}
