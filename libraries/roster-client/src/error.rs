//! Error types for the Roster client.

use thiserror::Error;

/// Errors that can occur when talking to the Roster API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before any request was issued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type for Roster client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
