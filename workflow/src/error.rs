//! Error types for the upload workflow.
//!
//! - [`TransportError`] - everything that can go wrong once a request is issued
//! - [`UploadError`] - what a submission attempt reports to its caller
//! - [`ConfigError`] - unusable configuration values
//!
//! The user never sees these directly: every [`UploadError::TransportFailed`]
//! collapses to the fixed failure banner of the active mode. The cause is kept
//! here so it can be logged.

use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Failures raised by a [`crate::Transport`] implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The request could not be built (form data, headers, URL).
    #[error("Failed to build request: {0}")]
    Request(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered outside the 2xx range.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No response within the configured ceiling.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// A local file could not be read.
    #[error("Failed to read file: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::MalformedResponse(err.to_string())
    }
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Outcome of a rejected or failed submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    /// Submit was attempted without the files the current mode requires.
    /// The UI disables the action instead of reporting this.
    #[error("Required files are missing for this upload mode")]
    ValidationBlocked,

    /// The transport failed; the user only sees the generic banner.
    #[error("Transport failed: {0}")]
    TransportFailed(#[from] TransportError),

    /// A newer submission or a mode change replaced this one before it settled.
    #[error("Submission was superseded")]
    Superseded,
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for submission attempts.
pub type UploadResult<T> = Result<T, UploadError>;
