//! HTTP transport and status errors.

use thiserror::Error;

use crate::model::ErrorEnvelope;

/// Errors from the HTTP transport layer.
///
/// These errors represent network-level failures, HTTP status errors,
/// and connection issues that occur during request execution. The core
/// never retries them; only the transport's own retry policy does.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// First error message from the envelope, or the raw response text.
        message: String,
        /// The decoded error envelope, when the body carried one.
        body: Option<ErrorEnvelope>,
    },

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Body(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns `true` if this error is retryable.
    ///
    /// Timeout and connection errors are typically retryable,
    /// while HTTP status errors depend on the status code.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::HttpStatus { status, .. } => {
                // 5xx errors and 429 (rate limit) are retryable
                *status >= 500 || *status == 429
            }
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Body(_) => false,
        }
    }

    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the server's error envelope, if one was decoded.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::HttpStatus { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}
