//! Top-level client error type.

use super::{AuthError, ClientError, ConfigError, DecodeError, PagerError, ValidationError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use uko::error::UkoError;
///
/// fn handle_error(err: UkoError) {
///     match err {
///         UkoError::Client(e) => eprintln!("Transport error: {e}"),
///         UkoError::Decode(e) => eprintln!("Unexpected response shape: {e}"),
///         UkoError::Pager(e) => eprintln!("Pagination failed: {e}"),
///         UkoError::Validation(e) => eprintln!("Invalid request: {e}"),
///         UkoError::Auth(e) => eprintln!("Auth failed: {e}"),
///         UkoError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum UkoError {
    /// HTTP transport errors (network, timeout, non-success status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response decoding errors (discriminator or field failures).
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Pager misuse or unusable pagination links.
    #[error(transparent)]
    Pager(#[from] PagerError),

    /// Request options failed client-side validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credentials could not be applied to a request.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl UkoError {
    /// Returns the HTTP status code when the server rejected the request.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::Timeout { duration_ms: 5000 };
        let err: UkoError = client_err.into();
        assert!(matches!(err, UkoError::Client(_)));
    }

    #[test]
    fn test_from_pager_error() {
        let err: UkoError = PagerError::NoMoreResults.into();
        assert!(matches!(err, UkoError::Pager(PagerError::NoMoreResults)));
    }

    #[test]
    fn test_status_code_passthrough() {
        let err: UkoError = ClientError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
            body: None,
        }
        .into();
        assert_eq!(err.status_code(), Some(404));

        let err: UkoError = ValidationError::missing_field("id").into();
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = UkoError::Decode(DecodeError::UnrecognizedVariant {
            family: "Keystore",
            field: "type".to_string(),
            value: "not_a_real_vendor".to_string(),
        });
        assert!(err.to_string().contains("not_a_real_vendor"));
    }
}
