//! Authentication errors.

use thiserror::Error;

/// Errors related to applying credentials to outgoing requests.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured authenticator has no credential to send.
    #[error("Missing credential: {what}")]
    MissingCredential {
        /// Which credential is missing (e.g. "bearer token").
        what: &'static str,
    },

    /// A header name or value derived from the credentials is not valid HTTP.
    #[error("Invalid authentication header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display() {
        let err = AuthError::MissingCredential {
            what: "bearer token",
        };
        assert_eq!(err.to_string(), "Missing credential: bearer token");
    }

    #[test]
    fn test_invalid_header_display() {
        let err = AuthError::InvalidHeader {
            message: "invalid header name".to_string(),
        };
        assert!(err.to_string().contains("invalid header name"));
    }
}
