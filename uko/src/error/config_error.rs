//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These errors occur while building a client, typically from missing or
/// malformed environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field (usually an environment variable).
        field: String,
    },

    /// The configured authentication type is not supported.
    #[error("Unknown authentication type: {value}")]
    UnknownAuthType {
        /// The value that was supplied.
        value: String,
    },

    /// A numeric or boolean setting could not be parsed.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The name of the setting.
        field: String,
        /// The value that was supplied.
        value: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
