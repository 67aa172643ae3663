//! Request authentication.
//!
//! The [`Authenticator`] injects credentials into every outgoing request.
//! Credentials are held in memory only and never appear in `Debug` output.

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::AuthError;

/// Default header used for API key authentication.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// How credentials are applied to outgoing requests.
///
/// ## Examples
///
/// ```rust
/// use uko::Authenticator;
///
/// let bearer = Authenticator::bearer("eyJhbGciOi...");
/// let api_key = Authenticator::api_key("X-API-Key", "secret");
/// assert!(!format!("{bearer:?}").contains("eyJ"));
/// assert!(!format!("{api_key:?}").contains("secret"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Authenticator {
    /// Send no credentials.
    #[default]
    None,

    /// `Authorization: Bearer <token>`.
    BearerToken(String),

    /// `<header>: <key>`.
    ApiKey {
        /// Header name carrying the key.
        header: String,
        /// The API key.
        key: String,
    },
}

impl Authenticator {
    /// Creates a bearer token authenticator.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// Creates an API key authenticator sending the key in `header`.
    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            key: key.into(),
        }
    }

    /// Returns a short name for the authentication scheme.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::None => "noauth",
            Self::BearerToken(_) => "bearertoken",
            Self::ApiKey { .. } => "apikey",
        }
    }

    /// Applies the credentials to a request builder.
    ///
    /// ## Errors
    ///
    /// Returns an error if a credential is empty or cannot be expressed as
    /// an HTTP header.
    pub fn authenticate(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, AuthError> {
        match self {
            Self::None => Ok(request),
            Self::BearerToken(token) => {
                if token.is_empty() {
                    return Err(AuthError::MissingCredential {
                        what: "bearer token",
                    });
                }
                Ok(request.bearer_auth(token))
            }
            Self::ApiKey { header, key } => {
                if key.is_empty() {
                    return Err(AuthError::MissingCredential { what: "API key" });
                }
                let name = HeaderName::try_from(header.as_str()).map_err(|e| {
                    AuthError::InvalidHeader {
                        message: format!("invalid header name '{header}': {e}"),
                    }
                })?;
                let mut value = HeaderValue::try_from(key.as_str()).map_err(|e| {
                    AuthError::InvalidHeader {
                        message: format!("invalid API key value: {e}"),
                    }
                })?;
                value.set_sensitive(true);
                Ok(request.header(name, value))
            }
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::BearerToken(_) => f.debug_tuple("BearerToken").field(&"<redacted>").finish(),
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}
