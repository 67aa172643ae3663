//! Client configuration.
//!
//! A [`ClientConfig`] is either built in code or read from environment
//! variables prefixed with a service name (`UKO` by default):
//!
//! | Variable | Meaning |
//! |---|---|
//! | `UKO_URL` | Base URL of the service (required) |
//! | `UKO_AUTH_TYPE` | `bearertoken`, `apikey` or `noauth` |
//! | `UKO_BEARER_TOKEN` | Token for bearer authentication |
//! | `UKO_APIKEY` | Key for API key authentication |
//! | `UKO_APIKEY_HEADER` | Header carrying the API key (default `X-API-Key`) |
//! | `UKO_MAX_RETRIES` | Transport retry budget (default `0`) |
//! | `UKO_TIMEOUT_SECS` | Per-request timeout (default `30`) |
//! | `UKO_DISABLE_GZIP` | `true` to turn off response compression |

use std::time::Duration;

use url::Url;

use crate::auth::{Authenticator, DEFAULT_API_KEY_HEADER};
use crate::error::ConfigError;

/// Default prefix for configuration environment variables.
pub const DEFAULT_SERVICE_NAME: &str = "UKO";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default delay before the first transport retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Settings for a [`UkoClient`](crate::UkoClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,
    /// Credentials applied to every request.
    pub auth: Authenticator,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Extra attempts the transport may make for retryable failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt.
    pub retry_delay: Duration,
    /// Whether to request gzip-compressed responses.
    pub gzip: bool,
    /// Headers added to every request.
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Creates a configuration with default settings and no authentication.
    ///
    /// ## Errors
    ///
    /// Returns an error if `base_url` cannot carry path segments
    /// (e.g. `mailto:` URLs).
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            base_url,
            auth: Authenticator::None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            gzip: true,
            default_headers: Vec::new(),
        })
    }

    /// Parses `base_url` and creates a default configuration.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(Url::parse(base_url)?)
    }

    /// Sets the authenticator.
    pub fn with_auth(mut self, auth: Authenticator) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the transport retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Enables or disables gzip response compression.
    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Reads the configuration from `UKO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_for(DEFAULT_SERVICE_NAME)
    }

    /// Reads the configuration from `<SERVICE_NAME>_*` environment variables.
    pub fn from_env_for(service_name: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use uko::ClientConfig;
    ///
    /// let vars = HashMap::from([
    ///     ("UKO_URL", "https://uko.example.com"),
    ///     ("UKO_BEARER_TOKEN", "token"),
    /// ]);
    /// let config = ClientConfig::from_lookup("UKO", |key| vars.get(key).map(|v| v.to_string()))?;
    /// assert_eq!(config.auth.scheme(), "bearertoken");
    /// # Ok::<(), uko::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let var = |suffix: &str| -> (String, Option<String>) {
            let key = format!("{prefix}_{suffix}");
            let value = lookup(&key).filter(|v| !v.trim().is_empty());
            (key, value)
        };

        let (url_key, url) = var("URL");
        let url = url.ok_or_else(|| ConfigError::missing_field(url_key))?;
        let mut config = Self::parse(url.trim())?;

        config.auth = read_authenticator(&var)?;

        if let (key, Some(value)) = var("MAX_RETRIES") {
            config.max_retries = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { field: key, value })?;
        }

        if let (key, Some(value)) = var("TIMEOUT_SECS") {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { field: key, value })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let (key, Some(value)) = var("DISABLE_GZIP") {
            let disabled: bool = value
                .trim()
                .to_lowercase()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { field: key, value })?;
            config.gzip = !disabled;
        }

        Ok(config)
    }
}

fn read_authenticator<F>(var: &F) -> Result<Authenticator, ConfigError>
where
    F: Fn(&str) -> (String, Option<String>),
{
    let (_, auth_type) = var("AUTH_TYPE");
    let (token_key, token) = var("BEARER_TOKEN");
    let (key_key, api_key) = var("APIKEY");
    let header = var("APIKEY_HEADER")
        .1
        .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string());

    let auth_type = match auth_type {
        Some(value) => value.trim().to_lowercase().replace(['_', '-'], ""),
        // Infer the scheme from whichever credential is present.
        None if token.is_some() => "bearertoken".to_string(),
        None if api_key.is_some() => "apikey".to_string(),
        None => "noauth".to_string(),
    };

    match auth_type.as_str() {
        "bearertoken" | "bearer" => token
            .map(Authenticator::BearerToken)
            .ok_or_else(|| ConfigError::missing_field(token_key)),
        "apikey" => api_key
            .map(|key| Authenticator::ApiKey { header, key })
            .ok_or_else(|| ConfigError::missing_field(key_key)),
        "noauth" | "none" => Ok(Authenticator::None),
        _ => Err(ConfigError::UnknownAuthType { value: auth_type }),
    }
}
