//! HTTP transport with authentication, retries and tracing.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::{Span, debug, instrument, warn};
use url::Url;

use super::request::PreparedRequest;
use super::response::RawResponse;
use super::retry::{Backoff, should_retry};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError, UkoError};
use crate::model::ErrorEnvelope;

const USER_AGENT: &str = concat!("uko-rust/", env!("CARGO_PKG_VERSION"));

/// Executes [`PreparedRequest`]s against the configured service.
///
/// Non-2xx responses become [`ClientError::HttpStatus`] carrying the decoded
/// [`ErrorEnvelope`] when the body has one. Retryable failures are replayed
/// up to `max_retries` times with exponential backoff; nothing above the
/// transport retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    auth: Authenticator,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpTransport {
    /// Builds the transport and its connection pool.
    ///
    /// ## Errors
    ///
    /// Returns an error if a default header is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.default_headers {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|_| ConfigError::InvalidValue {
                    field: "default header name".to_string(),
                    value: name.clone(),
                })?;
            let header_value =
                HeaderValue::try_from(value.as_str()).map_err(|_| ConfigError::InvalidValue {
                    field: format!("header {name}"),
                    value: value.clone(),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .gzip(config.gzip)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth: config.auth.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Executes one logical request, retrying transient failures.
    ///
    /// ## Errors
    ///
    /// - [`UkoError::Auth`] if credentials cannot be applied.
    /// - [`UkoError::Client`] for network failures and non-2xx responses,
    ///   once the retry budget is spent.
    pub async fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, UkoError> {
        let url = request.url(&self.base_url)?;
        let mut backoff = Backoff::new(self.retry_delay);
        let mut attempt = 0;

        loop {
            match self.send_once(request, &url).await {
                Err(UkoError::Client(error))
                    if attempt < self.max_retries && should_retry(&error, request.method()) =>
                {
                    attempt += 1;
                    let delay = backoff.next_delay();
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying {} {}",
                        request.method(),
                        url.path()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    #[instrument(
        name = "uko_request",
        skip(self, request, url),
        fields(
            http.method = %request.method(),
            http.url = %url,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send_once(
        &self,
        request: &PreparedRequest,
        url: &Url,
    ) -> Result<RawResponse, UkoError> {
        let mut builder = self
            .client
            .request(request.method().to_reqwest(), url.clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        builder = self.auth.authenticate(builder)?;

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            let envelope = match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => Some(envelope),
                Err(error) => {
                    debug!(
                        status = status.as_u16(),
                        error = %error,
                        "response body is not an error envelope"
                    );
                    None
                }
            };
            let message = envelope
                .as_ref()
                .and_then(ErrorEnvelope::first_message)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    let text = String::from_utf8_lossy(&body);
                    if text.trim().is_empty() {
                        status.to_string()
                    } else {
                        text.into_owned()
                    }
                });

            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
                body: envelope,
            }
            .into());
        }

        Span::current().record("otel.status_code", "OK");
        Ok(RawResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            ClientError::Connection(error.to_string())
        } else {
            ClientError::Request(error)
        }
    }
}
