//! The client entry point.
//!
//! This module provides [`UkoClient`], which owns the transport and exposes
//! every endpoint operation as an async method (see [`crate::ops`]).

use url::Url;

use super::request::PreparedRequest;
use super::response::Response;
use super::transport::HttpTransport;
use crate::config::ClientConfig;
use crate::decode::Decode;
use crate::error::UkoError;

/// Async client for the key orchestration API.
///
/// ## Examples
///
/// ```rust,no_run
/// use uko::{Authenticator, ClientConfig, UkoClient};
/// use uko::ops::ListVaultsOptions;
///
/// # async fn run() -> Result<(), uko::UkoError> {
/// let config = ClientConfig::parse("https://uko.example.com")?
///     .with_auth(Authenticator::bearer("token"));
/// let client = UkoClient::new(config)?;
///
/// let vaults = client.list_vaults(&ListVaultsOptions::default()).await?;
/// for vault in vaults.result.vaults {
///     println!("{} {}", vault.id, vault.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UkoClient {
    transport: HttpTransport,
}

impl UkoClient {
    /// Creates a client from an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, UkoError> {
        Ok(Self {
            transport: HttpTransport::new(&config)?,
        })
    }

    /// Creates a client configured from `UKO_*` environment variables.
    pub fn from_env() -> Result<Self, UkoError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Executes a request and decodes the body into `T`.
    pub(crate) async fn send<T: Decode>(
        &self,
        request: PreparedRequest,
    ) -> Result<Response<T>, UkoError> {
        let raw = self.transport.execute(&request).await?;
        Ok(raw.into_response()?)
    }

    /// Executes a request whose response carries no body of interest.
    pub(crate) async fn send_empty(
        &self,
        request: PreparedRequest,
    ) -> Result<Response<()>, UkoError> {
        let raw = self.transport.execute(&request).await?;
        Ok(raw.into_empty())
    }
}
