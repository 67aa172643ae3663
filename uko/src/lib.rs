//! Typed client for the key orchestration REST API.
//!
//! The crate covers vaults, keystores, managed keys, key templates and
//! associated resources under `/api/v4`.
//!
//! ## Core Types
//!
//! - [`UkoClient`] - Entry point; every endpoint is an async method on it
//! - [`ClientConfig`] - Base URL, credentials, timeouts and retry policy
//! - [`Pager`] - Walks any list endpoint page by page using its `next` links
//! - [`UkoError`] - Error returned by every operation
//!
//! ## Polymorphic Resources
//!
//! Keystores, keystore requests and key instances come in vendor-specific
//! shapes selected by a discriminator field. [`decode::Decode`] resolves
//! the variant from the raw JSON and reports missing or unknown tags as
//! [`DecodeError`] values carrying the full field path.
//!
//! ## Examples
//!
//! ```no_run
//! use uko::ops::ListManagedKeysOptions;
//! use uko::model::ManagedKeyState;
//! use uko::{Authenticator, ClientConfig, UkoClient};
//!
//! # async fn run() -> Result<(), uko::UkoError> {
//! let config = ClientConfig::parse("https://uko.example.com")?
//!     .with_auth(Authenticator::bearer("token"));
//! let client = UkoClient::new(config)?;
//!
//! let options = ListManagedKeysOptions::default()
//!     .with_state(ManagedKeyState::Active)
//!     .with_limit(100);
//! let mut pager = client.managed_keys_pager(&options)?;
//! let keys = pager.get_all().await.map_err(|partial| partial.error)?;
//! println!("{} active keys", keys.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod method;
pub mod model;
pub mod ops;
pub mod pager;

pub use auth::Authenticator;
pub use client::UkoClient;
pub use config::ClientConfig;
pub use error::{
    AuthError, ClientError, ConfigError, DecodeError, IncompletePages, PagerError, UkoError,
    ValidationError,
};
pub use method::RestMethod;
pub use pager::{ListOperation, ListOptions, Pager, Paginated};
