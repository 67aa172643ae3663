//! Layered error types for the key orchestration client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`UkoError`] - Top-level error type for every client operation
//! - [`ClientError`] - HTTP transport and non-success status errors
//! - [`DecodeError`] - Response decoding failures (discriminators, fields)
//! - [`PagerError`] - Pagination misuse and malformed `next` links
//! - [`ValidationError`] - Client-side request validation failures
//! - [`AuthError`] - Credential injection failures
//! - [`ConfigError`] - Client configuration errors

mod auth_error;
mod client_error;
mod config_error;
mod decode_error;
mod pager_error;
mod uko_error;
mod validation_error;

pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use pager_error::{IncompletePages, PagerError};
pub use uko_error::UkoError;
pub use validation_error::ValidationError;

pub(crate) use validation_error::{require_non_empty, require_present};
