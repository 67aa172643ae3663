//! HTTP client runtime.
//!
//! - [`PreparedRequest`] - One logical request: method, path, query, headers, body
//! - [`HttpTransport`] - Executes requests with auth, retries and tracing
//! - [`RawResponse`] / [`Response`] - Status, headers and the decoded result
//! - [`UkoClient`] - Entry point exposing every endpoint operation

mod executor;
mod request;
mod response;
mod retry;
mod transport;

pub use executor::UkoClient;
pub use request::PreparedRequest;
pub use response::{RawResponse, Response};
pub use transport::HttpTransport;
