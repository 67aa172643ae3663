//! HTTP method types for the REST endpoints.

use strum::{Display, EnumString};

/// HTTP methods used by the key orchestration endpoints.
///
/// ## Examples
///
/// ```rust
/// use uko::RestMethod;
///
/// let method = RestMethod::Get;
/// assert!(method.is_idempotent());
///
/// // Parse from string
/// let parsed: RestMethod = "PATCH".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Patch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if this method is idempotent.
    ///
    /// The transport only replays idempotent requests after a server error;
    /// POST and PATCH are retried solely on rate limiting.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
