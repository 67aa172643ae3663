//! Request assembly.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::method::RestMethod;

/// A fully assembled request, independent of any HTTP client.
///
/// Path segments are percent-encoded when the URL is built, so identifiers
/// can be passed through verbatim.
///
/// ## Examples
///
/// ```rust
/// use uko::RestMethod;
/// use uko::client::PreparedRequest;
/// use url::Url;
///
/// let request = PreparedRequest::new(RestMethod::Get)
///     .segment("api")
///     .segment("v4")
///     .segment("vaults")
///     .query("limit", 10);
/// let base = Url::parse("https://uko.example.com").unwrap();
/// assert_eq!(
///     request.url(&base).unwrap().as_str(),
///     "https://uko.example.com/api/v4/vaults?limit=10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    method: RestMethod,
    path: Vec<String>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl PreparedRequest {
    pub fn new(method: RestMethod) -> Self {
        Self {
            method,
            path: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends one path segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a query parameter when `value` is set.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Adds a header when `value` is set.
    pub fn header_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Sets a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Body)?);
        Ok(self)
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Builds the absolute URL below `base`.
    pub fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Connection(format!("base URL cannot carry a path: {base}")))?
            .pop_if_empty()
            .extend(&self.path);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}
