//! Responses and decode helpers.

use bytes::Bytes;
use reqwest::header::{ETAG, HeaderMap};
use serde::de::DeserializeOwned;

use crate::decode::Decode;
use crate::error::DecodeError;

/// A successful response before decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Decodes the body as a read model.
    pub fn decode<T: Decode>(&self) -> Result<T, DecodeError> {
        T::from_slice(&self.body)
    }

    /// Decodes the body with plain serde.
    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub(crate) fn into_response<T: Decode>(self) -> Result<Response<T>, DecodeError> {
        let result = self.decode()?;
        Ok(Response {
            status: self.status,
            headers: self.headers,
            result,
        })
    }

    pub(crate) fn into_empty(self) -> Response<()> {
        Response {
            status: self.status,
            headers: self.headers,
            result: (),
        }
    }
}

/// A decoded response with its status and headers.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: u16,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> Response<T> {
    /// Returns the `ETag` header, needed as `If-Match` for updates.
    pub fn etag(&self) -> Option<&str> {
        self.header(ETAG.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn into_result(self) -> T {
        self.result
    }
}
