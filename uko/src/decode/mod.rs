//! Field-by-field JSON decoding for read models and variant families.
//!
//! Every read model implements [`Decode`], turning a raw JSON object into a
//! typed value one field at a time through [`Fields`]. A failing field aborts
//! the whole object and reports its path, so callers never receive a
//! half-populated model.
//!
//! Variant families (keystores, keystore requests, key instances) decode by
//! reading a discriminator with [`Fields::discriminator`] and dispatching to
//! the matching variant decoder. Unknown or missing tags are errors; no
//! family ever falls back to a default variant.

mod fields;

pub use fields::Fields;

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// A type that can be decoded from a JSON object.
pub trait Decode: Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Decodes `object` into `Self`.
    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError>;

    /// Decodes any JSON value, failing unless it is an object.
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(object) => Self::decode(object),
            other => Err(DecodeError::NotAnObject {
                family: Self::NAME,
                found: kind_of(other),
            }),
        }
    }

    /// Parses and decodes a raw response body.
    fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::decode_value(&value)
    }
}

/// Returns a human readable name for the kind of a JSON value.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
