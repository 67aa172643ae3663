//! Typed access to the fields of a JSON object.

use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

use super::{Decode, kind_of};
use crate::error::DecodeError;

/// Read-only view over a JSON object handing out typed fields.
///
/// Absent fields and explicit `null`s are both treated as "not set".
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Wraps a JSON object.
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self { object }
    }

    /// Returns the underlying object.
    pub fn object(&self) -> &'a Map<String, Value> {
        self.object
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name).filter(|value| !value.is_null())
    }

    /// Decodes an optional field with serde.
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, DecodeError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| DecodeError::Field {
                    field: name.to_string(),
                    source,
                }),
        }
    }

    /// Decodes a required field with serde.
    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, DecodeError> {
        self.optional(name)?
            .ok_or_else(|| DecodeError::missing_field(name))
    }

    /// Decodes an optional array field, yielding an empty list when absent.
    pub fn list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, DecodeError> {
        Ok(self.optional(name)?.unwrap_or_default())
    }

    /// Decodes an optional nested model.
    pub fn optional_model<T: Decode>(&self, name: &str) -> Result<Option<T>, DecodeError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => T::decode_value(value)
                .map(Some)
                .map_err(|e| e.within(name)),
        }
    }

    /// Decodes a required nested model.
    pub fn required_model<T: Decode>(&self, name: &str) -> Result<T, DecodeError> {
        self.optional_model(name)?
            .ok_or_else(|| DecodeError::missing_field(name))
    }

    /// Decodes an array of nested models, yielding an empty list when absent.
    ///
    /// A failing element reports its index, e.g. `instances[2].label`.
    pub fn model_list<T: Decode>(&self, name: &str) -> Result<Vec<T>, DecodeError> {
        match self.get(name) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    T::decode_value(item).map_err(|e| e.within(&format!("[{index}]")).within(name))
                })
                .collect(),
            Some(other) => Err(DecodeError::Field {
                field: name.to_string(),
                source: serde_json::Error::custom(format!(
                    "expected an array, found {}",
                    kind_of(other)
                )),
            }),
        }
    }

    /// Reads the discriminator at `path` (dot-separated for nested objects).
    ///
    /// ## Errors
    ///
    /// - [`DecodeError::MissingDiscriminator`] when the field is absent,
    ///   `null` or an empty string.
    /// - [`DecodeError::Field`] when the field is not a string.
    pub fn discriminator(&self, family: &'static str, path: &str) -> Result<&'a str, DecodeError> {
        let mut segments = path.split('.');
        let mut current = segments.next().and_then(|first| self.get(first));
        for segment in segments {
            current = current
                .and_then(Value::as_object)
                .and_then(|object| object.get(segment))
                .filter(|value| !value.is_null());
        }

        match current {
            None => Err(DecodeError::MissingDiscriminator {
                family,
                field: path.to_string(),
            }),
            Some(Value::String(tag)) if tag.is_empty() => Err(DecodeError::MissingDiscriminator {
                family,
                field: path.to_string(),
            }),
            Some(Value::String(tag)) => Ok(tag.as_str()),
            Some(other) => Err(DecodeError::Field {
                field: path.to_string(),
                source: serde_json::Error::custom(format!(
                    "expected a string discriminator, found {}",
                    kind_of(other)
                )),
            }),
        }
    }

    /// Reads the discriminator at `path` and parses it into a closed tag set.
    ///
    /// Fails with [`DecodeError::UnrecognizedVariant`] when the value is not
    /// a member of `K`.
    pub fn tag<K: FromStr>(&self, family: &'static str, path: &str) -> Result<K, DecodeError> {
        let tag = self.discriminator(family, path)?;
        tag.parse().map_err(|_| DecodeError::UnrecognizedVariant {
            family,
            field: path.to_string(),
            value: tag.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[derive(Debug)]
    struct Named {
        name: String,
    }

    impl Decode for Named {
        const NAME: &'static str = "Named";

        fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
            Ok(Self {
                name: Fields::new(object).required("name")?,
            })
        }
    }

    #[test]
    fn test_null_is_absent() {
        let obj = object(json!({"description": null}));
        let fields = Fields::new(&obj);
        assert_eq!(fields.optional::<String>("description").unwrap(), None);
        assert!(fields.required::<String>("description").is_err());
    }

    #[test]
    fn test_field_error_names_field() {
        let obj = object(json!({"created_at": "yesterday"}));
        let err = Fields::new(&obj)
            .optional::<DateTime<Utc>>("created_at")
            .unwrap_err();
        assert_eq!(err.field(), Some("created_at"));
        assert!(matches!(err, DecodeError::Field { .. }));
    }

    #[test]
    fn test_model_list_reports_index() {
        let obj = object(json!({"items": [{"name": "a"}, {"name": 7}]}));
        let err = Fields::new(&obj).model_list::<Named>("items").unwrap_err();
        assert_eq!(err.field(), Some("items[1].name"));
    }

    #[test]
    fn test_model_list_rejects_non_array() {
        let obj = object(json!({"items": {"name": "a"}}));
        let err = Fields::new(&obj).model_list::<Named>("items").unwrap_err();
        assert_eq!(err.field(), Some("items"));
    }

    #[test]
    fn test_required_model_missing() {
        let obj = object(json!({}));
        let err = Fields::new(&obj).required_model::<Named>("owner").unwrap_err();
        assert_eq!(err.field(), Some("owner"));
    }

    #[test]
    fn test_discriminator_nested_path() {
        let obj = object(json!({"keystore": {"type": "aws_kms"}}));
        let tag = Fields::new(&obj)
            .discriminator("KeyInstance", "keystore.type")
            .unwrap();
        assert_eq!(tag, "aws_kms");
    }

    #[test]
    fn test_discriminator_missing_or_empty() {
        for fixture in [json!({}), json!({"type": null}), json!({"type": ""})] {
            let obj = object(fixture);
            let err = Fields::new(&obj).discriminator("Keystore", "type").unwrap_err();
            assert!(matches!(err, DecodeError::MissingDiscriminator { .. }));
        }
    }

    #[test]
    fn test_discriminator_wrong_kind() {
        let obj = object(json!({"type": 3}));
        let err = Fields::new(&obj).discriminator("Keystore", "type").unwrap_err();
        assert!(matches!(err, DecodeError::Field { .. }));
    }

    #[test]
    fn test_tag_unrecognized() {
        let obj = object(json!({"method": "TRACE"}));
        let err = Fields::new(&obj)
            .tag::<crate::RestMethod>("Request", "method")
            .unwrap_err();
        match err {
            DecodeError::UnrecognizedVariant { value, .. } => assert_eq!(value, "TRACE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
