//! Response decoding errors.

use thiserror::Error;

/// Errors raised while turning a JSON response into a typed model.
///
/// Decoding never yields a half-populated value: the first failing field
/// aborts the whole object and surfaces here with enough context (field
/// path, offending discriminator value) to diagnose the payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The discriminator field of a variant family is absent, `null` or empty.
    #[error("{family}: missing discriminator field '{field}'")]
    MissingDiscriminator {
        /// The variant family being decoded.
        family: &'static str,
        /// Path of the discriminator field.
        field: String,
    },

    /// The discriminator value does not name any known variant.
    #[error("{family}: unrecognized value '{value}' for discriminator '{field}'")]
    UnrecognizedVariant {
        /// The variant family being decoded.
        family: &'static str,
        /// Path of the discriminator field.
        field: String,
        /// The value found on the wire.
        value: String,
    },

    /// A single field did not match its expected shape.
    #[error("failed to decode field '{field}': {source}")]
    Field {
        /// Dotted path of the failing field (e.g. `instances[0].keystore.type`).
        field: String,
        /// The underlying deserialization failure.
        source: serde_json::Error,
    },

    /// A nested model failed for a reason other than a plain field error.
    #[error("failed to decode field '{field}': {source}")]
    Nested {
        /// Path of the nested model field.
        field: String,
        /// The nested failure.
        source: Box<DecodeError>,
    },

    /// The value handed to a decoder is not a JSON object.
    #[error("expected a JSON object for {family}, found {found}")]
    NotAnObject {
        /// The model or family being decoded.
        family: &'static str,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// The response body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    /// Creates a field error for a required field that is absent.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let source = <serde_json::Error as serde::de::Error>::custom("required field is missing");
        Self::Field { field, source }
    }

    /// Returns the path of the field this error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingDiscriminator { field, .. }
            | Self::UnrecognizedVariant { field, .. }
            | Self::Field { field, .. }
            | Self::Nested { field, .. } => Some(field),
            Self::NotAnObject { .. } | Self::Json(_) => None,
        }
    }

    /// Returns `true` for missing or unrecognized discriminator errors,
    /// including ones wrapped by a nested field.
    pub fn is_discriminator_error(&self) -> bool {
        match self {
            Self::MissingDiscriminator { .. } | Self::UnrecognizedVariant { .. } => true,
            Self::Nested { source, .. } => source.is_discriminator_error(),
            _ => false,
        }
    }

    /// Re-roots this error under a parent field so the reported path names
    /// the full location inside the enclosing object.
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            Self::Field { field, source } => Self::Field {
                field: join_path(parent, &field),
                source,
            },
            Self::Nested { field, source } => Self::Nested {
                field: join_path(parent, &field),
                source,
            },
            other => Self::Nested {
                field: parent.to_string(),
                source: Box::new(other),
            },
        }
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_error(field: &str) -> DecodeError {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        DecodeError::Field {
            field: field.to_string(),
            source,
        }
    }

    #[test]
    fn test_within_prefixes_field_path() {
        let err = field_error("created_at").within("vault");
        assert_eq!(err.field(), Some("vault.created_at"));
    }

    #[test]
    fn test_within_index_path() {
        let err = field_error("label").within("[2]").within("instances");
        assert_eq!(err.field(), Some("instances[2].label"));
    }

    #[test]
    fn test_within_wraps_discriminator_errors() {
        let err = DecodeError::MissingDiscriminator {
            family: "KeyInstance",
            field: "keystore.type".to_string(),
        }
        .within("[0]")
        .within("instances");

        assert!(matches!(err, DecodeError::Nested { .. }));
        assert_eq!(err.field(), Some("instances[0]"));
        assert!(err.is_discriminator_error());
    }

    #[test]
    fn test_unrecognized_display_carries_value() {
        let err = DecodeError::UnrecognizedVariant {
            family: "Keystore",
            field: "type".to_string(),
            value: "not_a_real_vendor".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Keystore"));
        assert!(display.contains("not_a_real_vendor"));
    }

    #[test]
    fn test_missing_field_names_field() {
        let err = DecodeError::missing_field("id");
        assert_eq!(err.field(), Some("id"));
        assert!(!err.is_discriminator_error());
    }
}
