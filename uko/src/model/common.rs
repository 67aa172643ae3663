//! Reference objects and error envelopes shared across resources.

use serde::{Deserialize, Deserializer, Serialize};

use super::KeystoreType;

/// A navigation link inside a list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefObject {
    /// Absolute or relative URL of the linked page.
    pub href: String,
}

/// Reference to the vault a resource belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultReference {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Vault reference used in creation payloads, carrying only the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultReferenceInCreationRequest {
    pub id: String,
}

impl VaultReferenceInCreationRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Reference to the template a managed key was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateReference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Reference to a managed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedKeyReference {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Reference to a keystore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreReference {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub keystore_type: Option<KeystoreType>,
    #[serde(default)]
    pub href: Option<String>,
}

/// The keystore group and vendor a key instance or template targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetKeystoreReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub keystore_type: KeystoreType,
}

/// A user-defined label on a managed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Server-side trace identifier, useful when reporting issues.
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ErrorModel>,
}

impl ErrorEnvelope {
    /// Returns the first non-empty message, falling back to the first code.
    pub fn first_message(&self) -> Option<&str> {
        let message = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .find(|m| !m.is_empty());
        message.or_else(|| {
            self.errors
                .iter()
                .map(|e| e.code.as_str())
                .find(|c| !c.is_empty())
        })
    }
}

/// A single error inside an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_params: Vec<String>,
    #[serde(default)]
    pub target: Option<ErrorTarget>,
}

/// Reads an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The request element an [`ErrorModel`] refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTarget {
    /// One of `field`, `parameter` or `header`.
    #[serde(rename = "type", default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_decode() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "status_code": 409,
            "trace": "7c1e",
            "errors": [{
                "code": "DUPLICATE_NAME",
                "message": "A vault with this name already exists",
                "target": {"type": "field", "name": "name"}
            }]
        }))
        .unwrap();

        assert_eq!(envelope.status_code, Some(409));
        assert_eq!(envelope.first_message(), Some("A vault with this name already exists"));
        let target = envelope.errors[0].target.as_ref().unwrap();
        assert_eq!(target.target_type.as_deref(), Some("field"));
        assert!(envelope.errors[0].message_params.is_empty());
    }

    #[test]
    fn test_error_envelope_tolerates_nulls() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "status_code": 409,
            "trace": "41aa",
            "errors": [{
                "code": "CONFLICT",
                "message": null,
                "more_info": null,
                "message_params": null,
                "target": null
            }]
        }))
        .unwrap();

        assert_eq!(envelope.trace.as_deref(), Some("41aa"));
        assert_eq!(envelope.errors[0].code, "CONFLICT");
        assert_eq!(envelope.errors[0].message, "");
        assert_eq!(envelope.first_message(), Some("CONFLICT"));
        assert!(envelope.errors[0].message_params.is_empty());
        assert!(envelope.errors[0].more_info.is_none());

        let envelope: ErrorEnvelope =
            serde_json::from_value(json!({"trace": "41ab", "errors": null})).unwrap();
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn test_target_keystore_reference_wire_name() {
        let reference: TargetKeystoreReference =
            serde_json::from_value(json!({"type": "google_kms"})).unwrap();
        assert_eq!(reference.keystore_type, KeystoreType::GoogleKms);
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({"type": "google_kms"})
        );
    }
}
