//! Managed keys, their per-keystore instances and distribution status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    ErrorModel, KeyAlgorithm, KeyType, KeystoreReference, KeystoreSyncStatus, KeystoreType,
    ManagedKeyState, Tag, TargetKeystoreReference, TemplateReference, VaultReference,
    VaultReferenceInCreationRequest,
};
use crate::decode::{Decode, Fields};
use crate::error::{DecodeError, ValidationError, require_non_empty};

/// Capabilities shared by every key instance variant.
pub trait KeyInstanceFamily {
    /// The vendor of the keystore holding this instance.
    fn keystore_type(&self) -> KeystoreType;

    fn common(&self) -> &KeyInstanceCommon;

    fn id(&self) -> &str {
        &self.common().id
    }

    fn label_in_keystore(&self) -> Option<&str> {
        self.common().label_in_keystore.as_deref()
    }
}

/// Fields shared by all key instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceCommon {
    pub id: String,
    pub label_in_keystore: Option<String>,
    /// Key pair or secret key. Not the vendor tag, which lives in `keystore`.
    #[serde(rename = "type")]
    pub key_type: Option<KeyType>,
    pub keystore: TargetKeystoreReference,
}

impl Decode for KeyInstanceCommon {
    const NAME: &'static str = "KeyInstance";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            label_in_keystore: fields.optional("label_in_keystore")?,
            key_type: fields.optional("type")?,
            keystore: fields.required("keystore")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceAwsKms {
    #[serde(flatten)]
    pub common: KeyInstanceCommon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceAzure {
    #[serde(flatten)]
    pub common: KeyInstanceCommon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceGoogleKms {
    #[serde(flatten)]
    pub common: KeyInstanceCommon,
    pub google_key_protection_level: Option<String>,
    pub google_key_purpose: Option<String>,
    pub google_kms_algorithm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceIbmCloudKms {
    #[serde(flatten)]
    pub common: KeyInstanceCommon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInstanceCca {
    #[serde(flatten)]
    pub common: KeyInstanceCommon,
}

macro_rules! key_instance_variant {
    ($($ty:ident => $tag:ident),+ $(,)?) => {
        $(
            impl KeyInstanceFamily for $ty {
                fn keystore_type(&self) -> KeystoreType {
                    KeystoreType::$tag
                }

                fn common(&self) -> &KeyInstanceCommon {
                    &self.common
                }
            }
        )+
    };
}

key_instance_variant! {
    KeyInstanceAwsKms => AwsKms,
    KeyInstanceAzure => AzureKeyVault,
    KeyInstanceGoogleKms => GoogleKms,
    KeyInstanceIbmCloudKms => IbmCloudKms,
    KeyInstanceCca => Cca,
}

/// A managed key as installed in one keystore, keyed by keystore vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyInstance {
    AwsKms(KeyInstanceAwsKms),
    AzureKeyVault(KeyInstanceAzure),
    GoogleKms(KeyInstanceGoogleKms),
    IbmCloudKms(KeyInstanceIbmCloudKms),
    Cca(KeyInstanceCca),
}

impl KeyInstanceFamily for KeyInstance {
    fn keystore_type(&self) -> KeystoreType {
        match self {
            Self::AwsKms(i) => i.keystore_type(),
            Self::AzureKeyVault(i) => i.keystore_type(),
            Self::GoogleKms(i) => i.keystore_type(),
            Self::IbmCloudKms(i) => i.keystore_type(),
            Self::Cca(i) => i.keystore_type(),
        }
    }

    fn common(&self) -> &KeyInstanceCommon {
        match self {
            Self::AwsKms(i) => &i.common,
            Self::AzureKeyVault(i) => &i.common,
            Self::GoogleKms(i) => &i.common,
            Self::IbmCloudKms(i) => &i.common,
            Self::Cca(i) => &i.common,
        }
    }
}

impl Decode for KeyInstance {
    const NAME: &'static str = "KeyInstance";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        let tag = fields.discriminator(Self::NAME, "keystore.type")?;
        match KeystoreType::from(tag) {
            KeystoreType::AwsKms => Ok(Self::AwsKms(KeyInstanceAwsKms {
                common: KeyInstanceCommon::decode(object)?,
            })),
            KeystoreType::AzureKeyVault => Ok(Self::AzureKeyVault(KeyInstanceAzure {
                common: KeyInstanceCommon::decode(object)?,
            })),
            KeystoreType::GoogleKms => Ok(Self::GoogleKms(KeyInstanceGoogleKms {
                common: KeyInstanceCommon::decode(object)?,
                google_key_protection_level: fields.optional("google_key_protection_level")?,
                google_key_purpose: fields.optional("google_key_purpose")?,
                google_kms_algorithm: fields.optional("google_kms_algorithm")?,
            })),
            KeystoreType::IbmCloudKms => Ok(Self::IbmCloudKms(KeyInstanceIbmCloudKms {
                common: KeyInstanceCommon::decode(object)?,
            })),
            KeystoreType::Cca => Ok(Self::Cca(KeyInstanceCca {
                common: KeyInstanceCommon::decode(object)?,
            })),
            KeystoreType::Other(value) => Err(DecodeError::UnrecognizedVariant {
                family: Self::NAME,
                field: "keystore.type".to_string(),
                value,
            }),
        }
    }
}

/// Distribution state of a managed key in one keystore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInKeystore {
    pub keystore: KeystoreReference,
    pub status: Option<KeystoreSyncStatus>,
    pub key_id_in_keystore: Option<String>,
    pub error: Option<ErrorModel>,
}

impl Decode for StatusInKeystore {
    const NAME: &'static str = "StatusInKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            keystore: fields.required("keystore")?,
            status: fields.optional("status")?,
            key_id_in_keystore: fields.optional("key_id_in_keystore")?,
            error: fields.optional("error")?,
        })
    }
}

/// A managed key as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedKey {
    pub id: String,
    pub vault: Option<VaultReference>,
    pub template: Option<TemplateReference>,
    pub label: String,
    pub description: Option<String>,
    pub state: ManagedKeyState,
    pub algorithm: KeyAlgorithm,
    pub size: Option<String>,
    pub activation_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub tags: Vec<Tag>,
    pub referenced_keystores: Vec<KeystoreReference>,
    pub instances: Vec<KeyInstance>,
    pub status_in_keystores: Vec<StatusInKeystore>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub href: Option<String>,
}

impl Decode for ManagedKey {
    const NAME: &'static str = "ManagedKey";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            vault: fields.optional("vault")?,
            template: fields.optional("template")?,
            label: fields.required("label")?,
            description: fields.optional("description")?,
            state: fields.required("state")?,
            algorithm: fields.required("algorithm")?,
            size: fields.optional("size")?,
            activation_date: fields.optional("activation_date")?,
            expiration_date: fields.optional("expiration_date")?,
            tags: fields.list("tags")?,
            referenced_keystores: fields.list("referenced_keystores")?,
            instances: fields.model_list("instances")?,
            status_in_keystores: fields.model_list("status_in_keystores")?,
            created_at: fields.optional("created_at")?,
            updated_at: fields.optional("updated_at")?,
            created_by: fields.optional("created_by")?,
            updated_by: fields.optional("updated_by")?,
            href: fields.optional("href")?,
        })
    }
}

/// Body of a managed key creation request. Keys are always created from a
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedKeyCreate {
    pub template_name: String,
    pub vault: VaultReferenceInCreationRequest,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ManagedKeyCreate {
    pub fn new(
        template_name: impl Into<String>,
        vault_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            template_name: template_name.into(),
            vault: VaultReferenceInCreationRequest::new(vault_id),
            label: label.into(),
            tags: Vec::new(),
            description: None,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("template_name", &self.template_name)?;
        require_non_empty("vault.id", &self.vault.id)?;
        require_non_empty("label", &self.label)
    }
}

/// Body of a managed key update request. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManagedKeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl ManagedKeyUpdate {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_expiration_date(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(label) = &self.label {
            require_non_empty("label", label)?;
        }
        if let (Some(activation), Some(expiration)) = (self.activation_date, self.expiration_date) {
            if expiration < activation {
                return Err(ValidationError::invalid(
                    "expiration_date",
                    "must not be earlier than activation_date",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance(vendor: &str) -> Value {
        json!({
            "id": format!("inst-{vendor}"),
            "label_in_keystore": "payments-key",
            "type": "secret_key",
            "keystore": {"group": "eu", "type": vendor}
        })
    }

    fn managed_key(instances: Vec<Value>) -> Value {
        json!({
            "id": "mk-1",
            "label": "payments-key",
            "state": "active",
            "algorithm": "aes",
            "size": "256",
            "activation_date": "2024-05-01",
            "vault": {"id": "v-1"},
            "tags": [{"name": "team", "value": "payments"}],
            "instances": instances,
            "status_in_keystores": [
                {"keystore": {"id": "ks-1", "type": "aws_kms"}, "status": "active"}
            ]
        })
    }

    #[test]
    fn test_instance_dispatches_on_keystore_type() {
        for vendor in ["aws_kms", "azure_key_vault", "google_kms", "ibm_cloud_kms", "cca"] {
            let decoded = KeyInstance::decode_value(&instance(vendor)).unwrap();
            assert_eq!(decoded.keystore_type().as_str(), vendor);
            assert_eq!(decoded.common().keystore.keystore_type.as_str(), vendor);
            assert_eq!(decoded.common().key_type, Some(KeyType::SecretKey));
            assert_eq!(decoded.label_in_keystore(), Some("payments-key"));
        }
    }

    #[test]
    fn test_google_instance_fields() {
        let mut payload = instance("google_kms");
        payload["google_key_purpose"] = json!("encrypt_decrypt");
        match KeyInstance::decode_value(&payload).unwrap() {
            KeyInstance::GoogleKms(i) => {
                assert_eq!(i.google_key_purpose.as_deref(), Some("encrypt_decrypt"))
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_instance_unknown_vendor() {
        let err = KeyInstance::decode_value(&instance("not_a_real_vendor")).unwrap_err();
        match err {
            DecodeError::UnrecognizedVariant { field, value, .. } => {
                assert_eq!(field, "keystore.type");
                assert_eq!(value, "not_a_real_vendor");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_instance_without_keystore() {
        let err = KeyInstance::decode_value(&json!({"id": "i", "type": "key_pair"})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingDiscriminator { .. }));
    }

    #[test]
    fn test_decode_managed_key() {
        let key = ManagedKey::decode_value(&managed_key(vec![
            instance("aws_kms"),
            instance("cca"),
        ]))
        .unwrap();

        assert_eq!(key.state, ManagedKeyState::Active);
        assert_eq!(key.algorithm, KeyAlgorithm::Aes);
        assert_eq!(key.activation_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(key.tags, vec![Tag::new("team", "payments")]);
        assert_eq!(key.instances.len(), 2);
        assert!(matches!(key.instances[1], KeyInstance::Cca(_)));
        assert_eq!(key.status_in_keystores[0].status, Some(KeystoreSyncStatus::Active));
    }

    #[test]
    fn test_unknown_state_is_kept() {
        let mut payload = managed_key(vec![]);
        payload["state"] = json!("suspended");
        let key = ManagedKey::decode_value(&payload).unwrap();
        assert_eq!(key.state, ManagedKeyState::Other("suspended".to_string()));
    }

    #[test]
    fn test_nested_instance_error_path() {
        let mut broken = instance("aws_kms");
        broken["label_in_keystore"] = json!(42);
        let payload = managed_key(vec![instance("cca"), instance("google_kms"), broken]);
        let err = ManagedKey::decode_value(&payload).unwrap_err();
        assert_eq!(err.field(), Some("instances[2].label_in_keystore"));
    }

    #[test]
    fn test_nested_instance_discriminator_error() {
        let payload = managed_key(vec![instance("aws_kms"), instance("mystery")]);
        let err = ManagedKey::decode_value(&payload).unwrap_err();
        assert!(err.is_discriminator_error());
        assert_eq!(err.field(), Some("instances[1]"));
    }

    #[test]
    fn test_create_validation() {
        let create = ManagedKeyCreate::new("aes-256", "v-1", "payments-key");
        assert!(create.validate().is_ok());
        assert!(matches!(
            ManagedKeyCreate::new("", "v-1", "k").validate(),
            Err(ValidationError::EmptyValue { field: "template_name" })
        ));
    }

    #[test]
    fn test_update_date_order() {
        let update = ManagedKeyUpdate {
            activation_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            expiration_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(matches!(
            update.validate(),
            Err(ValidationError::InvalidValue { field: "expiration_date", .. })
        ));
    }
}
