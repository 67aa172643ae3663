//! The keystore read family.
//!
//! [`Keystore`] dispatches on the `type` tag into one of five vendor
//! variants. List responses decode into [`KeystoreSummary`] instead, which
//! keeps the shared fields and the raw payload; [`KeystoreSummary::refine`]
//! runs the discriminated decode on demand.
//!
//! The `ibm_cloud_kms` branch stops at [`IbmCloudKmsKeystore`], an
//! intermediate shape. [`IbmCloudKmsKeystore::refine`] resolves the second
//! tag, `ibm_variant`, into an internal or external leaf.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use super::{KeystoreStatusHealth, KeystoreType, VaultReference};
use crate::decode::{Decode, Fields};
use crate::error::DecodeError;

/// Capabilities shared by every member of the keystore read family.
pub trait KeystoreFamily {
    /// The vendor tag. Always equals the `type` the value was decoded from.
    fn keystore_type(&self) -> KeystoreType;

    /// Fields common to all vendors.
    fn common(&self) -> &KeystoreCommon;

    fn id(&self) -> &str {
        &self.common().id
    }

    fn name(&self) -> Option<&str> {
        self.common().name.as_deref()
    }

    fn vault(&self) -> Option<&VaultReference> {
        self.common().vault.as_ref()
    }
}

/// Second-level tag of the `ibm_cloud_kms` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IbmVariant {
    /// Keystore hosted by the service itself.
    Internal,
    /// Hyper Protect Crypto Services instance.
    Hpcs,
    /// Key Protect instance.
    KeyProtect,
}

impl IbmVariant {
    /// Returns `true` for variants that connect to an external instance.
    pub fn is_external(self) -> bool {
        !matches!(self, Self::Internal)
    }

    /// Parses the raw `ibm_variant` value of an intermediate shape.
    pub(crate) fn resolve(family: &'static str, raw: Option<&str>) -> Result<Self, DecodeError> {
        let raw = raw
            .filter(|value| !value.is_empty())
            .ok_or_else(|| DecodeError::MissingDiscriminator {
                family,
                field: "ibm_variant".to_string(),
            })?;
        raw.parse().map_err(|_| DecodeError::UnrecognizedVariant {
            family,
            field: "ibm_variant".to_string(),
            value: raw.to_string(),
        })
    }
}

/// Health of a keystore connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeystoreStatus {
    pub health_status: Option<KeystoreStatusHealth>,
    pub message: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Decode for KeystoreStatus {
    const NAME: &'static str = "KeystoreStatus";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            health_status: fields.optional("health_status")?,
            message: fields.optional("message")?,
            last_updated: fields.optional("last_updated")?,
        })
    }
}

/// Fields shared by all keystore vendors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeystoreCommon {
    pub id: String,
    pub vault: Option<VaultReference>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub groups: Vec<String>,
    pub location: Option<String>,
    pub status: Option<KeystoreStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub href: Option<String>,
}

impl Decode for KeystoreCommon {
    const NAME: &'static str = "Keystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            vault: fields.optional("vault")?,
            name: fields.optional("name")?,
            description: fields.optional("description")?,
            groups: fields.list("groups")?,
            location: fields.optional("location")?,
            status: fields.optional_model("status")?,
            created_at: fields.optional("created_at")?,
            updated_at: fields.optional("updated_at")?,
            created_by: fields.optional("created_by")?,
            updated_by: fields.optional("updated_by")?,
            href: fields.optional("href")?,
        })
    }
}

/// AWS KMS keystore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwsKmsKeystore {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub aws_region: Option<String>,
}

impl Decode for AwsKmsKeystore {
    const NAME: &'static str = "AwsKmsKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            aws_region: fields.optional("aws_region")?,
        })
    }
}

/// Azure Key Vault keystore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzureKeyVaultKeystore {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub azure_service_name: Option<String>,
    pub azure_resource_group: Option<String>,
    pub azure_location: Option<String>,
    pub azure_service_principal_client_id: Option<String>,
    pub azure_tenant: Option<String>,
    pub azure_subscription_id: Option<String>,
    pub azure_environment: Option<String>,
}

impl Decode for AzureKeyVaultKeystore {
    const NAME: &'static str = "AzureKeyVaultKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            azure_service_name: fields.optional("azure_service_name")?,
            azure_resource_group: fields.optional("azure_resource_group")?,
            azure_location: fields.optional("azure_location")?,
            azure_service_principal_client_id: fields
                .optional("azure_service_principal_client_id")?,
            azure_tenant: fields.optional("azure_tenant")?,
            azure_subscription_id: fields.optional("azure_subscription_id")?,
            azure_environment: fields.optional("azure_environment")?,
        })
    }
}

/// Google Cloud KMS keystore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleKmsKeystore {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub google_project_id: Option<String>,
    pub google_location: Option<String>,
    pub google_key_ring: Option<String>,
    pub google_private_key_id: Option<String>,
}

impl Decode for GoogleKmsKeystore {
    const NAME: &'static str = "GoogleKmsKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            google_project_id: fields.optional("google_project_id")?,
            google_location: fields.optional("google_location")?,
            google_key_ring: fields.optional("google_key_ring")?,
            google_private_key_id: fields.optional("google_private_key_id")?,
        })
    }
}

/// IBM Cloud KMS keystore before `ibm_variant` is resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IbmCloudKmsKeystore {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub ibm_variant: Option<String>,
    pub ibm_api_endpoint: Option<String>,
    pub ibm_iam_endpoint: Option<String>,
    pub ibm_instance_id: Option<String>,
    pub ibm_key_ring: Option<String>,
}

impl IbmCloudKmsKeystore {
    /// Resolves `ibm_variant` into an internal or external leaf.
    ///
    /// ## Errors
    ///
    /// - [`DecodeError::MissingDiscriminator`] when `ibm_variant` is unset.
    /// - [`DecodeError::UnrecognizedVariant`] for an unknown `ibm_variant`.
    /// - [`DecodeError::Field`] when an external variant lacks one of its
    ///   connection fields.
    pub fn refine(&self) -> Result<IbmCloudKmsLeaf, DecodeError> {
        let variant = IbmVariant::resolve("IbmCloudKmsKeystore", self.ibm_variant.as_deref())?;
        if !variant.is_external() {
            return Ok(IbmCloudKmsLeaf::Internal(IbmCloudKmsInternal {
                common: self.common.clone(),
                ibm_key_ring: self.ibm_key_ring.clone(),
            }));
        }

        Ok(IbmCloudKmsLeaf::External(IbmCloudKmsExternal {
            common: self.common.clone(),
            ibm_variant: variant,
            ibm_api_endpoint: required_leaf_field("ibm_api_endpoint", &self.ibm_api_endpoint)?,
            ibm_iam_endpoint: required_leaf_field("ibm_iam_endpoint", &self.ibm_iam_endpoint)?,
            ibm_instance_id: required_leaf_field("ibm_instance_id", &self.ibm_instance_id)?,
            ibm_key_ring: self.ibm_key_ring.clone(),
        }))
    }
}

pub(crate) fn required_leaf_field(
    name: &str,
    value: &Option<String>,
) -> Result<String, DecodeError> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DecodeError::missing_field(name))
}

impl Decode for IbmCloudKmsKeystore {
    const NAME: &'static str = "IbmCloudKmsKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            ibm_variant: fields.optional("ibm_variant")?,
            ibm_api_endpoint: fields.optional("ibm_api_endpoint")?,
            ibm_iam_endpoint: fields.optional("ibm_iam_endpoint")?,
            ibm_instance_id: fields.optional("ibm_instance_id")?,
            ibm_key_ring: fields.optional("ibm_key_ring")?,
        })
    }
}

/// An IBM Cloud KMS keystore with its `ibm_variant` resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IbmCloudKmsLeaf {
    Internal(IbmCloudKmsInternal),
    External(IbmCloudKmsExternal),
}

/// Keystore hosted inside the service (`ibm_variant = internal`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IbmCloudKmsInternal {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub ibm_key_ring: Option<String>,
}

/// Connection to a Key Protect or Hyper Protect Crypto Services instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IbmCloudKmsExternal {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub ibm_variant: IbmVariant,
    pub ibm_api_endpoint: String,
    pub ibm_iam_endpoint: String,
    pub ibm_instance_id: String,
    pub ibm_key_ring: Option<String>,
}

/// CCA keystore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CcaKeystore {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    pub cca_use_tag: Option<String>,
    pub cca_heartbeat_enabled: Option<bool>,
}

impl Decode for CcaKeystore {
    const NAME: &'static str = "CcaKeystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            cca_use_tag: fields.optional("cca_use_tag")?,
            cca_heartbeat_enabled: fields.optional("cca_heartbeat_enabled")?,
        })
    }
}

macro_rules! keystore_variant {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl KeystoreFamily for $ty {
                fn keystore_type(&self) -> KeystoreType {
                    KeystoreType::$tag
                }

                fn common(&self) -> &KeystoreCommon {
                    &self.common
                }
            }
        )+
    };
}

keystore_variant! {
    AwsKmsKeystore => AwsKms,
    AzureKeyVaultKeystore => AzureKeyVault,
    GoogleKmsKeystore => GoogleKms,
    IbmCloudKmsKeystore => IbmCloudKms,
    IbmCloudKmsInternal => IbmCloudKms,
    IbmCloudKmsExternal => IbmCloudKms,
    CcaKeystore => Cca,
}

impl KeystoreFamily for IbmCloudKmsLeaf {
    fn keystore_type(&self) -> KeystoreType {
        KeystoreType::IbmCloudKms
    }

    fn common(&self) -> &KeystoreCommon {
        match self {
            Self::Internal(keystore) => &keystore.common,
            Self::External(keystore) => &keystore.common,
        }
    }
}

/// A keystore of any vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Keystore {
    AwsKms(AwsKmsKeystore),
    AzureKeyVault(AzureKeyVaultKeystore),
    GoogleKms(GoogleKmsKeystore),
    IbmCloudKms(IbmCloudKmsKeystore),
    Cca(CcaKeystore),
}

impl Keystore {
    /// Returns the IBM Cloud KMS intermediate shape, if this is one.
    pub fn as_ibm_cloud_kms(&self) -> Option<&IbmCloudKmsKeystore> {
        match self {
            Self::IbmCloudKms(keystore) => Some(keystore),
            _ => None,
        }
    }
}

impl KeystoreFamily for Keystore {
    fn keystore_type(&self) -> KeystoreType {
        match self {
            Self::AwsKms(k) => k.keystore_type(),
            Self::AzureKeyVault(k) => k.keystore_type(),
            Self::GoogleKms(k) => k.keystore_type(),
            Self::IbmCloudKms(k) => k.keystore_type(),
            Self::Cca(k) => k.keystore_type(),
        }
    }

    fn common(&self) -> &KeystoreCommon {
        match self {
            Self::AwsKms(k) => &k.common,
            Self::AzureKeyVault(k) => &k.common,
            Self::GoogleKms(k) => &k.common,
            Self::IbmCloudKms(k) => &k.common,
            Self::Cca(k) => &k.common,
        }
    }
}

impl Decode for Keystore {
    const NAME: &'static str = "Keystore";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let tag = Fields::new(object).discriminator(Self::NAME, "type")?;
        match KeystoreType::from(tag) {
            KeystoreType::AwsKms => AwsKmsKeystore::decode(object).map(Self::AwsKms),
            KeystoreType::AzureKeyVault => {
                AzureKeyVaultKeystore::decode(object).map(Self::AzureKeyVault)
            }
            KeystoreType::GoogleKms => GoogleKmsKeystore::decode(object).map(Self::GoogleKms),
            KeystoreType::IbmCloudKms => {
                IbmCloudKmsKeystore::decode(object).map(Self::IbmCloudKms)
            }
            KeystoreType::Cca => CcaKeystore::decode(object).map(Self::Cca),
            KeystoreType::Other(value) => Err(DecodeError::UnrecognizedVariant {
                family: Self::NAME,
                field: "type".to_string(),
                value,
            }),
        }
    }
}

/// Keystore as it appears in list responses: shared fields plus the raw tag.
///
/// Decoding never dispatches on `type`, so unknown vendors still list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeystoreSummary {
    #[serde(flatten)]
    pub common: KeystoreCommon,
    #[serde(rename = "type")]
    pub keystore_type: Option<KeystoreType>,
    #[serde(skip)]
    raw: Map<String, Value>,
}

impl KeystoreSummary {
    /// Decodes the vendor-specific variant from the original payload.
    pub fn refine(&self) -> Result<Keystore, DecodeError> {
        Keystore::decode(&self.raw)
    }

    /// Returns the payload this summary was decoded from.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Decode for KeystoreSummary {
    const NAME: &'static str = "KeystoreSummary";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCommon::decode(object)?,
            keystore_type: fields.optional("type")?,
            raw: object.clone(),
        })
    }
}
