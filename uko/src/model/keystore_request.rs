//! Keystore creation and update request families.
//!
//! Both families carry the vendor tag in `type` and decode the same way as
//! [`Keystore`](super::Keystore). The IBM creation branch has its own second
//! level, resolved by [`IbmCloudKmsCreate::refine`].

use serde::Serialize;
use serde_json::{Map, Value};

use super::keystore::{IbmVariant, required_leaf_field};
use super::{KeystoreType, VaultReferenceInCreationRequest};
use crate::decode::{Decode, Fields};
use crate::error::{DecodeError, ValidationError, require_non_empty, require_present};

/// Fields shared by every keystore creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeystoreCreateCommon {
    pub vault: VaultReferenceInCreationRequest,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl KeystoreCreateCommon {
    pub fn new(vault_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vault: VaultReferenceInCreationRequest::new(vault_id),
            name: name.into(),
            description: None,
            groups: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("vault.id", &self.vault.id)?;
        require_non_empty("name", &self.name)
    }
}

impl Decode for KeystoreCreateCommon {
    const NAME: &'static str = "KeystoreCreationRequest";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            vault: fields.required("vault")?,
            name: fields.required("name")?,
            description: fields.optional("description")?,
            groups: fields.list("groups")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwsKmsCreate {
    #[serde(flatten)]
    pub common: KeystoreCreateCommon,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
}

impl AwsKmsCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        self.common.validate()?;
        require_non_empty("aws_region", &self.aws_region)?;
        require_non_empty("aws_access_key_id", &self.aws_access_key_id)?;
        require_non_empty("aws_secret_access_key", &self.aws_secret_access_key)
    }
}

impl Decode for AwsKmsCreate {
    const NAME: &'static str = "AwsKmsCreate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCreateCommon::decode(object)?,
            aws_region: fields.required("aws_region")?,
            aws_access_key_id: fields.required("aws_access_key_id")?,
            aws_secret_access_key: fields.required("aws_secret_access_key")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AzureKeyVaultCreate {
    #[serde(flatten)]
    pub common: KeystoreCreateCommon,
    pub azure_service_name: String,
    pub azure_resource_group: String,
    pub azure_service_principal_client_id: String,
    pub azure_service_principal_password: String,
    pub azure_tenant: String,
    pub azure_subscription_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_environment: Option<String>,
}

impl AzureKeyVaultCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        self.common.validate()?;
        require_non_empty("azure_service_name", &self.azure_service_name)?;
        require_non_empty("azure_resource_group", &self.azure_resource_group)?;
        require_non_empty(
            "azure_service_principal_client_id",
            &self.azure_service_principal_client_id,
        )?;
        require_non_empty(
            "azure_service_principal_password",
            &self.azure_service_principal_password,
        )?;
        require_non_empty("azure_tenant", &self.azure_tenant)?;
        require_non_empty("azure_subscription_id", &self.azure_subscription_id)
    }
}

impl Decode for AzureKeyVaultCreate {
    const NAME: &'static str = "AzureKeyVaultCreate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCreateCommon::decode(object)?,
            azure_service_name: fields.required("azure_service_name")?,
            azure_resource_group: fields.required("azure_resource_group")?,
            azure_service_principal_client_id: fields
                .required("azure_service_principal_client_id")?,
            azure_service_principal_password: fields
                .required("azure_service_principal_password")?,
            azure_tenant: fields.required("azure_tenant")?,
            azure_subscription_id: fields.required("azure_subscription_id")?,
            azure_location: fields.optional("azure_location")?,
            azure_environment: fields.optional("azure_environment")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleKmsCreate {
    #[serde(flatten)]
    pub common: KeystoreCreateCommon,
    /// Base64-encoded service account key.
    pub google_credentials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_private_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_key_ring: Option<String>,
}

impl GoogleKmsCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        self.common.validate()?;
        require_non_empty("google_credentials", &self.google_credentials)
    }
}

impl Decode for GoogleKmsCreate {
    const NAME: &'static str = "GoogleKmsCreate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCreateCommon::decode(object)?,
            google_credentials: fields.required("google_credentials")?,
            google_location: fields.optional("google_location")?,
            google_project_id: fields.optional("google_project_id")?,
            google_private_key_id: fields.optional("google_private_key_id")?,
            google_key_ring: fields.optional("google_key_ring")?,
        })
    }
}

/// IBM Cloud KMS creation request before `ibm_variant` is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbmCloudKmsCreate {
    #[serde(flatten)]
    pub common: KeystoreCreateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_iam_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_key_ring: Option<String>,
}

impl IbmCloudKmsCreate {
    /// Request for a keystore hosted by the service.
    pub fn internal(common: KeystoreCreateCommon) -> Self {
        Self {
            common,
            ibm_variant: Some(IbmVariant::Internal.to_string()),
            ibm_api_endpoint: None,
            ibm_iam_endpoint: None,
            ibm_api_key: None,
            ibm_instance_id: None,
            ibm_key_ring: None,
        }
    }

    /// Request connecting an existing Key Protect or HPCS instance.
    pub fn external(
        common: KeystoreCreateCommon,
        variant: IbmVariant,
        api_endpoint: impl Into<String>,
        iam_endpoint: impl Into<String>,
        api_key: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            common,
            ibm_variant: Some(variant.to_string()),
            ibm_api_endpoint: Some(api_endpoint.into()),
            ibm_iam_endpoint: Some(iam_endpoint.into()),
            ibm_api_key: Some(api_key.into()),
            ibm_instance_id: Some(instance_id.into()),
            ibm_key_ring: None,
        }
    }

    pub fn with_key_ring(mut self, key_ring: impl Into<String>) -> Self {
        self.ibm_key_ring = Some(key_ring.into());
        self
    }

    /// Resolves `ibm_variant` into an internal or external leaf.
    pub fn refine(&self) -> Result<IbmCloudKmsCreateLeaf, DecodeError> {
        let variant = IbmVariant::resolve("IbmCloudKmsCreate", self.ibm_variant.as_deref())?;
        if !variant.is_external() {
            return Ok(IbmCloudKmsCreateLeaf::Internal(IbmCloudKmsInternalCreate {
                common: self.common.clone(),
                ibm_key_ring: self.ibm_key_ring.clone(),
            }));
        }

        Ok(IbmCloudKmsCreateLeaf::External(IbmCloudKmsExternalCreate {
            common: self.common.clone(),
            ibm_variant: variant,
            ibm_api_endpoint: required_leaf_field("ibm_api_endpoint", &self.ibm_api_endpoint)?,
            ibm_iam_endpoint: required_leaf_field("ibm_iam_endpoint", &self.ibm_iam_endpoint)?,
            ibm_api_key: required_leaf_field("ibm_api_key", &self.ibm_api_key)?,
            ibm_instance_id: required_leaf_field("ibm_instance_id", &self.ibm_instance_id)?,
            ibm_key_ring: self.ibm_key_ring.clone(),
        }))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.common.validate()?;
        let raw = require_present("ibm_variant", self.ibm_variant.as_deref())?;
        let variant: IbmVariant = raw.parse().map_err(|_| {
            ValidationError::invalid("ibm_variant", format!("unknown variant '{raw}'"))
        })?;
        if variant.is_external() {
            require_present("ibm_api_endpoint", self.ibm_api_endpoint.as_deref())?;
            require_present("ibm_iam_endpoint", self.ibm_iam_endpoint.as_deref())?;
            require_present("ibm_api_key", self.ibm_api_key.as_deref())?;
            require_present("ibm_instance_id", self.ibm_instance_id.as_deref())?;
        }
        Ok(())
    }
}

impl Decode for IbmCloudKmsCreate {
    const NAME: &'static str = "IbmCloudKmsCreate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCreateCommon::decode(object)?,
            ibm_variant: fields.optional("ibm_variant")?,
            ibm_api_endpoint: fields.optional("ibm_api_endpoint")?,
            ibm_iam_endpoint: fields.optional("ibm_iam_endpoint")?,
            ibm_api_key: fields.optional("ibm_api_key")?,
            ibm_instance_id: fields.optional("ibm_instance_id")?,
            ibm_key_ring: fields.optional("ibm_key_ring")?,
        })
    }
}

/// An IBM Cloud KMS creation request with its `ibm_variant` resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbmCloudKmsCreateLeaf {
    Internal(IbmCloudKmsInternalCreate),
    External(IbmCloudKmsExternalCreate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbmCloudKmsInternalCreate {
    pub common: KeystoreCreateCommon,
    pub ibm_key_ring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbmCloudKmsExternalCreate {
    pub common: KeystoreCreateCommon,
    pub ibm_variant: IbmVariant,
    pub ibm_api_endpoint: String,
    pub ibm_iam_endpoint: String,
    pub ibm_api_key: String,
    pub ibm_instance_id: String,
    pub ibm_key_ring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CcaCreate {
    #[serde(flatten)]
    pub common: KeystoreCreateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cca_use_tag: Option<String>,
}

impl Decode for CcaCreate {
    const NAME: &'static str = "CcaCreate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreCreateCommon::decode(object)?,
            cca_use_tag: fields.optional("cca_use_tag")?,
        })
    }
}

/// Body of a keystore creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeystoreCreationRequest {
    AwsKms(AwsKmsCreate),
    AzureKeyVault(AzureKeyVaultCreate),
    GoogleKms(GoogleKmsCreate),
    IbmCloudKms(IbmCloudKmsCreate),
    Cca(CcaCreate),
}

impl KeystoreCreationRequest {
    pub fn keystore_type(&self) -> KeystoreType {
        match self {
            Self::AwsKms(_) => KeystoreType::AwsKms,
            Self::AzureKeyVault(_) => KeystoreType::AzureKeyVault,
            Self::GoogleKms(_) => KeystoreType::GoogleKms,
            Self::IbmCloudKms(_) => KeystoreType::IbmCloudKms,
            Self::Cca(_) => KeystoreType::Cca,
        }
    }

    pub fn common(&self) -> &KeystoreCreateCommon {
        match self {
            Self::AwsKms(r) => &r.common,
            Self::AzureKeyVault(r) => &r.common,
            Self::GoogleKms(r) => &r.common,
            Self::IbmCloudKms(r) => &r.common,
            Self::Cca(r) => &r.common,
        }
    }

    /// Checks required fields before the request is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::AwsKms(r) => r.validate(),
            Self::AzureKeyVault(r) => r.validate(),
            Self::GoogleKms(r) => r.validate(),
            Self::IbmCloudKms(r) => r.validate(),
            Self::Cca(r) => r.common.validate(),
        }
    }
}

impl Decode for KeystoreCreationRequest {
    const NAME: &'static str = "KeystoreCreationRequest";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let tag = Fields::new(object).discriminator(Self::NAME, "type")?;
        match KeystoreType::from(tag) {
            KeystoreType::AwsKms => AwsKmsCreate::decode(object).map(Self::AwsKms),
            KeystoreType::AzureKeyVault => {
                AzureKeyVaultCreate::decode(object).map(Self::AzureKeyVault)
            }
            KeystoreType::GoogleKms => GoogleKmsCreate::decode(object).map(Self::GoogleKms),
            KeystoreType::IbmCloudKms => IbmCloudKmsCreate::decode(object).map(Self::IbmCloudKms),
            KeystoreType::Cca => CcaCreate::decode(object).map(Self::Cca),
            KeystoreType::Other(value) => Err(DecodeError::UnrecognizedVariant {
                family: Self::NAME,
                field: "type".to_string(),
                value,
            }),
        }
    }
}

/// Fields shared by every keystore update request. Unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeystoreUpdateCommon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl KeystoreUpdateCommon {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }
}

impl Decode for KeystoreUpdateCommon {
    const NAME: &'static str = "KeystoreUpdateRequest";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            name: fields.optional("name")?,
            description: fields.optional("description")?,
            groups: fields.optional("groups")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AwsKmsUpdate {
    #[serde(flatten)]
    pub common: KeystoreUpdateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_secret_access_key: Option<String>,
}

impl Decode for AwsKmsUpdate {
    const NAME: &'static str = "AwsKmsUpdate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreUpdateCommon::decode(object)?,
            aws_region: fields.optional("aws_region")?,
            aws_access_key_id: fields.optional("aws_access_key_id")?,
            aws_secret_access_key: fields.optional("aws_secret_access_key")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AzureKeyVaultUpdate {
    #[serde(flatten)]
    pub common: KeystoreUpdateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_service_principal_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_service_principal_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_environment: Option<String>,
}

impl Decode for AzureKeyVaultUpdate {
    const NAME: &'static str = "AzureKeyVaultUpdate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreUpdateCommon::decode(object)?,
            azure_service_principal_client_id: fields
                .optional("azure_service_principal_client_id")?,
            azure_service_principal_password: fields
                .optional("azure_service_principal_password")?,
            azure_tenant: fields.optional("azure_tenant")?,
            azure_environment: fields.optional("azure_environment")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoogleKmsUpdate {
    #[serde(flatten)]
    pub common: KeystoreUpdateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_credentials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_key_ring: Option<String>,
}

impl Decode for GoogleKmsUpdate {
    const NAME: &'static str = "GoogleKmsUpdate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreUpdateCommon::decode(object)?,
            google_credentials: fields.optional("google_credentials")?,
            google_location: fields.optional("google_location")?,
            google_key_ring: fields.optional("google_key_ring")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IbmCloudKmsUpdate {
    #[serde(flatten)]
    pub common: KeystoreUpdateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_iam_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibm_key_ring: Option<String>,
}

impl Decode for IbmCloudKmsUpdate {
    const NAME: &'static str = "IbmCloudKmsUpdate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreUpdateCommon::decode(object)?,
            ibm_api_endpoint: fields.optional("ibm_api_endpoint")?,
            ibm_iam_endpoint: fields.optional("ibm_iam_endpoint")?,
            ibm_api_key: fields.optional("ibm_api_key")?,
            ibm_key_ring: fields.optional("ibm_key_ring")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CcaUpdate {
    #[serde(flatten)]
    pub common: KeystoreUpdateCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cca_use_tag: Option<String>,
}

impl Decode for CcaUpdate {
    const NAME: &'static str = "CcaUpdate";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            common: KeystoreUpdateCommon::decode(object)?,
            cca_use_tag: fields.optional("cca_use_tag")?,
        })
    }
}

/// Body of a keystore update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeystoreUpdateRequest {
    AwsKms(AwsKmsUpdate),
    AzureKeyVault(AzureKeyVaultUpdate),
    GoogleKms(GoogleKmsUpdate),
    IbmCloudKms(IbmCloudKmsUpdate),
    Cca(CcaUpdate),
}

impl KeystoreUpdateRequest {
    pub fn keystore_type(&self) -> KeystoreType {
        match self {
            Self::AwsKms(_) => KeystoreType::AwsKms,
            Self::AzureKeyVault(_) => KeystoreType::AzureKeyVault,
            Self::GoogleKms(_) => KeystoreType::GoogleKms,
            Self::IbmCloudKms(_) => KeystoreType::IbmCloudKms,
            Self::Cca(_) => KeystoreType::Cca,
        }
    }

    pub fn common(&self) -> &KeystoreUpdateCommon {
        match self {
            Self::AwsKms(r) => &r.common,
            Self::AzureKeyVault(r) => &r.common,
            Self::GoogleKms(r) => &r.common,
            Self::IbmCloudKms(r) => &r.common,
            Self::Cca(r) => &r.common,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.common().validate()
    }
}

impl Decode for KeystoreUpdateRequest {
    const NAME: &'static str = "KeystoreUpdateRequest";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let tag = Fields::new(object).discriminator(Self::NAME, "type")?;
        match KeystoreType::from(tag) {
            KeystoreType::AwsKms => AwsKmsUpdate::decode(object).map(Self::AwsKms),
            KeystoreType::AzureKeyVault => {
                AzureKeyVaultUpdate::decode(object).map(Self::AzureKeyVault)
            }
            KeystoreType::GoogleKms => GoogleKmsUpdate::decode(object).map(Self::GoogleKms),
            KeystoreType::IbmCloudKms => IbmCloudKmsUpdate::decode(object).map(Self::IbmCloudKms),
            KeystoreType::Cca => CcaUpdate::decode(object).map(Self::Cca),
            KeystoreType::Other(value) => Err(DecodeError::UnrecognizedVariant {
                family: Self::NAME,
                field: "type".to_string(),
                value,
            }),
        }
    }
}
