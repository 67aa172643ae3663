//! Key templates: reusable key properties plus keystore distribution rules.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    KeyAlgorithm, ManagedKeyState, TargetKeystoreReference, TemplateState, VaultReference,
    VaultReferenceInCreationRequest,
};
use crate::decode::{Decode, Fields};
use crate::error::{DecodeError, ValidationError, require_non_empty};

/// A keystore group and vendor a template distributes keys to.
pub type KeystoreTemplate = TargetKeystoreReference;

/// Key properties carried by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyProperties {
    pub size: Option<String>,
    pub algorithm: KeyAlgorithm,
    /// ISO 8601 duration relative to key creation, e.g. `P1Y`.
    pub activation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub state: Option<ManagedKeyState>,
}

impl Decode for KeyProperties {
    const NAME: &'static str = "KeyProperties";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            size: fields.optional("size")?,
            algorithm: fields.required("algorithm")?,
            activation_date: fields.optional("activation_date")?,
            expiration_date: fields.optional("expiration_date")?,
            state: fields.optional("state")?,
        })
    }
}

/// A key template as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub vault: Option<VaultReference>,
    pub version: Option<i64>,
    pub description: Option<String>,
    pub state: Option<TemplateState>,
    pub key: Option<KeyProperties>,
    pub keystores: Vec<KeystoreTemplate>,
    pub keys_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub href: Option<String>,
}

impl Template {
    pub fn is_archived(&self) -> bool {
        self.state == Some(TemplateState::Archived)
    }
}

impl Decode for Template {
    const NAME: &'static str = "Template";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            name: fields.required("name")?,
            vault: fields.optional("vault")?,
            version: fields.optional("version")?,
            description: fields.optional("description")?,
            state: fields.optional("state")?,
            key: fields.optional_model("key")?,
            keystores: fields.list("keystores")?,
            keys_count: fields.optional("keys_count")?,
            created_at: fields.optional("created_at")?,
            updated_at: fields.optional("updated_at")?,
            created_by: fields.optional("created_by")?,
            updated_by: fields.optional("updated_by")?,
            href: fields.optional("href")?,
        })
    }
}

/// Key properties of a template creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateKeyProperties {
    pub size: String,
    pub algorithm: KeyAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub state: ManagedKeyState,
}

impl TemplateKeyProperties {
    pub fn new(algorithm: KeyAlgorithm, size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            algorithm,
            activation_date: None,
            expiration_date: None,
            state: ManagedKeyState::Active,
        }
    }

    pub fn with_state(mut self, state: ManagedKeyState) -> Self {
        self.state = state;
        self
    }

    pub fn with_expiration(mut self, duration: impl Into<String>) -> Self {
        self.expiration_date = Some(duration.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("key.size", &self.size)?;
        if !self.algorithm.is_known() {
            return Err(ValidationError::invalid(
                "key.algorithm",
                format!("unsupported algorithm '{}'", self.algorithm),
            ));
        }
        match self.state {
            ManagedKeyState::Active | ManagedKeyState::PreActivation => Ok(()),
            ref other => Err(ValidationError::invalid(
                "key.state",
                format!("templates cannot create keys in state '{other}'"),
            )),
        }
    }
}

/// Body of a template creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCreate {
    pub vault: VaultReferenceInCreationRequest,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub key: TemplateKeyProperties,
    pub keystores: Vec<KeystoreTemplate>,
}

impl TemplateCreate {
    pub fn new(
        vault_id: impl Into<String>,
        name: impl Into<String>,
        key: TemplateKeyProperties,
    ) -> Self {
        Self {
            vault: VaultReferenceInCreationRequest::new(vault_id),
            name: name.into(),
            description: None,
            key,
            keystores: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keystore(mut self, keystore: KeystoreTemplate) -> Self {
        self.keystores.push(keystore);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("vault.id", &self.vault.id)?;
        require_non_empty("name", &self.name)?;
        self.key.validate()?;
        if self.keystores.is_empty() {
            return Err(ValidationError::missing_field("keystores"));
        }
        Ok(())
    }
}

/// Body of a template update request. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystores: Option<Vec<KeystoreTemplate>>,
}

impl TemplateUpdate {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keystores(mut self, keystores: Vec<KeystoreTemplate>) -> Self {
        self.keystores = Some(keystores);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.keystores.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::invalid("keystores", "must not be empty"));
        }
        Ok(())
    }
}
