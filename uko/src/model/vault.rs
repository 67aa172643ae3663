//! Vaults: the root container for keys, keystores and templates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{Decode, Fields};
use crate::error::{DecodeError, ValidationError, require_non_empty};

/// A vault as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub keys_count: Option<i64>,
    pub keystores_count: Option<i64>,
    pub key_templates_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub href: Option<String>,
}

impl Decode for Vault {
    const NAME: &'static str = "Vault";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            name: fields.required("name")?,
            description: fields.optional("description")?,
            keys_count: fields.optional("keys_count")?,
            keystores_count: fields.optional("keystores_count")?,
            key_templates_count: fields.optional("key_templates_count")?,
            created_at: fields.optional("created_at")?,
            updated_at: fields.optional("updated_at")?,
            created_by: fields.optional("created_by")?,
            updated_by: fields.optional("updated_by")?,
            href: fields.optional("href")?,
        })
    }
}

/// Body of a vault creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VaultCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}

/// Body of a vault update request. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaultUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VaultUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }
}
