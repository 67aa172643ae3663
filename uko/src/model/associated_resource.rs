//! Cloud resources that reference a managed key.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{KeystoreReference, ManagedKeyReference, VaultReference};
use crate::decode::{Decode, Fields};
use crate::error::DecodeError;

/// An external resource (a storage bucket, a database) protected by a
/// managed key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociatedResource {
    pub id: String,
    pub name: Option<String>,
    /// Resource kind as reported by the owning cloud, e.g. `cos_bucket`.
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub vault: Option<VaultReference>,
    pub managed_key: Option<ManagedKeyReference>,
    pub referenced_keystore: Option<KeystoreReference>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub href: Option<String>,
}

impl Decode for AssociatedResource {
    const NAME: &'static str = "AssociatedResource";

    fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields::new(object);
        Ok(Self {
            id: fields.required("id")?,
            name: fields.optional("name")?,
            resource_type: fields.optional("type")?,
            vault: fields.optional("vault")?,
            managed_key: fields.optional("managed_key")?,
            referenced_keystore: fields.optional("referenced_keystore")?,
            created_at: fields.optional("created_at")?,
            updated_at: fields.optional("updated_at")?,
            href: fields.optional("href")?,
        })
    }
}
