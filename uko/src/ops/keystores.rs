//! Keystore endpoints.

use strum::{Display, EnumString};

use super::{
    ConditionalOptions, ResourceOptions, UpdateOptions, VAULT_HEADER, api_request, comma_joined,
};
use crate::client::{Response, UkoClient};
use crate::error::{UkoError, require_non_empty};
use crate::method::RestMethod;
use crate::model::{
    AssociatedResourceList, Keystore, KeystoreCreationRequest, KeystoreList, KeystoreStatus,
    KeystoreType, KeystoreUpdateRequest, ManagedKeyList, ManagedKeyState,
};

/// Options for [`UkoClient::list_keystores`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListKeystoresOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    /// Only keystores of these vendors.
    pub types: Vec<KeystoreType>,
    /// Only keystores in these vaults.
    pub vault_ids: Vec<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
}

list_options!(ListKeystoresOptions);

impl ListKeystoresOptions {
    pub fn with_type(mut self, keystore_type: KeystoreType) -> Self {
        self.types.push(keystore_type);
        self
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_ids.push(vault_id.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Options for [`UkoClient::create_keystore`].
///
/// The `UKO-Vault` header is taken from the body's vault reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeystoreOptions {
    pub body: KeystoreCreationRequest,
    /// Only test the connection; do not create the keystore.
    pub dry_run: Option<bool>,
}

impl CreateKeystoreOptions {
    pub fn new(body: KeystoreCreationRequest) -> Self {
        Self {
            body,
            dry_run: None,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }
}

/// What happens to keys of a deleted keystore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum KeystoreDeleteMode {
    /// Fail when the keystore still holds managed keys.
    Restrict,
    /// Deactivate the keys held by the keystore.
    Deactivate,
}

/// Options for [`UkoClient::delete_keystore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteKeystoreOptions {
    pub target: ConditionalOptions,
    pub mode: Option<KeystoreDeleteMode>,
}

impl DeleteKeystoreOptions {
    pub fn new(
        id: impl Into<String>,
        vault_id: impl Into<String>,
        if_match: impl Into<String>,
    ) -> Self {
        Self {
            target: ConditionalOptions::new(id, if_match).with_vault(vault_id),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: KeystoreDeleteMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

pub type GetKeystoreOptions = ResourceOptions;
pub type GetKeystoreStatusOptions = ResourceOptions;
pub type UpdateKeystoreOptions = UpdateOptions<KeystoreUpdateRequest>;

/// Options for [`UkoClient::list_managed_keys_from_keystore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListManagedKeysFromKeystoreOptions {
    pub keystore: ResourceOptions,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub label: Option<String>,
    pub states: Vec<ManagedKeyState>,
}

list_options!(ListManagedKeysFromKeystoreOptions);

impl ListManagedKeysFromKeystoreOptions {
    pub fn new(keystore_id: impl Into<String>) -> Self {
        Self {
            keystore: ResourceOptions::new(keystore_id),
            ..Default::default()
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.keystore = self.keystore.with_vault(vault_id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_state(mut self, state: ManagedKeyState) -> Self {
        self.states.push(state);
        self
    }
}

/// Options for [`UkoClient::list_associated_resources_for_target_keystore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAssociatedResourcesForTargetKeystoreOptions {
    pub keystore: ResourceOptions,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

list_options!(ListAssociatedResourcesForTargetKeystoreOptions);

impl ListAssociatedResourcesForTargetKeystoreOptions {
    pub fn new(keystore_id: impl Into<String>) -> Self {
        Self {
            keystore: ResourceOptions::new(keystore_id),
            ..Default::default()
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.keystore = self.keystore.with_vault(vault_id);
        self
    }
}

list_operation! {
    /// Returns a pager over keystores.
    ListKeystoresOptions => KeystoreList, list_keystores, keystores_pager
}

list_operation! {
    /// Returns a pager over the managed keys installed in one keystore.
    ListManagedKeysFromKeystoreOptions => ManagedKeyList,
    list_managed_keys_from_keystore,
    keystore_managed_keys_pager
}

list_operation! {
    /// Returns a pager over resources protected through one keystore.
    ListAssociatedResourcesForTargetKeystoreOptions => AssociatedResourceList,
    list_associated_resources_for_target_keystore,
    keystore_associated_resources_pager
}

impl UkoClient {
    /// Lists keystores, one page per call.
    ///
    /// Items are [`KeystoreSummary`](crate::model::KeystoreSummary) values;
    /// call `refine()` for the vendor-specific variant.
    pub async fn list_keystores(
        &self,
        options: &ListKeystoresOptions,
    ) -> Result<Response<KeystoreList>, UkoError> {
        options.validate_paging()?;
        let request = options
            .paging(api_request(RestMethod::Get).segment("keystores"))
            .query_opt("type", comma_joined(&options.types))
            .query_opt("vault.id", comma_joined(&options.vault_ids))
            .query_opt("name", options.name.as_deref())
            .query_opt("description", options.description.as_deref())
            .query_opt("groups", options.group.as_deref());
        self.send(request).await
    }

    /// Creates a keystore, or with `dry_run` only tests its connection.
    pub async fn create_keystore(
        &self,
        options: &CreateKeystoreOptions,
    ) -> Result<Response<Keystore>, UkoError> {
        options.body.validate()?;
        let request = api_request(RestMethod::Post)
            .segment("keystores")
            .header(VAULT_HEADER, &options.body.common().vault.id)
            .query_opt("dry_run", options.dry_run)
            .json(&options.body)?;
        self.send(request).await
    }

    pub async fn get_keystore(
        &self,
        options: &GetKeystoreOptions,
    ) -> Result<Response<Keystore>, UkoError> {
        options.validate()?;
        self.send(options.request(RestMethod::Get, "keystores"))
            .await
    }

    pub async fn update_keystore(
        &self,
        options: &UpdateKeystoreOptions,
    ) -> Result<Response<Keystore>, UkoError> {
        options.target.validate(true)?;
        options.body.validate()?;
        let request = options
            .target
            .request(RestMethod::Patch, "keystores")
            .json(&options.body)?;
        self.send(request).await
    }

    pub async fn delete_keystore(
        &self,
        options: &DeleteKeystoreOptions,
    ) -> Result<Response<()>, UkoError> {
        options.target.validate(true)?;
        let request = options
            .target
            .request(RestMethod::Delete, "keystores")
            .query_opt("mode", options.mode);
        self.send_empty(request).await
    }

    /// Returns the connection health of a keystore.
    pub async fn get_keystore_status(
        &self,
        options: &GetKeystoreStatusOptions,
    ) -> Result<Response<KeystoreStatus>, UkoError> {
        options.validate()?;
        let request = options
            .request(RestMethod::Get, "keystores")
            .segment("status");
        self.send(request).await
    }

    pub async fn list_managed_keys_from_keystore(
        &self,
        options: &ListManagedKeysFromKeystoreOptions,
    ) -> Result<Response<ManagedKeyList>, UkoError> {
        options.keystore.validate()?;
        options.validate_paging()?;
        if let Some(label) = &options.label {
            require_non_empty("label", label)?;
        }
        let request = options
            .paging(
                options
                    .keystore
                    .request(RestMethod::Get, "keystores")
                    .segment("managed_keys"),
            )
            .query_opt("label", options.label.as_deref())
            .query_opt("state", comma_joined(&options.states));
        self.send(request).await
    }

    pub async fn list_associated_resources_for_target_keystore(
        &self,
        options: &ListAssociatedResourcesForTargetKeystoreOptions,
    ) -> Result<Response<AssociatedResourceList>, UkoError> {
        options.keystore.validate()?;
        options.validate_paging()?;
        let request = options.paging(
            options
                .keystore
                .request(RestMethod::Get, "keystores")
                .segment("associated_resources"),
        );
        self.send(request).await
    }
}
