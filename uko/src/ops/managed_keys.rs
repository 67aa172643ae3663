//! Managed key endpoints, including the lifecycle actions.

use super::{
    ConditionalOptions, ResourceOptions, UpdateOptions, VAULT_HEADER, api_request, comma_joined,
};
use crate::client::{Response, UkoClient};
use crate::error::UkoError;
use crate::method::RestMethod;
use crate::model::{
    AssociatedResourceList, KeyAlgorithm, ManagedKey, ManagedKeyCreate, ManagedKeyList,
    ManagedKeyState, ManagedKeyUpdate, StatusInKeystoreList,
};

/// Options for [`UkoClient::list_managed_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListManagedKeysOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub vault_ids: Vec<String>,
    pub algorithms: Vec<KeyAlgorithm>,
    pub states: Vec<ManagedKeyState>,
    /// Label match; `*` wildcards are passed through.
    pub label: Option<String>,
    pub template_name: Option<String>,
}

list_options!(ListManagedKeysOptions);

impl ListManagedKeysOptions {
    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_ids.push(vault_id.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: KeyAlgorithm) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    pub fn with_state(mut self, state: ManagedKeyState) -> Self {
        self.states.push(state);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = Some(template_name.into());
        self
    }
}

/// Options for [`UkoClient::create_managed_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateManagedKeyOptions {
    pub body: ManagedKeyCreate,
}

impl CreateManagedKeyOptions {
    pub fn new(body: ManagedKeyCreate) -> Self {
        Self { body }
    }
}

/// Options for [`UkoClient::update_managed_key_from_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateManagedKeyFromTemplateOptions {
    pub target: ConditionalOptions,
    /// Report what would change without applying it.
    pub dry_run: Option<bool>,
}

impl UpdateManagedKeyFromTemplateOptions {
    pub fn new(
        id: impl Into<String>,
        vault_id: impl Into<String>,
        if_match: impl Into<String>,
    ) -> Self {
        Self {
            target: ConditionalOptions::new(id, if_match).with_vault(vault_id),
            dry_run: None,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }
}

pub type GetManagedKeyOptions = ResourceOptions;
pub type UpdateManagedKeyOptions = UpdateOptions<ManagedKeyUpdate>;
pub type DeleteManagedKeyOptions = ConditionalOptions;
pub type ActivateManagedKeyOptions = ConditionalOptions;
pub type DeactivateManagedKeyOptions = ConditionalOptions;
pub type DestroyManagedKeyOptions = ConditionalOptions;
pub type SyncManagedKeyOptions = ConditionalOptions;

/// Options for [`UkoClient::get_key_distribution_status_for_keystores`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetKeyDistributionStatusForKeystoresOptions {
    pub key: ResourceOptions,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

list_options!(GetKeyDistributionStatusForKeystoresOptions);

impl GetKeyDistributionStatusForKeystoresOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: ResourceOptions::new(id),
            ..Default::default()
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.key = self.key.with_vault(vault_id);
        self
    }
}

/// Options for [`UkoClient::list_associated_resources_for_managed_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAssociatedResourcesForManagedKeyOptions {
    pub key: ResourceOptions,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

list_options!(ListAssociatedResourcesForManagedKeyOptions);

impl ListAssociatedResourcesForManagedKeyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: ResourceOptions::new(id),
            ..Default::default()
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.key = self.key.with_vault(vault_id);
        self
    }
}

list_operation! {
    /// Returns a pager over managed keys.
    ListManagedKeysOptions => ManagedKeyList, list_managed_keys, managed_keys_pager
}

list_operation! {
    /// Returns a pager over resources protected by one managed key.
    ListAssociatedResourcesForManagedKeyOptions => AssociatedResourceList,
    list_associated_resources_for_managed_key,
    managed_key_associated_resources_pager
}

impl UkoClient {
    /// Lists managed keys, one page per call.
    pub async fn list_managed_keys(
        &self,
        options: &ListManagedKeysOptions,
    ) -> Result<Response<ManagedKeyList>, UkoError> {
        options.validate_paging()?;
        let request = options
            .paging(api_request(RestMethod::Get).segment("managed_keys"))
            .query_opt("vault.id", comma_joined(&options.vault_ids))
            .query_opt("algorithm", comma_joined(&options.algorithms))
            .query_opt("state", comma_joined(&options.states))
            .query_opt("label", options.label.as_deref())
            .query_opt("template.name", options.template_name.as_deref());
        self.send(request).await
    }

    /// Creates a managed key from a template and installs it in the
    /// template's keystores.
    pub async fn create_managed_key(
        &self,
        options: &CreateManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        options.body.validate()?;
        let request = api_request(RestMethod::Post)
            .segment("managed_keys")
            .header(VAULT_HEADER, &options.body.vault.id)
            .json(&options.body)?;
        self.send(request).await
    }

    pub async fn get_managed_key(
        &self,
        options: &GetManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        options.validate()?;
        self.send(options.request(RestMethod::Get, "managed_keys"))
            .await
    }

    pub async fn update_managed_key(
        &self,
        options: &UpdateManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        options.target.validate(true)?;
        options.body.validate()?;
        let request = options
            .target
            .request(RestMethod::Patch, "managed_keys")
            .json(&options.body)?;
        self.send(request).await
    }

    /// Deletes a managed key. Only destroyed keys can be deleted.
    pub async fn delete_managed_key(
        &self,
        options: &DeleteManagedKeyOptions,
    ) -> Result<Response<()>, UkoError> {
        options.validate(true)?;
        self.send_empty(options.request(RestMethod::Delete, "managed_keys"))
            .await
    }

    pub async fn activate_managed_key(
        &self,
        options: &ActivateManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        self.managed_key_action(options, "activate").await
    }

    pub async fn deactivate_managed_key(
        &self,
        options: &DeactivateManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        self.managed_key_action(options, "deactivate").await
    }

    /// Destroys the key material in every keystore. Not reversible.
    pub async fn destroy_managed_key(
        &self,
        options: &DestroyManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        self.managed_key_action(options, "destroy").await
    }

    /// Re-installs the key in keystores where its state has drifted.
    pub async fn sync_managed_key(
        &self,
        options: &SyncManagedKeyOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        self.managed_key_action(options, "sync").await
    }

    /// Applies the current template definition to the key.
    pub async fn update_managed_key_from_template(
        &self,
        options: &UpdateManagedKeyFromTemplateOptions,
    ) -> Result<Response<ManagedKey>, UkoError> {
        options.target.validate(true)?;
        let request = options
            .target
            .request(RestMethod::Post, "managed_keys")
            .segment("update_from_template")
            .query_opt("dry_run", options.dry_run);
        self.send(request).await
    }

    /// Reports per-keystore installation state of a managed key.
    pub async fn get_key_distribution_status_for_keystores(
        &self,
        options: &GetKeyDistributionStatusForKeystoresOptions,
    ) -> Result<Response<StatusInKeystoreList>, UkoError> {
        options.key.validate()?;
        options.validate_paging()?;
        let request = options.paging(
            options
                .key
                .request(RestMethod::Get, "managed_keys")
                .segment("status_in_keystores"),
        );
        self.send(request).await
    }

    pub async fn list_associated_resources_for_managed_key(
        &self,
        options: &ListAssociatedResourcesForManagedKeyOptions,
    ) -> Result<Response<AssociatedResourceList>, UkoError> {
        options.key.validate()?;
        options.validate_paging()?;
        let request = options.paging(
            options
                .key
                .request(RestMethod::Get, "managed_keys")
                .segment("associated_resources"),
        );
        self.send(request).await
    }

    async fn managed_key_action(
        &self,
        options: &ConditionalOptions,
        action: &str,
    ) -> Result<Response<ManagedKey>, UkoError> {
        options.validate(true)?;
        let request = options
            .request(RestMethod::Post, "managed_keys")
            .segment(action);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters_are_comma_joined() {
        let options = ListManagedKeysOptions::default()
            .with_vault("v-1")
            .with_vault("v-2")
            .with_state(ManagedKeyState::Active)
            .with_state(ManagedKeyState::PreActivation)
            .with_limit(25);
        assert_eq!(
            comma_joined(&options.states).as_deref(),
            Some("active,pre_activation")
        );
        assert_eq!(comma_joined(&options.vault_ids).as_deref(), Some("v-1,v-2"));

        let request = options.paging(api_request(RestMethod::Get).segment("managed_keys"));
        assert!(request.query_pairs().contains(&("limit".to_string(), "25".to_string())));
        assert!(!request.query_pairs().iter().any(|(name, _)| name == "offset"));
    }

    #[test]
    fn test_sub_resource_options_share_paging() {
        let options = ListAssociatedResourcesForManagedKeyOptions::new("k-1")
            .with_vault("v-1")
            .with_offset(20);
        assert_eq!(crate::pager::ListOptions::offset(&options), Some(20));
        assert_eq!(options.key.vault_id.as_deref(), Some("v-1"));
    }

    #[test]
    fn test_template_update_requires_vault() {
        let options = UpdateManagedKeyFromTemplateOptions::new("k-1", "", "etag");
        assert!(matches!(
            options.target.validate(true),
            Err(crate::ValidationError::EmptyValue { field: "vault_id" })
        ));
    }
}
