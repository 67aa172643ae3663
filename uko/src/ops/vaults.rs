//! Vault endpoints.

use super::{ConditionalOptions, ResourceOptions, UpdateOptions, api_request};
use crate::client::{Response, UkoClient};
use crate::error::UkoError;
use crate::method::RestMethod;
use crate::model::{Vault, VaultCreate, VaultList, VaultUpdate};

/// Options for [`UkoClient::list_vaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVaultsOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    /// Exact vault name.
    pub name: Option<String>,
    /// Substring of the vault description.
    pub description: Option<String>,
}

list_options!(ListVaultsOptions);

impl ListVaultsOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Options for [`UkoClient::create_vault`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVaultOptions {
    pub body: VaultCreate,
}

impl CreateVaultOptions {
    pub fn new(body: VaultCreate) -> Self {
        Self { body }
    }
}

pub type GetVaultOptions = ResourceOptions;
pub type UpdateVaultOptions = UpdateOptions<VaultUpdate>;
pub type DeleteVaultOptions = ConditionalOptions;

list_operation! {
    /// Returns a pager over all vaults.
    ListVaultsOptions => VaultList, list_vaults, vaults_pager
}

impl UkoClient {
    /// Lists vaults, one page per call.
    pub async fn list_vaults(
        &self,
        options: &ListVaultsOptions,
    ) -> Result<Response<VaultList>, UkoError> {
        options.validate_paging()?;
        let request = options
            .paging(api_request(RestMethod::Get).segment("vaults"))
            .query_opt("name", options.name.as_deref())
            .query_opt("description", options.description.as_deref());
        self.send(request).await
    }

    pub async fn create_vault(
        &self,
        options: &CreateVaultOptions,
    ) -> Result<Response<Vault>, UkoError> {
        options.body.validate()?;
        let request = api_request(RestMethod::Post)
            .segment("vaults")
            .json(&options.body)?;
        self.send(request).await
    }

    pub async fn get_vault(&self, options: &GetVaultOptions) -> Result<Response<Vault>, UkoError> {
        options.validate()?;
        self.send(options.request(RestMethod::Get, "vaults")).await
    }

    /// Updates a vault. `If-Match` must carry the ETag of the last read.
    pub async fn update_vault(
        &self,
        options: &UpdateVaultOptions,
    ) -> Result<Response<Vault>, UkoError> {
        options.target.validate(false)?;
        options.body.validate()?;
        let request = options
            .target
            .request(RestMethod::Patch, "vaults")
            .json(&options.body)?;
        self.send(request).await
    }

    /// Deletes an empty vault.
    pub async fn delete_vault(
        &self,
        options: &DeleteVaultOptions,
    ) -> Result<Response<()>, UkoError> {
        options.validate(false)?;
        self.send_empty(options.request(RestMethod::Delete, "vaults"))
            .await
    }
}
