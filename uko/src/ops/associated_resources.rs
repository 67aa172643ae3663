//! Associated resource endpoints.

use super::{ResourceOptions, api_request, comma_joined};
use crate::client::{Response, UkoClient};
use crate::error::UkoError;
use crate::method::RestMethod;
use crate::model::{AssociatedResource, AssociatedResourceList};

/// Options for [`UkoClient::list_associated_resources`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAssociatedResourcesOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub vault_ids: Vec<String>,
}

list_options!(ListAssociatedResourcesOptions);

impl ListAssociatedResourcesOptions {
    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_ids.push(vault_id.into());
        self
    }
}

pub type GetAssociatedResourceOptions = ResourceOptions;

list_operation! {
    /// Returns a pager over every associated resource.
    ListAssociatedResourcesOptions => AssociatedResourceList,
    list_associated_resources,
    associated_resources_pager
}

impl UkoClient {
    pub async fn list_associated_resources(
        &self,
        options: &ListAssociatedResourcesOptions,
    ) -> Result<Response<AssociatedResourceList>, UkoError> {
        options.validate_paging()?;
        let request = options
            .paging(api_request(RestMethod::Get).segment("associated_resources"))
            .query_opt("vault.id", comma_joined(&options.vault_ids));
        self.send(request).await
    }

    pub async fn get_associated_resource(
        &self,
        options: &GetAssociatedResourceOptions,
    ) -> Result<Response<AssociatedResource>, UkoError> {
        options.validate()?;
        self.send(options.request(RestMethod::Get, "associated_resources"))
            .await
    }
}
