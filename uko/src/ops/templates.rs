//! Key template endpoints.

use super::{
    ConditionalOptions, ResourceOptions, UpdateOptions, VAULT_HEADER, api_request, comma_joined,
};
use crate::client::{Response, UkoClient};
use crate::error::UkoError;
use crate::method::RestMethod;
use crate::model::{
    KeyAlgorithm, Template, TemplateCreate, TemplateList, TemplateState, TemplateUpdate,
};

/// Options for [`UkoClient::list_key_templates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListKeyTemplatesOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub vault_ids: Vec<String>,
    pub name: Option<String>,
    pub algorithms: Vec<KeyAlgorithm>,
    pub state: Option<TemplateState>,
}

list_options!(ListKeyTemplatesOptions);

impl ListKeyTemplatesOptions {
    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_ids.push(vault_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: KeyAlgorithm) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    pub fn with_state(mut self, state: TemplateState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Options for [`UkoClient::create_key_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeyTemplateOptions {
    pub body: TemplateCreate,
}

impl CreateKeyTemplateOptions {
    pub fn new(body: TemplateCreate) -> Self {
        Self { body }
    }
}

pub type GetKeyTemplateOptions = ResourceOptions;
pub type UpdateKeyTemplateOptions = UpdateOptions<TemplateUpdate>;
pub type DeleteKeyTemplateOptions = ConditionalOptions;
pub type ArchiveKeyTemplateOptions = ConditionalOptions;
pub type UnarchiveKeyTemplateOptions = ConditionalOptions;

list_operation! {
    /// Returns a pager over key templates.
    ListKeyTemplatesOptions => TemplateList, list_key_templates, templates_pager
}

impl UkoClient {
    /// Lists key templates, one page per call.
    pub async fn list_key_templates(
        &self,
        options: &ListKeyTemplatesOptions,
    ) -> Result<Response<TemplateList>, UkoError> {
        options.validate_paging()?;
        let request = options
            .paging(api_request(RestMethod::Get).segment("templates"))
            .query_opt("vault.id", comma_joined(&options.vault_ids))
            .query_opt("name", options.name.as_deref())
            .query_opt("key.algorithm", comma_joined(&options.algorithms))
            .query_opt("state", options.state.as_ref());
        self.send(request).await
    }

    pub async fn create_key_template(
        &self,
        options: &CreateKeyTemplateOptions,
    ) -> Result<Response<Template>, UkoError> {
        options.body.validate()?;
        let request = api_request(RestMethod::Post)
            .segment("templates")
            .header(VAULT_HEADER, &options.body.vault.id)
            .json(&options.body)?;
        self.send(request).await
    }

    pub async fn get_key_template(
        &self,
        options: &GetKeyTemplateOptions,
    ) -> Result<Response<Template>, UkoError> {
        options.validate()?;
        self.send(options.request(RestMethod::Get, "templates"))
            .await
    }

    pub async fn update_key_template(
        &self,
        options: &UpdateKeyTemplateOptions,
    ) -> Result<Response<Template>, UkoError> {
        options.target.validate(true)?;
        options.body.validate()?;
        let request = options
            .target
            .request(RestMethod::Patch, "templates")
            .json(&options.body)?;
        self.send(request).await
    }

    /// Deletes a template that no managed key refers to.
    pub async fn delete_key_template(
        &self,
        options: &DeleteKeyTemplateOptions,
    ) -> Result<Response<()>, UkoError> {
        options.validate(true)?;
        self.send_empty(options.request(RestMethod::Delete, "templates"))
            .await
    }

    /// Archives a template so no new keys can be created from it.
    pub async fn archive_key_template(
        &self,
        options: &ArchiveKeyTemplateOptions,
    ) -> Result<Response<Template>, UkoError> {
        options.validate(true)?;
        let request = options
            .request(RestMethod::Post, "templates")
            .segment("archive");
        self.send(request).await
    }

    pub async fn unarchive_key_template(
        &self,
        options: &UnarchiveKeyTemplateOptions,
    ) -> Result<Response<Template>, UkoError> {
        options.validate(true)?;
        let request = options
            .request(RestMethod::Post, "templates")
            .segment("unarchive");
        self.send(request).await
    }
}
