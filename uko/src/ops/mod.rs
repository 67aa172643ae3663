//! Endpoint operations.
//!
//! Every operation is an async method on [`UkoClient`](crate::UkoClient)
//! taking an options struct. Options are validated before any I/O, then
//! turned into a single request under `/api/v4`; the response is decoded
//! into a [`Response`](crate::client::Response).
//!
//! Vault-scoped resources accept a `UKO-Vault` header (`vault_id`), and
//! changes to existing resources require the `If-Match` header carrying the
//! ETag of the last read.

use crate::client::PreparedRequest;
use crate::error::{ValidationError, require_non_empty};
use crate::method::RestMethod;

/// Declares paging builders and [`ListOptions`](crate::pager::ListOptions)
/// for a list options struct with `limit`, `offset` and `sort` fields.
macro_rules! list_options {
    ($name:ident) => {
        impl $name {
            /// Sets the page size (1 to 1000).
            pub fn with_limit(mut self, limit: i64) -> Self {
                self.limit = Some(limit);
                self
            }

            pub fn with_offset(mut self, offset: i64) -> Self {
                self.offset = Some(offset);
                self
            }

            /// Sets the sort fields, e.g. `-created_at`.
            pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
                self.sort = Some(sort.into());
                self
            }

            fn paging(
                &self,
                request: $crate::client::PreparedRequest,
            ) -> $crate::client::PreparedRequest {
                request
                    .query_opt("limit", self.limit)
                    .query_opt("offset", self.offset)
                    .query_opt("sort", self.sort.as_deref())
            }

            fn validate_paging(&self) -> Result<(), $crate::error::ValidationError> {
                $crate::ops::validate_paging(self.limit, self.offset)
            }
        }

        impl $crate::pager::ListOptions for $name {
            fn offset(&self) -> Option<i64> {
                self.offset
            }

            fn set_offset(&mut self, offset: i64) {
                self.offset = Some(offset);
            }
        }
    };
}

/// Binds a list operation to the pager and declares its pager constructor.
macro_rules! list_operation {
    ($(#[$meta:meta])* $options:ty => $page:ty, $op:ident, $pager:ident) => {
        impl $crate::pager::ListOperation<$options> for $crate::UkoClient {
            type Page = $page;

            async fn list_page(&self, options: &$options) -> Result<$page, $crate::UkoError> {
                Ok(self.$op(options).await?.result)
            }
        }

        impl $crate::UkoClient {
            $(#[$meta])*
            pub fn $pager(
                &self,
                options: &$options,
            ) -> Result<$crate::pager::Pager<'_, Self, $options>, $crate::PagerError> {
                $crate::pager::Pager::new(self, options)
            }
        }
    };
}

mod associated_resources;
mod keystores;
mod managed_keys;
mod templates;
mod vaults;

pub use associated_resources::{GetAssociatedResourceOptions, ListAssociatedResourcesOptions};
pub use keystores::{
    CreateKeystoreOptions, DeleteKeystoreOptions, GetKeystoreOptions, GetKeystoreStatusOptions,
    KeystoreDeleteMode, ListAssociatedResourcesForTargetKeystoreOptions, ListKeystoresOptions,
    ListManagedKeysFromKeystoreOptions, UpdateKeystoreOptions,
};
pub use managed_keys::{
    ActivateManagedKeyOptions, CreateManagedKeyOptions, DeactivateManagedKeyOptions,
    DeleteManagedKeyOptions, DestroyManagedKeyOptions,
    GetKeyDistributionStatusForKeystoresOptions, GetManagedKeyOptions,
    ListAssociatedResourcesForManagedKeyOptions, ListManagedKeysOptions, SyncManagedKeyOptions,
    UpdateManagedKeyFromTemplateOptions, UpdateManagedKeyOptions,
};
pub use templates::{
    ArchiveKeyTemplateOptions, CreateKeyTemplateOptions, DeleteKeyTemplateOptions,
    GetKeyTemplateOptions, ListKeyTemplatesOptions, UnarchiveKeyTemplateOptions,
    UpdateKeyTemplateOptions,
};
pub use vaults::{
    CreateVaultOptions, DeleteVaultOptions, GetVaultOptions, ListVaultsOptions,
    UpdateVaultOptions,
};

pub(crate) const VAULT_HEADER: &str = "UKO-Vault";
pub(crate) const IF_MATCH_HEADER: &str = "If-Match";

/// Largest page size the API accepts.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Starts a request below `/api/v4`.
pub(crate) fn api_request(method: RestMethod) -> PreparedRequest {
    PreparedRequest::new(method).segment("api").segment("v4")
}

pub(crate) fn validate_paging(
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<(), ValidationError> {
    if let Some(limit) = limit {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(ValidationError::invalid(
                "limit",
                format!("{limit} is outside 1..={MAX_PAGE_LIMIT}"),
            ));
        }
    }
    if offset.is_some_and(|offset| offset < 0) {
        return Err(ValidationError::invalid("offset", "must not be negative"));
    }
    Ok(())
}

/// Joins multi-valued query filters the way the API expects them.
pub(crate) fn comma_joined<T: ToString>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn validate_vault(vault_id: Option<&str>, required: bool) -> Result<(), ValidationError> {
    match vault_id {
        Some(vault_id) => require_non_empty("vault_id", vault_id),
        None if required => Err(ValidationError::missing_field("vault_id")),
        None => Ok(()),
    }
}

/// Identifies one resource, optionally scoped with a `UKO-Vault` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    pub id: String,
    pub vault_id: Option<String>,
}

impl ResourceOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vault_id: None,
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_id = Some(vault_id.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        validate_vault(self.vault_id.as_deref(), false)
    }

    fn request(&self, method: RestMethod, collection: &str) -> PreparedRequest {
        api_request(method)
            .segment(collection)
            .segment(&self.id)
            .header_opt(VAULT_HEADER, self.vault_id.as_deref())
    }
}

/// Identifies one resource for a change guarded by `If-Match`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalOptions {
    pub id: String,
    pub vault_id: Option<String>,
    /// ETag of the last read of the resource.
    pub if_match: String,
}

impl ConditionalOptions {
    pub fn new(id: impl Into<String>, if_match: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vault_id: None,
            if_match: if_match.into(),
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.vault_id = Some(vault_id.into());
        self
    }

    fn validate(&self, vault_required: bool) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        require_non_empty("if_match", &self.if_match)?;
        validate_vault(self.vault_id.as_deref(), vault_required)
    }

    fn request(&self, method: RestMethod, collection: &str) -> PreparedRequest {
        api_request(method)
            .segment(collection)
            .segment(&self.id)
            .header_opt(VAULT_HEADER, self.vault_id.as_deref())
            .header(IF_MATCH_HEADER, &self.if_match)
    }
}

/// Update of an existing resource: target, `If-Match` guard and body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptions<B> {
    pub target: ConditionalOptions,
    pub body: B,
}

impl<B> UpdateOptions<B> {
    pub fn new(id: impl Into<String>, if_match: impl Into<String>, body: B) -> Self {
        Self {
            target: ConditionalOptions::new(id, if_match),
            body,
        }
    }

    pub fn with_vault(mut self, vault_id: impl Into<String>) -> Self {
        self.target = self.target.with_vault(vault_id);
        self
    }
}
