//! Paginated list envelopes.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    AssociatedResource, HrefObject, KeystoreSummary, ManagedKey, StatusInKeystore, Template, Vault,
};
use crate::decode::{Decode, Fields};
use crate::error::DecodeError;
use crate::pager::Paginated;

macro_rules! list_envelope {
    ($(#[$meta:meta])* $name:ident { $items:ident: $item:ty }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            pub total_count: Option<i64>,
            pub limit: Option<i64>,
            pub offset: Option<i64>,
            pub first: Option<HrefObject>,
            pub last: Option<HrefObject>,
            pub previous: Option<HrefObject>,
            pub next: Option<HrefObject>,
            pub $items: Vec<$item>,
        }

        impl Decode for $name {
            const NAME: &'static str = stringify!($name);

            fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
                let fields = Fields::new(object);
                Ok(Self {
                    total_count: fields.optional("total_count")?,
                    limit: fields.optional("limit")?,
                    offset: fields.optional("offset")?,
                    first: fields.optional("first")?,
                    last: fields.optional("last")?,
                    previous: fields.optional("previous")?,
                    next: fields.optional("next")?,
                    $items: fields.model_list(stringify!($items))?,
                })
            }
        }

        impl Paginated for $name {
            type Item = $item;

            fn next_href(&self) -> Option<&str> {
                self.next.as_ref().map(|link| link.href.as_str())
            }

            fn into_items(self) -> Vec<$item> {
                self.$items
            }
        }
    };
}

list_envelope! {
    /// A page of vaults.
    VaultList { vaults: Vault }
}

list_envelope! {
    /// A page of keystores, undispatched. See [`KeystoreSummary::refine`].
    KeystoreList { keystores: KeystoreSummary }
}

list_envelope! {
    /// A page of managed keys.
    ManagedKeyList { managed_keys: ManagedKey }
}

list_envelope! {
    /// A page of key templates.
    TemplateList { templates: Template }
}

list_envelope! {
    /// A page of associated resources.
    AssociatedResourceList { associated_resources: AssociatedResource }
}

list_envelope! {
    /// Distribution status of one managed key across its keystores.
    StatusInKeystoreList { status_in_keystores: StatusInKeystore }
}
