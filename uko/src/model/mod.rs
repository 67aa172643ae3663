//! Read and write models for the key orchestration API.
//!
//! Read models implement [`Decode`](crate::decode::Decode) and keep every
//! server-populated field optional unless the API always sends it. Write
//! models implement `Serialize` plus a `validate()` check that runs before
//! any request is issued.

/// Declares a forward-compatible string enum.
///
/// Known wire values map to named variants; anything else lands in
/// `Other(String)` so newer server values still decode. Parsing is
/// strum's `EnumString` with `Other` as the default variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumString)]
        pub enum $name {
            $( $(#[$vmeta])* #[strum(serialize = $wire)] $variant, )+
            /// A value not known to this client.
            #[strum(default)]
            Other(String),
        }

        impl $name {
            /// Returns the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Returns `false` for values captured by `Other`.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                value
                    .parse()
                    .unwrap_or_else(|_| Self::Other(value.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(value.as_str()))
            }
        }
    };
}

mod associated_resource;
mod common;
mod enums;
mod keystore;
mod keystore_request;
mod list;
mod managed_key;
mod template;
mod vault;

pub use associated_resource::AssociatedResource;
pub use common::{
    ErrorEnvelope, ErrorModel, ErrorTarget, HrefObject, KeystoreReference, ManagedKeyReference,
    Tag, TargetKeystoreReference, TemplateReference, VaultReference,
    VaultReferenceInCreationRequest,
};
pub use enums::{
    KeyAlgorithm, KeyType, KeystoreStatusHealth, KeystoreSyncStatus, KeystoreType,
    ManagedKeyState, TemplateState,
};
pub use keystore::{
    AwsKmsKeystore, AzureKeyVaultKeystore, CcaKeystore, GoogleKmsKeystore, IbmCloudKmsExternal,
    IbmCloudKmsInternal, IbmCloudKmsKeystore, IbmCloudKmsLeaf, IbmVariant, Keystore,
    KeystoreCommon, KeystoreFamily, KeystoreStatus, KeystoreSummary,
};
pub use keystore_request::{
    AwsKmsCreate, AwsKmsUpdate, AzureKeyVaultCreate, AzureKeyVaultUpdate, CcaCreate, CcaUpdate,
    GoogleKmsCreate, GoogleKmsUpdate, IbmCloudKmsCreate, IbmCloudKmsCreateLeaf,
    IbmCloudKmsExternalCreate, IbmCloudKmsInternalCreate, IbmCloudKmsUpdate,
    KeystoreCreateCommon, KeystoreCreationRequest, KeystoreUpdateCommon, KeystoreUpdateRequest,
};
pub use list::{
    AssociatedResourceList, KeystoreList, ManagedKeyList, StatusInKeystoreList, TemplateList,
    VaultList,
};
pub use managed_key::{
    KeyInstance, KeyInstanceAwsKms, KeyInstanceAzure, KeyInstanceCca, KeyInstanceCommon,
    KeyInstanceFamily, KeyInstanceGoogleKms, KeyInstanceIbmCloudKms, ManagedKey,
    ManagedKeyCreate, ManagedKeyUpdate, StatusInKeystore,
};
pub use template::{
    KeyProperties, KeystoreTemplate, Template, TemplateCreate, TemplateKeyProperties,
    TemplateUpdate,
};
pub use vault::{Vault, VaultCreate, VaultUpdate};
