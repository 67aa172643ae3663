//! Enumerated wire values.

string_enum! {
    /// Keystore vendor tag, the discriminator of the keystore families.
    pub enum KeystoreType {
        /// Amazon Web Services Key Management Service.
        AwsKms => "aws_kms",
        /// Microsoft Azure Key Vault.
        AzureKeyVault => "azure_key_vault",
        /// Google Cloud Key Management Service.
        GoogleKms => "google_kms",
        /// IBM Cloud Key Protect or Hyper Protect Crypto Services.
        IbmCloudKms => "ibm_cloud_kms",
        /// Common Cryptographic Architecture keystore.
        Cca => "cca",
    }
}

string_enum! {
    /// Lifecycle state of a managed key.
    pub enum ManagedKeyState {
        PreActivation => "pre_activation",
        Active => "active",
        Deactivated => "deactivated",
        Compromised => "compromised",
        Destroyed => "destroyed",
        DestroyedCompromised => "destroyed_compromised",
    }
}

string_enum! {
    /// Key algorithm.
    pub enum KeyAlgorithm {
        Aes => "aes",
        Rsa => "rsa",
        Hmac => "hmac",
        Ec => "ec",
        Des3 => "des3",
    }
}

string_enum! {
    /// Whether a key instance holds a key pair or a secret key.
    pub enum KeyType {
        KeyPair => "key_pair",
        SecretKey => "secret_key",
    }
}

string_enum! {
    /// Template lifecycle state.
    pub enum TemplateState {
        Unarchived => "unarchived",
        Archived => "archived",
    }
}

string_enum! {
    /// Health reported for a keystore connection.
    pub enum KeystoreStatusHealth {
        Ok => "ok",
        Error => "error",
        NotResponding => "not_responding",
    }
}

string_enum! {
    /// Synchronization state of a managed key inside one keystore.
    pub enum KeystoreSyncStatus {
        Active => "active",
        Pending => "pending",
        NotPresent => "not_present",
        WrongKey => "wrong_key",
        Deactivated => "deactivated",
        Destroyed => "destroyed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value_roundtrip() {
        let state: ManagedKeyState = serde_json::from_str("\"pre_activation\"").unwrap();
        assert_eq!(state, ManagedKeyState::PreActivation);
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"pre_activation\"");
    }

    #[test]
    fn test_unknown_value_is_kept() {
        let algorithm: KeyAlgorithm = serde_json::from_str("\"ml_dsa\"").unwrap();
        assert_eq!(algorithm, KeyAlgorithm::Other("ml_dsa".to_string()));
        assert!(!algorithm.is_known());
        assert_eq!(algorithm.to_string(), "ml_dsa");
    }

    #[test]
    fn test_parse_falls_back_to_other() {
        assert_eq!("des3".parse::<KeyAlgorithm>().unwrap(), KeyAlgorithm::Des3);
        assert_eq!(
            "quantum_vault".parse::<KeystoreType>().unwrap(),
            KeystoreType::Other("quantum_vault".to_string())
        );
        assert_eq!(
            KeystoreSyncStatus::from("wrong_key"),
            KeystoreSyncStatus::WrongKey
        );
    }

    #[test]
    fn test_keystore_type_tags() {
        for tag in ["aws_kms", "azure_key_vault", "google_kms", "ibm_cloud_kms", "cca"] {
            let keystore_type = KeystoreType::from(tag);
            assert!(keystore_type.is_known(), "{tag}");
            assert_eq!(keystore_type.as_str(), tag);
        }
    }
}
