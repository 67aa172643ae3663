//! Integration tests for polymorphic response decoding through the client.

use serde_json::json;
use uko::model::{
    IbmCloudKmsLeaf, IbmVariant, KeyInstance, Keystore, KeystoreFamily, KeystoreType,
};
use uko::ops::{GetKeystoreOptions, GetManagedKeyOptions, ListKeystoresOptions};
use uko::{ClientConfig, DecodeError, UkoClient, UkoError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> UkoClient {
    UkoClient::new(ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

async fn serve(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_keystore_variant_selected_by_type() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/keystores/ks-1",
        json!({
            "id": "ks-1",
            "type": "azure_key_vault",
            "name": "vault-eu",
            "azure_service_name": "kv-eu",
            "azure_location": "westeurope"
        }),
    )
    .await;

    let keystore = client(&mock_server)
        .get_keystore(&GetKeystoreOptions::new("ks-1"))
        .await
        .unwrap()
        .into_result();

    assert_eq!(keystore.keystore_type(), KeystoreType::AzureKeyVault);
    assert_eq!(keystore.name(), Some("vault-eu"));
    match keystore {
        Keystore::AzureKeyVault(azure) => {
            assert_eq!(azure.azure_service_name.as_deref(), Some("kv-eu"))
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_keystore_type() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/keystores/ks-2",
        json!({"id": "ks-2", "type": "not_a_real_vendor"}),
    )
    .await;

    let err = client(&mock_server)
        .get_keystore(&GetKeystoreOptions::new("ks-2"))
        .await
        .unwrap_err();
    match err {
        UkoError::Decode(DecodeError::UnrecognizedVariant { field, value, .. }) => {
            assert_eq!(field, "type");
            assert_eq!(value, "not_a_real_vendor");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_keystore_type() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/api/v4/keystores/ks-3", json!({"id": "ks-3"})).await;

    let err = client(&mock_server)
        .get_keystore(&GetKeystoreOptions::new("ks-3"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UkoError::Decode(DecodeError::MissingDiscriminator { .. })
    ));
}

#[tokio::test]
async fn test_ibm_keystore_refines_to_external_leaf() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/keystores/ks-4",
        json!({
            "id": "ks-4",
            "type": "ibm_cloud_kms",
            "ibm_variant": "key_protect",
            "ibm_api_endpoint": "https://kp.example",
            "ibm_iam_endpoint": "https://iam.example",
            "ibm_instance_id": "inst-4"
        }),
    )
    .await;

    let keystore = client(&mock_server)
        .get_keystore(&GetKeystoreOptions::new("ks-4"))
        .await
        .unwrap()
        .into_result();
    let ibm = keystore.as_ibm_cloud_kms().unwrap();
    match ibm.refine().unwrap() {
        IbmCloudKmsLeaf::External(external) => {
            assert_eq!(external.ibm_variant, IbmVariant::KeyProtect);
            assert_eq!(external.ibm_instance_id, "inst-4");
        }
        other => panic!("unexpected leaf: {other:?}"),
    }
}

#[tokio::test]
async fn test_keystore_list_tolerates_unknown_vendors() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/keystores",
        json!({
            "keystores": [
                {"id": "ks-1", "type": "google_kms", "google_project_id": "p"},
                {"id": "ks-2", "type": "quantum_vault"}
            ]
        }),
    )
    .await;

    let list = client(&mock_server)
        .list_keystores(&ListKeystoresOptions::default())
        .await
        .unwrap()
        .into_result();

    assert!(matches!(list.keystores[0].refine(), Ok(Keystore::GoogleKms(_))));
    assert_eq!(
        list.keystores[1].keystore_type,
        Some(KeystoreType::Other("quantum_vault".to_string()))
    );
    assert!(list.keystores[1].refine().is_err());
}

#[tokio::test]
async fn test_managed_key_instances_follow_keystore_type() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/managed_keys/mk-1",
        json!({
            "id": "mk-1",
            "label": "payments",
            "state": "pre_activation",
            "algorithm": "rsa",
            "instances": [
                {"id": "i-1", "type": "key_pair", "keystore": {"type": "cca"}},
                {"id": "i-2", "type": "key_pair", "keystore": {"type": "aws_kms"}}
            ]
        }),
    )
    .await;

    let key = client(&mock_server)
        .get_managed_key(&GetManagedKeyOptions::new("mk-1"))
        .await
        .unwrap()
        .into_result();
    assert!(matches!(key.instances[0], KeyInstance::Cca(_)));
    assert!(matches!(key.instances[1], KeyInstance::AwsKms(_)));
}

#[tokio::test]
async fn test_nested_instance_error_reports_path() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/api/v4/managed_keys/mk-2",
        json!({
            "id": "mk-2",
            "label": "payments",
            "state": "active",
            "algorithm": "aes",
            "instances": [
                {"id": "i-1", "keystore": {"type": "cca"}},
                {"id": "i-2", "keystore": {}}
            ]
        }),
    )
    .await;

    let err = client(&mock_server)
        .get_managed_key(&GetManagedKeyOptions::new("mk-2"))
        .await
        .unwrap_err();
    match err {
        UkoError::Decode(decode) => {
            assert!(decode.is_discriminator_error());
            assert_eq!(decode.field(), Some("instances[1]"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
