//! Integration tests for endpoint request wiring.
//!
//! These tests use wiremock to verify paths, headers, query parameters and
//! bodies of the requests each operation sends.

use serde_json::json;
use uko::model::{
    IbmCloudKmsCreate, IbmVariant, KeyAlgorithm, KeystoreCreateCommon, KeystoreCreationRequest,
    KeystoreType, ManagedKeyCreate, ManagedKeyState, ManagedKeyUpdate, TargetKeystoreReference,
    TemplateCreate, TemplateKeyProperties, VaultCreate,
};
use uko::ops::{
    ActivateManagedKeyOptions, ArchiveKeyTemplateOptions, CreateKeyTemplateOptions,
    CreateKeystoreOptions, CreateManagedKeyOptions, CreateVaultOptions, DeleteKeystoreOptions,
    GetKeystoreStatusOptions, GetVaultOptions, KeystoreDeleteMode, ListKeystoresOptions,
    ListManagedKeysFromKeystoreOptions, ListManagedKeysOptions,
    UpdateManagedKeyFromTemplateOptions, UpdateManagedKeyOptions,
};
use uko::{Authenticator, ClientConfig, ClientError, UkoClient, UkoError, ValidationError};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> UkoClient {
    UkoClient::new(ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

fn managed_key_json() -> serde_json::Value {
    json!({
        "id": "mk-1",
        "label": "payments",
        "state": "active",
        "algorithm": "aes",
        "vault": {"id": "v-1"},
        "instances": []
    })
}

#[tokio::test]
async fn test_get_vault_percent_encodes_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/vaults/a%20b%2Fc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"v7\"")
                .set_body_json(json!({"id": "a b/c", "name": "odd"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .get_vault(&GetVaultOptions::new("a b/c"))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.etag(), Some("\"v7\""));
    assert_eq!(response.result.name, "odd");
}

#[tokio::test]
async fn test_create_vault_sends_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/vaults"))
        .and(body_json(json!({"name": "payments", "description": "card keys"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "v-1",
            "name": "payments",
            "description": "card keys"
        })))
        .mount(&mock_server)
        .await;

    let body = VaultCreate::new("payments").with_description("card keys");
    let response = client(&mock_server)
        .create_vault(&CreateVaultOptions::new(body))
        .await
        .unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.result.id, "v-1");
}

#[tokio::test]
async fn test_validation_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    let err = client.get_vault(&GetVaultOptions::new("")).await.unwrap_err();
    assert!(matches!(
        err,
        UkoError::Validation(ValidationError::EmptyValue { field: "id" })
    ));

    let err = client
        .list_managed_keys(&ListManagedKeysOptions::default().with_limit(5000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UkoError::Validation(ValidationError::InvalidValue { field: "limit", .. })
    ));
}

#[tokio::test]
async fn test_list_keystores_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/keystores"))
        .and(query_param("type", "aws_kms,ibm_cloud_kms"))
        .and(query_param("vault.id", "v-1"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "limit": 10,
            "offset": 0,
            "keystores": [{"id": "ks-1", "type": "aws_kms", "aws_region": "eu-west-1"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = ListKeystoresOptions::default()
        .with_type(KeystoreType::AwsKms)
        .with_type(KeystoreType::IbmCloudKms)
        .with_vault("v-1")
        .with_limit(10);
    let list = client(&mock_server)
        .list_keystores(&options)
        .await
        .unwrap()
        .into_result();
    assert_eq!(list.total_count, Some(1));
    assert_eq!(list.keystores[0].keystore_type, Some(KeystoreType::AwsKms));
}

#[tokio::test]
async fn test_create_keystore_derives_vault_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/keystores"))
        .and(header("UKO-Vault", "v-1"))
        .and(query_param("dry_run", "true"))
        .and(body_json(json!({
            "type": "ibm_cloud_kms",
            "vault": {"id": "v-1"},
            "name": "hpcs-eu",
            "ibm_variant": "hpcs",
            "ibm_api_endpoint": "https://api.hpcs.example",
            "ibm_iam_endpoint": "https://iam.example",
            "ibm_api_key": "key",
            "ibm_instance_id": "inst-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ks-9",
            "type": "ibm_cloud_kms",
            "ibm_variant": "hpcs",
            "ibm_api_endpoint": "https://api.hpcs.example",
            "ibm_iam_endpoint": "https://iam.example",
            "ibm_instance_id": "inst-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = KeystoreCreationRequest::IbmCloudKms(IbmCloudKmsCreate::external(
        KeystoreCreateCommon::new("v-1", "hpcs-eu"),
        IbmVariant::Hpcs,
        "https://api.hpcs.example",
        "https://iam.example",
        "key",
        "inst-1",
    ));
    let keystore = client(&mock_server)
        .create_keystore(&CreateKeystoreOptions::new(body).with_dry_run(true))
        .await
        .unwrap()
        .into_result();
    assert!(keystore.as_ibm_cloud_kms().is_some());
}

#[tokio::test]
async fn test_incomplete_ibm_request_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    let mut ibm = IbmCloudKmsCreate::external(
        KeystoreCreateCommon::new("v-1", "kp"),
        IbmVariant::KeyProtect,
        "https://api.example",
        "https://iam.example",
        "key",
        "inst-1",
    );
    ibm.ibm_instance_id = None;
    let body = KeystoreCreationRequest::IbmCloudKms(ibm);

    let err = client(&mock_server)
        .create_keystore(&CreateKeystoreOptions::new(body))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UkoError::Validation(ValidationError::MissingField { field: "ibm_instance_id" })
    ));
}

#[tokio::test]
async fn test_delete_keystore_sends_guards_and_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/keystores/ks-1"))
        .and(header("UKO-Vault", "v-1"))
        .and(header("If-Match", "\"e1\""))
        .and(query_param("mode", "deactivate"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = DeleteKeystoreOptions::new("ks-1", "v-1", "\"e1\"")
        .with_mode(KeystoreDeleteMode::Deactivate);
    let response = client(&mock_server).delete_keystore(&options).await.unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_keystore_sub_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/keystores/ks-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health_status": "not_responding",
            "message": "timeout"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/keystores/ks-1/managed_keys"))
        .and(query_param("state", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "managed_keys": [managed_key_json()]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let status = client
        .get_keystore_status(&GetKeystoreStatusOptions::new("ks-1"))
        .await
        .unwrap()
        .into_result();
    assert_eq!(status.message.as_deref(), Some("timeout"));

    let keys = client
        .list_managed_keys_from_keystore(
            &ListManagedKeysFromKeystoreOptions::new("ks-1").with_state(ManagedKeyState::Active),
        )
        .await
        .unwrap()
        .into_result();
    assert_eq!(keys.managed_keys[0].id, "mk-1");
}

#[tokio::test]
async fn test_create_managed_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/managed_keys"))
        .and(header("UKO-Vault", "v-1"))
        .and(body_json(json!({
            "template_name": "aes-256",
            "vault": {"id": "v-1"},
            "label": "payments"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(managed_key_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = ManagedKeyCreate::new("aes-256", "v-1", "payments");
    let key = client(&mock_server)
        .create_managed_key(&CreateManagedKeyOptions::new(body))
        .await
        .unwrap()
        .into_result();
    assert_eq!(key.algorithm, KeyAlgorithm::Aes);
}

#[tokio::test]
async fn test_managed_key_lifecycle_actions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/managed_keys/mk-1/activate"))
        .and(header("UKO-Vault", "v-1"))
        .and(header("If-Match", "\"e2\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(managed_key_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/managed_keys/mk-1/update_from_template"))
        .and(query_param("dry_run", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(managed_key_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let activated = client
        .activate_managed_key(&ActivateManagedKeyOptions::new("mk-1", "\"e2\"").with_vault("v-1"))
        .await
        .unwrap();
    assert_eq!(activated.result.state, ManagedKeyState::Active);

    client
        .update_managed_key_from_template(
            &UpdateManagedKeyFromTemplateOptions::new("mk-1", "v-1", "\"e2\"").with_dry_run(true),
        )
        .await
        .unwrap();

    let err = client
        .activate_managed_key(&ActivateManagedKeyOptions::new("mk-1", "\"e2\""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UkoError::Validation(ValidationError::MissingField { field: "vault_id" })
    ));
}

#[tokio::test]
async fn test_update_managed_key_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v4/managed_keys/mk-1"))
        .and(body_json(json!({"label": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(managed_key_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = ManagedKeyUpdate::default().with_label("renamed");
    let options = UpdateManagedKeyOptions::new("mk-1", "\"e3\"", body).with_vault("v-1");
    client(&mock_server).update_managed_key(&options).await.unwrap();
}

#[tokio::test]
async fn test_template_create_and_archive() {
    let mock_server = MockServer::start().await;

    let template = json!({
        "id": "t-1",
        "name": "aes-256",
        "state": "archived",
        "key": {"algorithm": "aes", "size": "256", "state": "active"},
        "keystores": [{"group": "eu", "type": "aws_kms"}]
    });

    Mock::given(method("POST"))
        .and(path("/api/v4/templates"))
        .and(header("UKO-Vault", "v-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(template.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/templates/t-1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(template))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let key = TemplateKeyProperties::new(KeyAlgorithm::Aes, "256");
    let body = TemplateCreate::new("v-1", "aes-256", key).with_keystore(TargetKeystoreReference {
        group: Some("eu".to_string()),
        keystore_type: KeystoreType::AwsKms,
    });
    client
        .create_key_template(&CreateKeyTemplateOptions::new(body))
        .await
        .unwrap();

    let archived = client
        .archive_key_template(&ArchiveKeyTemplateOptions::new("t-1", "\"e4\"").with_vault("v-1"))
        .await
        .unwrap()
        .into_result();
    assert!(archived.is_archived());
}

#[tokio::test]
async fn test_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/vaults/v-1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "v-1", "name": "a"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults/v-2"))
        .and(header("X-API-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "v-2", "name": "b"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bearer = UkoClient::new(
        ClientConfig::parse(&mock_server.uri())
            .unwrap()
            .with_auth(Authenticator::bearer("test-token")),
    )
    .unwrap();
    bearer.get_vault(&GetVaultOptions::new("v-1")).await.unwrap();

    let api_key = UkoClient::new(
        ClientConfig::parse(&mock_server.uri())
            .unwrap()
            .with_auth(Authenticator::api_key("X-API-Key", "secret")),
    )
    .unwrap();
    api_key.get_vault(&GetVaultOptions::new("v-2")).await.unwrap();
}

#[tokio::test]
async fn test_conflict_surfaces_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(412).set_body_json(json!({
            "status_code": 412,
            "errors": [{"code": "PRECONDITION_FAILED", "message": "ETag mismatch"}]
        })))
        .mount(&mock_server)
        .await;

    let options = UpdateManagedKeyOptions::new("mk-1", "\"stale\"", ManagedKeyUpdate::default())
        .with_vault("v-1");
    let err = client(&mock_server)
        .update_managed_key(&options)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(412));
    match err {
        UkoError::Client(ClientError::HttpStatus { message, .. }) => {
            assert_eq!(message, "ETag mismatch")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
