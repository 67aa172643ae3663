//! Integration tests for the pager against a mock server.

use serde_json::{Value, json};
use uko::ops::{ListManagedKeysOptions, ListVaultsOptions};
use uko::{ClientConfig, PagerError, UkoClient, UkoError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> UkoClient {
    UkoClient::new(ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

fn vault_page(ids: &[&str], next: Option<&str>) -> Value {
    let vaults: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "name": format!("vault {id}")}))
        .collect();
    let mut page = json!({"total_count": 5, "limit": 2, "vaults": vaults});
    if let Some(href) = next {
        page["next"] = json!({"href": href});
    }
    page
}

async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_page(
            &["v-1", "v-2"],
            Some("/api/v4/vaults?limit=2&offset=2"),
        )))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_page(
            &["v-3", "v-4"],
            Some(&format!("{}/api/v4/vaults?limit=2&offset=4", server.uri())),
        )))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_all_follows_next_links() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults"))
        .and(query_param("offset", "4"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_page(&["v-5"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut pager = client
        .vaults_pager(&ListVaultsOptions::default().with_limit(2))
        .unwrap();
    let vaults = pager.get_all().await.unwrap();

    let ids: Vec<&str> = vaults.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["v-1", "v-2", "v-3", "v-4", "v-5"]);
    assert!(!pager.has_next());
    assert!(matches!(
        pager.get_next().await,
        Err(UkoError::Pager(PagerError::NoMoreResults))
    ));
}

#[tokio::test]
async fn test_get_all_keeps_items_before_failure() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut pager = client
        .vaults_pager(&ListVaultsOptions::default().with_limit(2))
        .unwrap();
    let partial = pager.get_all().await.unwrap_err();

    assert_eq!(partial.items.len(), 4);
    assert_eq!(partial.error.status_code(), Some(500));
}

#[tokio::test]
async fn test_malformed_next_link() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/vaults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_page(
            &["v-1"],
            Some("/api/v4/vaults?offset=two"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut pager = client.vaults_pager(&ListVaultsOptions::default()).unwrap();
    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(
        err,
        UkoError::Pager(PagerError::MalformedNextLink { .. })
    ));
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_pager_rejects_start_offset() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    let err = client
        .managed_keys_pager(&ListManagedKeysOptions::default().with_offset(30))
        .unwrap_err();
    assert!(matches!(err, PagerError::InvalidStartOffset { offset: 30 }));

    assert!(
        client
            .managed_keys_pager(&ListManagedKeysOptions::default().with_offset(0))
            .is_ok()
    );
}
