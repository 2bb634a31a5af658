//! Integration tests for slug enumeration.

use cms_client::testing::MockTransport;
use cms_client::{CmsClient, CmsConfig};
use serde_json::json;

fn client(transport: &MockTransport) -> CmsClient<MockTransport> {
    CmsClient::with_transport(CmsConfig::default(), transport.clone())
}

#[tokio::test]
async fn test_mixed_shapes_keep_order() {
    let transport = MockTransport::new().with_json(json!({
        "data": [
            { "id": 1, "attributes": { "slug": "northern-lights" } },
            { "id": 2, "slug": "ice-hotel" }
        ]
    }));

    let slugs = client(&transport).list_known_slugs().await;

    assert_eq!(slugs, vec!["northern-lights", "ice-hotel"]);
}

#[tokio::test]
async fn test_requests_only_slug_field() {
    let transport = MockTransport::new().with_json(json!({ "data": [] }));

    let _ = client(&transport).list_known_slugs().await;

    let request = transport.last_call().unwrap();
    assert_eq!(request.url.path(), "/api/atrakcjes");
    assert_eq!(request.url.query(), Some("fields%5B0%5D=slug"));
}

#[tokio::test]
async fn test_entries_without_slug_are_discarded() {
    let transport = MockTransport::new().with_json(json!({
        "data": [
            { "id": 1, "attributes": { "slug": "" } },
            { "id": 2, "attributes": {} },
            { "id": 3, "slug": false },
            { "id": 4, "slug": "reindeer-farm" }
        ]
    }));

    let slugs = client(&transport).list_known_slugs().await;

    assert_eq!(slugs, vec!["reindeer-farm"]);
}

#[tokio::test]
async fn test_network_failure_yields_empty_list() {
    let transport = MockTransport::new().with_network_error("dns lookup failed");

    let slugs = client(&transport).list_known_slugs().await;

    assert!(slugs.is_empty());
}

#[tokio::test]
async fn test_error_status_yields_empty_list() {
    let transport = MockTransport::new().with_response(500, "{\"error\":{}}");

    assert!(client(&transport).list_known_slugs().await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_yields_empty_list() {
    let transport = MockTransport::new().with_response(200, "{\"data\": [");

    assert!(client(&transport).list_known_slugs().await.is_empty());
}

#[tokio::test]
async fn test_each_call_refetches() {
    let transport = MockTransport::new().with_json(json!({ "data": [{ "id": 1, "slug": "a" }] }));
    let client = client(&transport);

    let first = client.list_known_slugs().await;
    let second = client.list_known_slugs().await;

    assert_eq!(first, second);
    assert_eq!(transport.call_count(), 2);
}
