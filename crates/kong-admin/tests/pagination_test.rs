#![allow(clippy::unwrap_used)]
// Integration tests for cursor pagination using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kong_admin::{AclGroup, Client, Error, ListOpt, NameOrId, Target, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn acl_json(group: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "group": group,
        "consumer": { "id": Uuid::new_v4() },
        "created_at": 1_700_000_000,
        "tags": null
    })
}

fn groups(acls: &[AclGroup]) -> Vec<&str> {
    acls.iter().filter_map(|a| a.group.as_deref()).collect()
}

// ── Single pages ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_without_control_uses_default_size() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .and(query_param("size", "100"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("a"), acl_json("b")],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.acls().list(None).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_list_chains_controls_across_pages() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .and(query_param("size", "1"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("acl11")],
            "next": "/acls?offset=WyJhY2wxMSJd&size=1",
            "offset": "WyJhY2wxMSJd"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .and(query_param("size", "3"))
        .and(query_param("offset", "WyJhY2wxMSJd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("acl12"), acl_json("acl21"), acl_json("acl22")],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page1 = client
        .acls()
        .list(Some(&ListOpt::with_size(1)))
        .await
        .unwrap();
    assert_eq!(groups(&page1.data), ["acl11"]);

    let mut next = page1.next.unwrap();
    assert_eq!(next.size, 1);
    assert_eq!(next.offset(), Some("WyJhY2wxMSJd"));

    next.size = 3;
    let page2 = client.acls().list(Some(&next)).await.unwrap();
    assert_eq!(groups(&page2.data), ["acl12", "acl21", "acl22"]);
    assert!(page2.next.is_none());
}

#[tokio::test]
async fn test_offset_taken_from_next_link() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/upstreams/example/targets"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "target": "10.0.0.1:80" }],
            "next": "/upstreams/example/targets?offset=WyIxMjMiXQ%3D%3D&size=1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/upstreams/example/targets"))
        .and(query_param("offset", "WyIxMjMiXQ=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "target": "10.0.0.2:80" }],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upstream = NameOrId::from("example");
    let page1 = client
        .targets()
        .list(&upstream, Some(&ListOpt::with_size(1)))
        .await
        .unwrap();
    let next = page1.next.unwrap();
    assert_eq!(next.offset(), Some("WyIxMjMiXQ=="));

    let page2 = client.targets().list(&upstream, Some(&next)).await.unwrap();
    let addresses: Vec<_> = page2
        .data
        .iter()
        .filter_map(|t: &Target| t.target.as_deref())
        .collect();
    assert_eq!(addresses, ["10.0.0.2:80"]);
}

#[tokio::test]
async fn test_tags_filter_is_kept_on_next_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/consumers"))
        .and(query_param("tags", "team-a,prod"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "username": "alice" }],
            "next": "/consumers?offset=b2Zm&size=1&tags=team-a,prod",
            "offset": "b2Zm"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/consumers"))
        .and(query_param("tags", "team-a,prod"))
        .and(query_param("offset", "b2Zm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "username": "bob" }],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opt = ListOpt::with_size(1).with_tags(["team-a", "prod"], true);
    let page1 = client.consumers().list(Some(&opt)).await.unwrap();
    let page2 = client
        .consumers()
        .list(page1.next.as_ref())
        .await
        .unwrap();

    assert_eq!(page2.data[0].username.as_deref(), Some("bob"));
    assert!(page2.next.is_none());
}

#[tokio::test]
async fn test_zero_page_size_is_rejected_locally() {
    let (server, client) = setup().await;

    let result = client.acls().list(Some(&ListOpt::with_size(0))).await;

    assert!(
        matches!(result, Err(Error::InvalidInput { field: "size", .. })),
        "expected InvalidInput, got: {result:?}"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Full walks ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_reassembles_uneven_pages() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .and(query_param("size", "1000"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("acl11")],
            "next": "/acls?offset=cDI&size=1000",
            "offset": "cDI"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .and(query_param("offset", "cDI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("acl12"), acl_json("acl21"), acl_json("acl22")],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.acls().list_all().await.unwrap();

    assert_eq!(groups(&all), ["acl11", "acl12", "acl21", "acl22"]);
}

#[tokio::test]
async fn test_list_all_follows_empty_page_with_continuation() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/consumers/bob/acls"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "next": "/consumers/bob/acls?offset=ZW1wdHk",
            "offset": "ZW1wdHk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/consumers/bob/acls"))
        .and(query_param("offset", "ZW1wdHk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [acl_json("a"), acl_json("b")],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = client
        .acls()
        .list_all_for_consumer(&"bob".into())
        .await
        .unwrap();

    assert_eq!(groups(&all), ["a", "b"]);
}

#[tokio::test]
async fn test_list_all_discards_partial_results_on_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/upstreams"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "first" }],
            "next": "/upstreams?offset=bmV4dA",
            "offset": "bmV4dA"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/upstreams"))
        .and(query_param("offset", "bmV4dA"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "An unexpected error occurred"
        })))
        .mount(&server)
        .await;

    let result = client.upstreams().list_all().await;

    match result {
        Err(Error::Api { status, ref message, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "An unexpected error occurred");
        }
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_page_decode_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/acls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "group": 42 }],
            "next": null
        })))
        .mount(&server)
        .await;

    let result = client.acls().list(None).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("\"group\":42")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
