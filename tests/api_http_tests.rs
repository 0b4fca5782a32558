//! End-to-end tests for the facades over a real HTTP transport.
//!
//! These tests run the facades against a local mock panel to verify URLs,
//! authentication headers, query encoding and status mapping.

use std::time::Duration;

use pterodactyl_api::rest::resources::{Location, Server};
use pterodactyl_api::{
    ApiKey, ApplicationApi, ClientApi, HttpError, ListQuery, PanelConfig, PanelResource,
    PanelUrl, ResourceError, StatusKind,
};
use serde_json::json;
use wiremock::matchers::{
    body_json, header, header_exists, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, key: &str) -> PanelConfig {
    PanelConfig::builder()
        .base_url(PanelUrl::new(server.uri()).unwrap())
        .api_key(ApiKey::new(key).unwrap())
        .user_agent_prefix("IntegrationTests/1.0")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn server_payload(id: u64, identifier: &str) -> serde_json::Value {
    json!({
        "object": "server",
        "attributes": {"id": id, "identifier": identifier, "name": format!("srv-{id}")}
    })
}

// ============================================================================
// Application API
// ============================================================================

#[tokio::test]
async fn test_application_servers_sends_auth_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/servers"))
        .and(header("Authorization", "Bearer ptla_test"))
        .and(header("Accept", "application/json"))
        .and(header_exists("User-Agent"))
        .and(query_param("page", "2"))
        .and(query_param("filter[name]", "lobby"))
        .and(query_param("sort", "-id"))
        .and(query_param("include", "allocations,user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [server_payload(1, "aaaa1111"), server_payload(2, "bbbb2222")],
            "meta": {"pagination": {
                "total": 52, "count": 2, "per_page": 50,
                "current_page": 2, "total_pages": 2, "links": {}
            }}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let query = ListQuery::new()
        .page(2)
        .filter("name", "lobby")
        .sort("-id")
        .include("allocations")
        .include("user");

    let servers = api.servers(&query).await.unwrap();

    assert_eq!(servers.len(), 2);
    let ids: Vec<u64> = servers.resources::<Server>().filter_map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
    let pagination = servers.pagination().unwrap();
    assert_eq!(pagination.total, 52);
    assert!(!pagination.has_next_page());
}

#[tokio::test]
async fn test_user_agent_carries_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations/4"))
        .and(header_regex(
            "User-Agent",
            r"^IntegrationTests/1\.0 \| Panel API Library v[0-9.]+ \| Rust",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "location",
            "attributes": {"id": 4, "short": "eu.fra", "long": "Frankfurt"}
        })))
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let location: Location = api.location(4, &[]).await.unwrap();
    assert_eq!(location.short.as_deref(), Some("eu.fra"));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].url.query().is_none());
}

#[tokio::test]
async fn test_external_id_is_percent_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/servers/external/billing%2F42"))
        .and(query_param("include", "egg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_payload(9, "cccc3333")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let server = api.external("billing/42", &["egg"]).await.unwrap();

    assert_eq!(server.id, Some(9));
}

#[tokio::test]
async fn test_server_details_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/servers/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_payload(5, "dddd4444")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/application/servers/5/details"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Renamed", "user": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "server",
            "attributes": {"id": 5, "name": "Renamed", "user": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let mut server = api.server(5, &[]).await.unwrap();
    assert_eq!(server.name.as_deref(), Some("srv-5"));

    server
        .details(json!({"name": "Renamed", "user": 1}))
        .await
        .unwrap();

    assert_eq!(server.name.as_deref(), Some("Renamed"));
    assert_eq!(server.user, Some(1));
    assert!(server.identifier.is_none());
    assert_eq!(server.surface(), pterodactyl_api::ApiSurface::Application);
}

#[tokio::test]
async fn test_suspend_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/application/servers/5/suspend"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let server = Server::from_payload(
        api.transport(),
        pterodactyl_api::ApiSurface::Application,
        &server_payload(5, "dddd4444"),
    )
    .unwrap();

    server.suspend().await.unwrap();
}

#[tokio::test]
async fn test_list_endpoint_answering_a_resource_is_invalid_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_payload(1, "x")))
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    assert!(matches!(
        api.nodes(&ListQuery::new()).await,
        Err(ResourceError::InvalidPayload { .. })
    ));
}

// ============================================================================
// Client API
// ============================================================================

#[tokio::test]
async fn test_client_servers_lists_root() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/client/"))
        .and(header("Authorization", "Bearer ptlc_test"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [server_payload(1, "aaaa1111")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ClientApi::new(&config_for(&mock_server, "ptlc_test")).unwrap();
    let servers = api.servers(&ListQuery::new()).await.unwrap();

    let server = servers.resources::<Server>().next().unwrap();
    assert_eq!(server.identifier.as_deref(), Some("aaaa1111"));
    assert_eq!(server.surface(), pterodactyl_api::ApiSurface::Client);
    assert!(servers.pagination().is_none());
}

#[tokio::test]
async fn test_client_power_posts_signal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/client/servers/aaaa1111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_payload(1, "aaaa1111")))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/client/servers/aaaa1111/power"))
        .and(body_json(json!({"signal": "restart"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ClientApi::new(&config_for(&mock_server, "ptlc_test")).unwrap();
    let server = api.server("aaaa1111", &[]).await.unwrap();

    server.power("restart").await.unwrap();
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_status_codes_map_to_kinds() {
    let mock_server = MockServer::start().await;

    for (code, id) in [(400u16, 1u64), (401, 2), (404, 3), (422, 4), (500, 5), (502, 6), (503, 7)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/application/users/{id}")))
            .respond_with(
                ResponseTemplate::new(code).set_body_json(json!({"errors": [{"status": code}]})),
            )
            .mount(&mock_server)
            .await;
    }

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    let expected = [
        StatusKind::BadRequest,
        StatusKind::Unauthorised,
        StatusKind::NotFound,
        StatusKind::UnprocessableEntity,
        StatusKind::InternalServer,
        StatusKind::BadGateway,
        StatusKind::Other,
    ];

    for (id, kind) in (1u64..).zip(expected) {
        match api.user(id, &[]).await {
            Err(ResourceError::Http(HttpError::Response(e))) => assert_eq!(e.status_kind(), kind),
            other => panic!("expected an error status, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/nests/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    match api.nest(1, &[]).await {
        Err(ResourceError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 502);
            assert_eq!(e.body, json!("<html>Bad Gateway</html>"));
        }
        other => panic!("expected a 502, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let api = ApplicationApi::new(&config_for(&mock_server, "ptla_test")).unwrap();
    assert!(matches!(
        api.user(1, &[]).await,
        Err(ResourceError::Http(HttpError::Decode(_)))
    ));
}
