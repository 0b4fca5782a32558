//! Integration tests for resource actions.
//!
//! These tests drive resources through a recording transport to verify
//! surface gating, validation before I/O, request shapes and in-place
//! re-hydration.

use std::sync::Arc;

use pterodactyl_api::clients::mock::MockTransport;
use pterodactyl_api::rest::resources::{Allocation, Egg, Nest, Node, PowerState, Server};
use pterodactyl_api::{
    ApiSurface, HttpError, HttpMethod, HttpResponseError, ListQuery, PanelResource, ResourceError,
    SharedTransport, StatusKind,
};
use serde_json::{json, Value};

fn server_on(surface: ApiSurface, mock: &Arc<MockTransport>) -> Server {
    let transport: SharedTransport = mock.clone();
    Server::from_payload(
        &transport,
        surface,
        &json!({
            "object": "server",
            "attributes": {"id": 7, "identifier": "1a7ce997", "name": "Old", "description": "stale"}
        }),
    )
    .unwrap()
}

// ============================================================================
// Surface Gating
// ============================================================================

#[tokio::test]
async fn test_client_actions_on_application_server_do_no_io() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Application, &mock);

    let power = server.power("kill").await;
    let command = server.command("say hi").await;
    let websocket = server.websocket().await;
    let resources = server.resources().await;

    for result in [power.err(), command.err(), websocket.err(), resources.err()] {
        assert!(matches!(
            result,
            Some(ResourceError::IncorrectSurface {
                expected: ApiSurface::Client,
                actual: ApiSurface::Application
            })
        ));
    }
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_application_actions_on_client_server_do_no_io() {
    let mock = Arc::new(MockTransport::new());
    let mut server = server_on(ApiSurface::Client, &mock);

    assert!(server.suspend().await.is_err());
    assert!(server.unsuspend().await.is_err());
    assert!(server.reinstall().await.is_err());
    assert!(server.delete(true).await.is_err());
    let details = server.details(json!({"name": "A", "user": 1})).await;
    assert!(matches!(
        details,
        Err(ResourceError::IncorrectSurface { expected: ApiSurface::Application, .. })
    ));

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_node_and_nest_actions_require_application() {
    let mock = Arc::new(MockTransport::new());
    let transport: SharedTransport = mock.clone();
    let node = Node::from_payload(
        &transport,
        ApiSurface::Client,
        &json!({"object": "node", "attributes": {"id": 1}}),
    )
    .unwrap();
    let nest = Nest::from_payload(
        &transport,
        ApiSurface::Client,
        &json!({"object": "nest", "attributes": {"id": 1}}),
    )
    .unwrap();

    assert!(node.configuration().await.is_err());
    assert!(node.allocations(&ListQuery::new()).await.is_err());
    assert!(nest.eggs(&ListQuery::new()).await.is_err());
    assert!(nest.egg(1, &[]).await.is_err());
    assert_eq!(mock.request_count(), 0);
}

// ============================================================================
// Power Signals
// ============================================================================

#[tokio::test]
async fn test_invalid_power_signal_does_no_io() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Client, &mock);

    let result = server.power("jump").await;

    assert!(matches!(
        result,
        Err(ResourceError::InvalidPowerSignal { signal }) if signal == "jump"
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_power_signal_is_checked_before_identifier() {
    let mock = Arc::new(MockTransport::new());
    let transport: SharedTransport = mock.clone();
    let server = Server::from_payload(
        &transport,
        ApiSurface::Client,
        &json!({"object": "server", "attributes": {"name": "No identifier"}}),
    )
    .unwrap();

    assert!(matches!(
        server.power("jump").await,
        Err(ResourceError::InvalidPowerSignal { signal }) if signal == "jump"
    ));
    assert!(matches!(
        server.power("start").await,
        Err(ResourceError::InvalidPayload { .. })
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_kill_sends_exactly_one_post() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Client, &mock);

    server.power("kill").await.unwrap();

    assert_eq!(mock.request_count(), 1);
    let request = mock.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.path, "/servers/1a7ce997/power");
    assert_eq!(request.body, Some(json!({"signal": "kill"})));
}

#[tokio::test]
async fn test_command_body() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Client, &mock);

    server.command("say hello").await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.path, "/servers/1a7ce997/command");
    assert_eq!(request.body, Some(json!({"command": "say hello"})));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_missing_required_field_prevents_request() {
    let mock = Arc::new(MockTransport::new());
    let mut server = server_on(ApiSurface::Application, &mock);

    let result = server.details(json!({"user": 1})).await;

    assert!(matches!(
        result,
        Err(ResourceError::FieldRequired { field }) if field == "name"
    ));
    assert_eq!(mock.request_count(), 0);
    assert_eq!(server.name.as_deref(), Some("Old"));
}

#[tokio::test]
async fn test_build_with_nested_limits_is_sent() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({
        "object": "server",
        "attributes": {"id": 7, "limits": {"memory": 2048}}
    }));
    let mut server = server_on(ApiSurface::Application, &mock);

    let fields = json!({
        "allocation": 3,
        "limits": {"memory": 2048, "swap": 0, "io": 500, "cpu": 0, "disk": 4096},
        "feature_limits": {"databases": 1, "backups": 0}
    });
    server.build(fields.clone()).await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Patch);
    assert_eq!(request.path, "/servers/7/build");
    assert_eq!(request.body, Some(fields));
    assert_eq!(
        server.limits.as_ref().unwrap()["memory"].as_u64(),
        Some(2048)
    );
}

#[tokio::test]
async fn test_startup_type_mismatch_prevents_request() {
    let mock = Arc::new(MockTransport::new());
    let mut server = server_on(ApiSurface::Application, &mock);

    let result = server
        .startup(json!({
            "startup": "./start.sh",
            "environment": {},
            "egg": "five",
            "image": "ghcr.io/pterodactyl/yolks:java_17",
            "skip_scripts": false
        }))
        .await;

    assert!(matches!(
        result,
        Err(ResourceError::FieldTypeMismatch { field, expected: "number" }) if field == "egg"
    ));
    assert_eq!(mock.request_count(), 0);
}

// ============================================================================
// Re-hydration
// ============================================================================

#[tokio::test]
async fn test_details_replaces_fields_without_stale_leftovers() {
    let mock = Arc::new(MockTransport::new());
    let new_attributes = json!({"id": 7, "name": "New", "user": 2});
    mock.push_response(json!({
        "object": "server",
        "attributes": new_attributes,
        "meta": {"revision": 2}
    }));
    let mut server = server_on(ApiSurface::Application, &mock);

    server
        .details(json!({"name": "New", "user": 2}))
        .await
        .unwrap();

    let fields: Value = server.to_json()["attributes"].clone();
    assert_eq!(fields, new_attributes);
    assert_eq!(server.name.as_deref(), Some("New"));
    assert_eq!(server.description, None);
    assert_eq!(server.identifier, None);
    assert_eq!(server.meta().unwrap().to_json(), json!({"revision": 2}));

    let request = mock.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Patch);
    assert_eq!(request.path, "/servers/7/details");
}

#[tokio::test]
async fn test_confirmation_without_attributes_leaves_instance() {
    let mock = Arc::new(MockTransport::new());
    let mut server = server_on(ApiSurface::Application, &mock);

    server
        .details(json!({"name": "New", "user": 2}))
        .await
        .unwrap();

    assert_eq!(server.name.as_deref(), Some("Old"));
    assert_eq!(server.fields().len(), 4);
}

#[tokio::test]
async fn test_failed_rehydration_keeps_previous_state() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({"object": "server", "attributes": {"id": "not-a-number"}}));
    let mut server = server_on(ApiSurface::Application, &mock);

    let result = server.details(json!({"name": "New", "user": 2})).await;

    assert!(matches!(result, Err(ResourceError::FieldTypeMismatch { .. })));
    assert_eq!(server.id, Some(7));
    assert_eq!(server.name.as_deref(), Some("Old"));
}

#[tokio::test]
async fn test_errors_after_a_sent_mutation_are_not_local() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({"object": "server", "attributes": {"user": "not-a-number"}}));
    let mut server = server_on(ApiSurface::Application, &mock);

    let error = server
        .details(json!({"name": "New", "user": 2}))
        .await
        .unwrap_err();

    assert_eq!(mock.request_count(), 1);
    assert!(matches!(error, ResourceError::FieldTypeMismatch { ref field, .. } if field == "user"));
    assert!(!error.is_local());

    mock.push_response(json!({"object": "list", "data": [{"object": "backup", "attributes": {}}]}));
    let node = Node::from_payload(
        server.core().transport(),
        ApiSurface::Application,
        &json!({"object": "node", "attributes": {"id": 1}}),
    )
    .unwrap();
    let error = node.allocations(&ListQuery::new()).await.unwrap_err();

    assert_eq!(mock.request_count(), 2);
    assert!(matches!(error, ResourceError::UnknownResource { ref object } if object == "backup"));
    assert!(!error.is_local());
}

#[tokio::test]
async fn test_errors_before_any_request_are_local() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Client, &mock);

    assert!(server.power("jump").await.unwrap_err().is_local());
    assert!(server.suspend().await.unwrap_err().is_local());

    let mut server = server_on(ApiSurface::Application, &mock);
    assert!(server.details(json!({"user": 2})).await.unwrap_err().is_local());
    assert_eq!(mock.request_count(), 0);
}

// ============================================================================
// Other Endpoints
// ============================================================================

#[tokio::test]
async fn test_suspend_unsuspend_reinstall_paths() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Application, &mock);

    server.suspend().await.unwrap();
    server.unsuspend().await.unwrap();
    server.reinstall().await.unwrap();

    let requests = mock.requests();
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/servers/7/suspend", "/servers/7/unsuspend", "/servers/7/reinstall"]
    );
    assert!(requests.iter().all(|r| r.http_method == HttpMethod::Post));
}

#[tokio::test]
async fn test_delete_paths() {
    let mock = Arc::new(MockTransport::new());
    let server = server_on(ApiSurface::Application, &mock);

    server.delete(false).await.unwrap();
    server.delete(true).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/servers/7");
    assert_eq!(requests[1].path, "/servers/7/force");
    assert!(requests.iter().all(|r| r.http_method == HttpMethod::Delete));
}

#[tokio::test]
async fn test_websocket_credentials() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({
        "data": {"token": "eyJ0eXAi", "socket": "wss://node.example.com:8080/api/servers/1a7ce997/ws"}
    }));
    let server = server_on(ApiSurface::Client, &mock);

    let credentials = server.websocket().await.unwrap();

    assert_eq!(credentials.token, "eyJ0eXAi");
    assert!(credentials.socket.starts_with("wss://"));
    let request = mock.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.path, "/servers/1a7ce997/websocket");
}

#[tokio::test]
async fn test_websocket_without_token_is_invalid_payload() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({"data": {"socket": "wss://x"}}));
    let server = server_on(ApiSurface::Client, &mock);

    assert!(matches!(
        server.websocket().await,
        Err(ResourceError::InvalidPayload { .. })
    ));
}

#[tokio::test]
async fn test_resources_returns_stats() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({
        "object": "stats",
        "attributes": {
            "current_state": "starting",
            "is_suspended": false,
            "resources": {"memory_bytes": 1024, "cpu_absolute": 0.5}
        }
    }));
    let server = server_on(ApiSurface::Client, &mock);

    let stats = server.resources().await.unwrap();

    assert_eq!(stats.current_state, Some(PowerState::Starting));
    assert_eq!(stats.usage().memory_bytes, 1024);
    assert_eq!(stats.surface(), ApiSurface::Client);
    assert_eq!(mock.last_request().unwrap().path, "/servers/1a7ce997/resources");
}

#[tokio::test]
async fn test_transport_errors_propagate() {
    let mock = Arc::new(MockTransport::new());
    mock.push_error(HttpError::Response(HttpResponseError {
        code: 404,
        body: json!({"errors": [{"code": "NotFoundHttpException"}]}),
    }));
    let server = server_on(ApiSurface::Client, &mock);

    match server.power("start").await {
        Err(ResourceError::Http(HttpError::Response(e))) => {
            assert_eq!(e.status_kind(), StatusKind::NotFound);
        }
        other => panic!("expected a 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_node_configuration_and_allocations() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({"debug": false, "api": {"port": 8080}}));
    mock.push_response(json!({
        "object": "list",
        "data": [{"object": "allocation", "attributes": {"id": 1, "ip": "10.0.0.1", "port": 25565}}],
        "meta": {"pagination": {"total": 1, "count": 1, "per_page": 50, "current_page": 1, "total_pages": 1}}
    }));
    let transport: SharedTransport = mock.clone();
    let node = Node::from_payload(
        &transport,
        ApiSurface::Application,
        &json!({"object": "node", "attributes": {"id": 3}}),
    )
    .unwrap();

    let config = node.configuration().await.unwrap();
    assert_eq!(config.get("api").unwrap().get("port").unwrap().as_u64(), Some(8080));

    let allocations = node.allocations(&ListQuery::new().page(2)).await.unwrap();
    assert_eq!(allocations.resources::<Allocation>().count(), 1);
    assert!(!allocations.pagination().unwrap().has_next_page());

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/nodes/3/configuration");
    assert_eq!(requests[1].path, "/nodes/3/allocations");
    assert_eq!(
        requests[1].query.as_ref().unwrap().get("page"),
        Some(&"2".to_string())
    );
}

#[tokio::test]
async fn test_nest_eggs_and_egg() {
    let mock = Arc::new(MockTransport::new());
    mock.push_response(json!({"object": "list", "data": [
        {"object": "egg", "attributes": {"id": 1, "name": "Paper"}},
        {"object": "egg", "attributes": {"id": 2, "name": "Forge"}}
    ]}));
    mock.push_response(json!({"object": "egg", "attributes": {"id": 2, "name": "Forge", "nest": 1}}));
    let transport: SharedTransport = mock.clone();
    let nest = Nest::from_payload(
        &transport,
        ApiSurface::Application,
        &json!({"object": "nest", "attributes": {"id": 1}}),
    )
    .unwrap();

    let eggs = nest.eggs(&ListQuery::new()).await.unwrap();
    let names: Vec<_> = eggs.resources::<Egg>().filter_map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["Paper", "Forge"]);

    let egg = nest.egg(2, &["variables"]).await.unwrap();
    assert_eq!(egg.nest, Some(1));

    let request = mock.last_request().unwrap();
    assert_eq!(request.path, "/nests/1/eggs/2");
    assert_eq!(
        request.query.unwrap().get("include"),
        Some(&"variables".to_string())
    );
}
