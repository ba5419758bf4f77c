#![allow(clippy::unwrap_used)]
// Gateway behavior tests using wiremock: bearer injection, envelope
// unwrapping, and the global 401 session teardown.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panelops_api::models::User;
use panelops_api::{Error, PanelClient, SessionEvent, SessionStore};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PanelClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = PanelClient::with_client(reqwest::Client::new(), base_url, SessionStore::new());
    (server, client)
}

fn admin() -> User {
    User {
        id: 1,
        username: "admin".into(),
        ..User::default()
    }
}

fn queue_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "mail_queue": [],
            "mail_queue_count": 0,
            "cron_jobs": [],
            "pending_tasks": 0
        }
    })
}

// ── Outgoing stage ──────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_session_held() {
    let (server, client) = setup().await;
    client.session().set("tok-abc123", admin());

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .and(header("authorization", "Bearer tok-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_body()))
        .expect(1)
        .mount(&server)
        .await;

    client.queue_status().await.unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_without_session() {
    let (server, client) = setup().await;

    // Trips only if an Authorization header sneaks through.
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_body()))
        .expect(1)
        .mount(&server)
        .await;

    client.queue_status().await.unwrap();
}

// ── Incoming stage: 401 teardown ────────────────────────────────────

#[tokio::test]
async fn test_401_clears_session_before_caller_sees_error() {
    let (server, client) = setup().await;
    client.session().set("tok-stale", admin());
    let mut events = client.session_events();

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Invalid or expired token"
        })))
        .mount(&server)
        .await;

    let result = client.queue_status().await;

    // The caller still gets the failure...
    match result {
        Err(ref e @ Error::AuthExpired { .. }) => {
            assert_eq!(e.panel_message(), Some("Invalid or expired token"));
        }
        other => panic!("expected AuthExpired, got: {other:?}"),
    }
    // ...and by the time it does, both halves of the session are gone.
    assert!(client.session().token().is_none());
    assert!(client.session().user().is_none());
    assert!(!client.session().is_authenticated());

    assert!(events.has_changed().unwrap());
    assert_eq!(*events.borrow_and_update(), SessionEvent::Expired);
}

#[tokio::test]
async fn test_401_on_login_is_handled_like_any_other() {
    let (server, client) = setup().await;
    let mut events = client.session_events();

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let result = client.login("admin", "wrong").await;

    match result {
        Err(ref e @ Error::AuthExpired { .. }) => {
            assert_eq!(e.panel_message(), Some("Invalid credentials"));
        }
        other => panic!("expected AuthExpired, got: {other:?}"),
    }
    assert!(!client.session().is_authenticated());
    assert_eq!(*events.borrow_and_update(), SessionEvent::Expired);
}

// ── Incoming stage: non-401 failures stay local ─────────────────────

#[tokio::test]
async fn test_non_401_failure_leaves_session_untouched() {
    let (server, client) = setup().await;
    client.session().set("tok-keep", admin());
    let events = client.session_events();

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "internal error"
        })))
        .mount(&server)
        .await;

    let result = client.queue_status().await;

    match result {
        Err(Error::Api {
            status,
            ref message,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("internal error"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(client.session().token().as_deref(), Some("tok-keep"));
    assert_eq!(client.session().user().unwrap().username, "admin");
    assert_eq!(*events.borrow(), SessionEvent::Active);
}

#[tokio::test]
async fn test_403_maps_to_permission_denied() {
    let (server, client) = setup().await;
    client.session().set("tok-user", admin());

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "error": "Insufficient permissions"
        })))
        .mount(&server)
        .await;

    let result = client.list_users().await;

    match result {
        Err(ref e @ Error::PermissionDenied { .. }) => {
            assert_eq!(e.panel_message(), Some("Insufficient permissions"));
        }
        other => panic!("expected PermissionDenied, got: {other:?}"),
    }
    // 403 is local: the session survives.
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_404_maps_to_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/domains/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "Domain not found"
        })))
        .mount(&server)
        .await;

    let result = client.get_domain(99).await;
    assert!(
        matches!(result, Err(ref e) if e.is_not_found()),
        "expected NotFound, got: {result:?}"
    );
}

// ── Envelope handling ───────────────────────────────────────────────

#[tokio::test]
async fn test_success_false_on_200_is_an_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/server/queue/flush"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "permission denied"
        })))
        .mount(&server)
        .await;

    let result = client.flush_mail_queue().await;

    match result {
        Err(ref e @ Error::Api { .. }) => {
            assert_eq!(e.panel_message(), Some("permission denied"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_body_without_error_field_has_no_panel_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.queue_status().await;

    match result {
        Err(ref e @ Error::Api { status: 502, .. }) => {
            assert_eq!(e.panel_message(), None);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let result = client.queue_status().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("<html>"), "raw body lost: {body}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
