use dscc_rs::{DsccError, ErrorKind, ListParams};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;

mod common;
use common::*;

async fn token_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/as/token.oauth2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"wire-token","expires_in":7200}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn get_returns_body_unchanged() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let mock = server
        .mock("GET", "/api/v1/storage-systems/abc")
        .match_header("authorization", "Bearer wire-token")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"abc","name":"x"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let system = client.storage_systems().get("abc").await.unwrap();

    assert_eq!(system, json!({"id": "abc", "name": "x"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn list_responses_keep_their_envelope() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/volumes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[{"id":"v1"},{"id":"v2"}],"total":2}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let volumes = client.storage_systems().volumes().await.unwrap();

    assert_eq!(volumes["total"], 2);
    assert_eq!(dscc_rs::utils::items(&volumes).len(), 2);
}

#[tokio::test]
async fn list_params_become_query_string() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let mock = server
        .mock("GET", "/api/v1/audit-events")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter".into(), "code eq 'Login'".into()),
            Matcher::UrlEncoded("sort".into(), "occurredAt desc".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let params = ListParams::new()
        .filter("code eq 'Login'")
        .sort("occurredAt desc")
        .limit(10);
    client.audit().audit_events_with(&params).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn post_sends_json_body() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let mock = server
        .mock("POST", "/api/v1/groups")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "ops", "description": "operators"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"g1","name":"ops"}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let group = client.user().create_group("ops", "operators").await.unwrap();

    assert_eq!(group["id"], "g1");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("DELETE", "/api/v1/groups/g1")
        .with_status(204)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let result = client.user().delete_group("g1").await.unwrap();

    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn not_found_maps_to_api_error() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/issues/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errorCode":"HPE_GL_ERROR_NOT_FOUND","message":"issue not found"}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.audit().issue("missing").await.unwrap_err();

    match &err {
        DsccError::Api { status, message, response_body, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "issue not found");
            assert!(response_body.as_deref().unwrap().contains("HPE_GL_ERROR_NOT_FOUND"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn forbidden_is_an_authentication_kind() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/dual-auth-operations")
        .with_status(403)
        .with_body("Forbidden")
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.dual_authorization().operations().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn too_many_requests_carries_retry_after() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/tasks")
        .with_status(429)
        .with_header("retry-after", "12")
        .with_body("slow down")
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.platform().tasks().await.unwrap_err();

    match err {
        DsccError::RateLimited { retry_after, .. } => {
            assert_eq!(retry_after, Some(Duration::from_secs(12)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn server_error_without_body_uses_reason() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/hci-limits")
        .with_status(502)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.hci().limits().await.unwrap_err();

    assert!(matches!(err, DsccError::Api { status: 502, ref message, .. } if message == "Bad Gateway"));
}

#[tokio::test]
async fn invalid_json_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.platform().settings().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = create_http_dscc("http://127.0.0.1:1").with_access_token("t");
    let err = client.audit().issues().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn error_bodies_are_sanitized() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _mock = server
        .mock("GET", "/api/v1/devices")
        .with_status(400)
        .with_body(r#"{"detail":"bad header Bearer wire-token"}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let err = client.user().devices().await.unwrap_err();
    let rendered = format!("{:?}", err);

    assert!(!rendered.contains("wire-token"));
}

#[tokio::test]
async fn generic_request_passes_query_and_body() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let mock = server
        .mock("PATCH", "/api/v1/settings/s1")
        .match_query(Matcher::UrlEncoded("dryRun".into(), "true".into()))
        .match_body(Matcher::Json(json!({"value": 5})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"s1","value":5}"#)
        .create_async()
        .await;

    let client = create_http_dscc(&server.url());
    let result = client
        .request(
            Method::PATCH,
            "/api/v1/settings/s1",
            Some(&[("dryRun", "true")]),
            Some(json!({"value": 5})),
        )
        .await
        .unwrap();

    assert_eq!(result["value"], 5);
    mock.assert_async().await;
}
