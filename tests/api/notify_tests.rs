//! Notification Endpoint Tests
//!
//! The happy path needs a live database and is covered by the service
//! unit tests with in-memory repositories; these exercise the gate
//! ordering callers observe from outside.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, TestApp};

fn notify_body() -> String {
    json!({"channel": "deploys", "message": "build 1281 is live"}).to_string()
}

/// No key header, no service
#[tokio::test]
async fn test_notify_without_key_header_is_unauthorized() {
    let app = TestApp::configured().await;

    let response = app.post_json("/api/v1/notify", &notify_body()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10003);
}

/// Payload shape is checked before the key is even looked at
#[tokio::test]
async fn test_notify_rejects_oversized_message() {
    let app = TestApp::configured().await;
    let body = json!({"channel": "deploys", "message": "x".repeat(5000)});

    let response = app
        .post_json_with_api_key("/api/v1/notify", &body.to_string(), "nk_whatever_shhh")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10007);
}

/// Before setup the endpoint says so explicitly instead of pretending
/// the key is wrong
#[tokio::test]
async fn test_notify_before_configuration_is_precondition_failed() {
    let app = TestApp::unconfigured().await;

    let response = app
        .post_json_with_api_key("/api/v1/notify", &notify_body(), "nk_whatever_shhh")
        .await;

    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10008);
}

/// With the database down, key verification is impossible; callers get
/// a retryable 503 rather than a misleading 401
#[tokio::test]
async fn test_notify_with_dead_database_is_unavailable() {
    let app = TestApp::configured().await;

    let response = app
        .post_json_with_api_key("/api/v1/notify", &notify_body(), "nk_whatever_shhh")
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10009);
}
