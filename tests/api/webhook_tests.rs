//! Webhook Endpoint Tests
//!
//! Deliveries are authenticated by the bot token carried in the path
//! and the secret token header. Telegram redelivers on any non-2xx, so
//! every refusal here is also a redelivery request.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{active_webhook_token, body_json, TestApp};

fn membership_update() -> String {
    json!({
        "update_id": 7001,
        "my_chat_member": {
            "chat": {"id": -100123, "type": "group", "title": "Ops"},
            "new_chat_member": {"status": "member"}
        }
    })
    .to_string()
}

/// With no client there is no registration this delivery could belong to
#[tokio::test]
async fn test_webhook_without_client_is_unavailable() {
    let app = TestApp::unconfigured().await;

    let response = app
        .post_webhook("123456:ghost", Some("hook-secret-1"), &membership_update())
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10009);
}

/// A delivery addressed to a superseded token no longer gets in
#[tokio::test]
async fn test_webhook_with_wrong_token_is_not_found() {
    let app = TestApp::configured().await;

    let response = app
        .post_webhook("999999:wrong", Some("hook-secret-1"), &membership_update())
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10001);
}

/// The secret header must match the configured webhook secret
#[tokio::test]
async fn test_webhook_with_wrong_secret_is_unauthorized() {
    let app = TestApp::configured().await;
    let token = active_webhook_token(&app);

    let response = app
        .post_webhook(&token, Some("not-the-secret"), &membership_update())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A missing secret header is the same as a wrong one
#[tokio::test]
async fn test_webhook_without_secret_header_is_unauthorized() {
    let app = TestApp::configured().await;
    let token = active_webhook_token(&app);

    let response = app.post_webhook(&token, None, &membership_update()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An authenticated delivery that cannot be recorded is refused so
/// Telegram redelivers it once the database returns
#[tokio::test]
async fn test_webhook_with_dead_database_asks_for_redelivery() {
    let app = TestApp::configured().await;
    let token = active_webhook_token(&app);

    let response = app
        .post_webhook(&token, Some("hook-secret-1"), &membership_update())
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
