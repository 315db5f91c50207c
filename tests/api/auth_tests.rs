//! Authentication API Tests

use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use notify_bot::application::services::issue_token;
use notify_bot::domain::{User, UserRole};

use crate::common::{body_json, TestApp};

/// Login needs the account table, so it is unavailable before any
/// database exists
#[tokio::test]
async fn test_login_before_configuration_is_unavailable() {
    let app = TestApp::unconfigured().await;
    let body = json!({"username": "ops", "password": "super-secret-pw"});

    let response = app.post_json("/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10009);
}

/// Same when the service is configured but its database is down
#[tokio::test]
async fn test_login_with_dead_database_is_unavailable() {
    let app = TestApp::configured().await;
    let body = json!({"username": "ops", "password": "super-secret-pw"});

    let response = app.post_json("/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// Credential shape is checked before anything else
#[tokio::test]
async fn test_login_rejects_short_password() {
    let app = TestApp::unconfigured().await;
    let body = json!({"username": "ops", "password": "short"});

    let response = app.post_json("/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10007);
}

/// Protected routes refuse requests without a token
#[tokio::test]
async fn test_protected_endpoint_without_token_is_unauthorized() {
    let app = TestApp::configured().await;

    let response = app.get("/api/v1/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10003);
}

/// Before setup there is no signing secret, so no bearer token can be
/// validated at all
#[tokio::test]
async fn test_protected_endpoint_before_configuration_is_precondition_failed() {
    let app = TestApp::unconfigured().await;

    let response = app.get_auth("/api/v1/auth/me", "some.jwt.token").await;

    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10008);
}

/// Garbage tokens are refused
#[tokio::test]
async fn test_protected_endpoint_with_garbage_token_is_unauthorized() {
    let app = TestApp::configured().await;

    let response = app.get_auth("/api/v1/auth/me", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Tokens are verified against the live signing secret, not the one
/// they were minted under
#[tokio::test]
async fn test_token_signed_with_foreign_secret_is_rejected() {
    let app = TestApp::configured().await;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: "ops".into(),
        password_hash: String::new(),
        role: UserRole::Admin,
        created_at: now,
        updated_at: now,
    };
    let foreign = issue_token(&user, "ffffffffffffffffffffffffffffffff", 60).unwrap();

    let response = app.get_auth("/api/v1/auth/me", &foreign).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Token validation happens without the database; only the lookup
/// behind /me needs it
#[tokio::test]
async fn test_me_with_valid_token_but_dead_database_is_unavailable() {
    let app = TestApp::configured().await;
    let token = app.admin_token();

    let response = app.get_auth("/api/v1/auth/me", &token).await;

    // Past the auth middleware (not a 401), stopped by the pool gate.
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
