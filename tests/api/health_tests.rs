//! Health Endpoint Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, TestApp};

/// The basic health endpoint never depends on configuration
#[tokio::test]
async fn test_health_is_ok_without_configuration() {
    let app = TestApp::unconfigured().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

/// Liveness only says the process is running
#[tokio::test]
async fn test_liveness_is_ok_without_configuration() {
    let app = TestApp::unconfigured().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
}

/// An unconfigured service is waiting for setup, not dead: readiness
/// reports degraded with a 200 so orchestrators keep it routable
#[tokio::test]
async fn test_readiness_unconfigured_is_degraded_with_200() {
    let app = TestApp::unconfigured().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["configuration"]["configured"], false);
    assert_eq!(body["checks"]["database"]["status"], "degraded");
    assert_eq!(body["checks"]["bot"]["status"], "degraded");
}

/// A configured service whose database is gone is genuinely unhealthy
#[tokio::test]
async fn test_readiness_with_dead_database_is_unhealthy_with_503() {
    let app = TestApp::configured().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["configuration"]["configured"], true);
    assert_eq!(body["checks"]["database"]["status"], "unhealthy");
    // The bot client itself was built fine; only the database is down.
    assert_eq!(body["checks"]["bot"]["status"], "healthy");
}

/// The metrics endpoint serves the Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint_responds() {
    let app = TestApp::unconfigured().await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}
