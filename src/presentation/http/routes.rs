//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Telegram webhook deliveries, authenticated by path token and
        // secret header rather than a JWT
        .route("/webhook/{token}", post(handlers::webhook::receive_update))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public login plus the protected current-account route
        .nest("/auth", auth_routes(state.clone()))
        // Setup is public while it lasts; the rest requires a JWT
        .nest("/settings", settings_routes(state.clone()))
        // Protected admin resources
        .nest("/users", user_routes(state.clone()))
        .nest("/groups", group_routes(state.clone()))
        .nest("/channels", channel_routes(state.clone()))
        .nest("/api-keys", api_key_routes(state))
        // Machine endpoint, authenticated by API key header
        .route("/notify", post(handlers::notify::notify))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(handlers::auth::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(protected)
}

/// Runtime settings routes
fn settings_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(handlers::settings::get_settings))
        .route("/", put(handlers::settings::put_settings))
        .route(
            "/test-database-configuration",
            post(handlers::settings::test_database),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        // Self-guarding: answers 409 once the service is set up
        .route("/setup", put(handlers::settings::setup))
        .merge(protected)
}

/// Admin account routes (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::user::list_users))
        .route("/", post(handlers::user::create_user))
        .route("/{user_id}", patch(handlers::user::update_user))
        .route("/{user_id}", delete(handlers::user::delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Registered chat routes (protected)
fn group_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::group::list_groups))
        .route("/{chat_id}", delete(handlers::group::delete_group))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Notification channel routes (protected)
fn channel_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::channel::list_channels))
        .route("/", post(handlers::channel::create_channel))
        .route("/{channel_id}", patch(handlers::channel::update_channel))
        .route("/{channel_id}", delete(handlers::channel::delete_channel))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// API key routes (protected)
fn api_key_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::api_key::list_api_keys))
        .route("/", post(handlers::api_key::create_api_key))
        .route("/{key_id}", delete(handlers::api_key::delete_api_key))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
