//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::ConfigError;
use crate::shared::resource::ResourceError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The service has no runtime configuration yet.
    #[error("Service is not configured")]
    NotConfigured,

    /// A configuration-derived resource has no live instance.
    #[error("Resource '{0}' is not ready")]
    NotReady(String),

    /// A submitted runtime configuration failed schema validation.
    #[error("Configuration is invalid")]
    InvalidConfig(validator::ValidationErrors),

    /// A submitted runtime configuration named a database we cannot reach.
    #[error("Database is unreachable: {0}")]
    DatabaseUnreachable(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ResourceError> for AppError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotReady(name) => AppError::NotReady(name.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(errors) => AppError::InvalidConfig(errors),
            ConfigError::DatabaseUnreachable(cause) => AppError::DatabaseUnreachable(cause),
            ConfigError::Persist(e) => AppError::Internal(format!("settings persistence: {}", e)),
            ConfigError::Serialize(e) => {
                AppError::Internal(format!("settings serialization: {}", e))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, 10003, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, 10004, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, 10005, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, 10007, msg.clone()),
            AppError::NotConfigured => (
                StatusCode::PRECONDITION_FAILED,
                10008,
                "Service is not configured".into(),
            ),
            AppError::NotReady(name) => (
                StatusCode::SERVICE_UNAVAILABLE,
                10009,
                format!("Resource '{}' is not ready", name),
            ),
            AppError::InvalidConfig(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                10010,
                "Configuration is invalid".into(),
            ),
            AppError::DatabaseUnreachable(cause) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                10011,
                format!("Database is unreachable: {}", cause),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let errors = match &self {
            AppError::InvalidConfig(validation) => {
                Some(crate::shared::validation::field_errors(validation))
            }
            _ => None,
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
