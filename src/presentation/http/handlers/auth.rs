//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::application::dto::request::LoginRequest;
use crate::application::dto::response::{TokenResponse, UserResponse};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::domain::UserRepository;
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    // Validate request
    body.validate().map_err(validation_error)?;

    // Create service against the currently published pool
    let pool = state.db.connection()?;
    let user_repo = Arc::new(PgUserRepository::new(pool));
    let auth_service = AuthServiceImpl::new(
        user_repo,
        Arc::clone(&state.store),
        state.settings.auth.clone(),
    );

    // Authenticate
    let tokens = auth_service
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".into())
            }
            AuthError::NotConfigured => AppError::NotConfigured,
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// Current authenticated account
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let pool = state.db.connection()?;
    let user_repo = PgUserRepository::new(pool);

    let user = user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from(user)))
}
