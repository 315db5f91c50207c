//! Admin Account Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::UserResponse;
use crate::application::services::hash_password;
use crate::domain::{User, UserRepository};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List admin accounts
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let pool = state.db.connection()?;
    let users = PgUserRepository::new(pool).list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create an admin account
pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    let pool = state.db.connection()?;
    let repo = PgUserRepository::new(pool);

    if repo.username_exists(&body.username).await? {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash =
        hash_password(&body.password).map_err(|e| AppError::Internal(e.to_string()))?;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: body.username,
        password_hash,
        role: body.role.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let created = repo.create(&user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Update an admin account's password or role
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    let pool = state.db.connection()?;
    let repo = PgUserRepository::new(pool);

    let mut user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if let Some(password) = &body.password {
        user.password_hash =
            hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?;
    }
    if let Some(role) = body.role {
        user.role = role;
    }
    user.updated_at = Utc::now();

    let updated = repo.update(&user).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// Delete an admin account
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    // Whoever is making this request must survive it.
    if auth.user_id == user_id {
        return Err(AppError::Conflict("Cannot delete your own account".into()));
    }

    let pool = state.db.connection()?;
    PgUserRepository::new(pool).delete(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
