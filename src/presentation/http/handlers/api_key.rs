//! API Key Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::CreateApiKeyRequest;
use crate::application::dto::response::{ApiKeyResponse, CreatedApiKeyResponse};
use crate::domain::{ApiKey, ApiKeyRepository};
use crate::infrastructure::repositories::PgApiKeyRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List API keys
pub async fn list_api_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiKeyResponse>>, AppError> {
    let pool = state.db.connection()?;
    let keys = PgApiKeyRepository::new(pool).list().await?;

    Ok(Json(keys.into_iter().map(ApiKeyResponse::from).collect()))
}

/// Mint an API key. The response is the only place the plaintext key
/// ever appears.
pub async fn create_api_key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<CreatedApiKeyResponse>), AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    let pool = state.db.connection()?;
    let repo = PgApiKeyRepository::new(pool);

    let (key, plaintext) = ApiKey::mint(&body.name);
    let created = repo.create(&key).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedApiKeyResponse::from_key(created, plaintext)),
    ))
}

/// Revoke an API key
pub async fn delete_api_key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(key_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let pool = state.db.connection()?;
    PgApiKeyRepository::new(pool).delete(key_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
