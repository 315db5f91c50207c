//! Notification Channel Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::{CreateChannelRequest, UpdateChannelRequest};
use crate::application::dto::response::ChannelResponse;
use crate::domain::{Channel, ChannelRepository};
use crate::infrastructure::repositories::PgChannelRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List notification channels
pub async fn list_channels(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChannelResponse>>, AppError> {
    let pool = state.db.connection()?;
    let channels = PgChannelRepository::new(pool).list().await?;

    Ok(Json(
        channels.into_iter().map(ChannelResponse::from).collect(),
    ))
}

/// Create a notification channel routed at a registered chat
pub async fn create_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<ChannelResponse>), AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    let pool = state.db.connection()?;
    let repo = PgChannelRepository::new(pool);

    if repo.name_exists(&body.name).await? {
        return Err(AppError::Conflict("Channel name already exists".into()));
    }

    let now = Utc::now();
    let channel = Channel {
        id: Uuid::new_v4(),
        name: body.name,
        chat_id: body.chat_id,
        created_at: now,
        updated_at: now,
    };

    let created = repo.create(&channel).await?;
    Ok((StatusCode::CREATED, Json(ChannelResponse::from(created))))
}

/// Update a notification channel's name or target chat
pub async fn update_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(channel_id): Path<Uuid>,
    Json(body): Json<UpdateChannelRequest>,
) -> Result<Json<ChannelResponse>, AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    let pool = state.db.connection()?;
    let repo = PgChannelRepository::new(pool);

    let mut channel = repo
        .find_by_id(channel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

    if let Some(name) = body.name {
        channel.name = name;
    }
    if let Some(chat_id) = body.chat_id {
        channel.chat_id = chat_id;
    }
    channel.updated_at = Utc::now();

    let updated = repo.update(&channel).await?;
    Ok(Json(ChannelResponse::from(updated)))
}

/// Delete a notification channel
pub async fn delete_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(channel_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let pool = state.db.connection()?;
    PgChannelRepository::new(pool).delete(channel_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
