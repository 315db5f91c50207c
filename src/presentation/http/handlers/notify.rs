//! Notification Handlers
//!
//! The machine-facing endpoint. Authentication is an API key in the
//! `X-Api-Key` header, not a JWT.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use validator::Validate;

use crate::application::dto::request::NotifyRequest;
use crate::application::dto::response::NotifyResponse;
use crate::application::services::NotifyService;
use crate::infrastructure::repositories::{PgApiKeyRepository, PgChannelRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Request header carrying the plaintext API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Deliver a message to a named channel
pub async fn notify(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let raw_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-Api-Key header".into()))?;

    if !state.store.is_configured() {
        return Err(AppError::NotConfigured);
    }
    let pool = state.db.connection()?;

    let service = NotifyService::new(
        Arc::new(PgApiKeyRepository::new(pool.clone())),
        Arc::new(PgChannelRepository::new(pool)),
        Arc::clone(&state.bot),
    );

    service.authenticate(raw_key).await?;
    let chat_id = service.send(&body.channel, &body.message).await?;

    Ok(Json(NotifyResponse {
        status: "sent".into(),
        channel: body.channel,
        chat_id,
    }))
}
