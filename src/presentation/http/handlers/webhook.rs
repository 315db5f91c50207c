//! Webhook Handlers
//!
//! Inbound deliveries from Telegram. Two checks gate every delivery:
//! the path must carry the active bot token, and the secret token
//! header must match the configured webhook secret. Both rotate with
//! the runtime configuration, so a delivery for a superseded
//! registration no longer gets in.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::application::services::UpdateService;
use crate::infrastructure::repositories::PgGroupRepository;
use crate::infrastructure::telegram::{types::Update, SECRET_TOKEN_HEADER};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Receive one Telegram update. Non-2xx answers make Telegram
/// redeliver, which is exactly what we want while resources are down.
pub async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Result<StatusCode, AppError> {
    let Some((_, active_token)) = state.bot.instance_and_token() else {
        return Err(AppError::NotReady("telegram client".into()));
    };
    if token != active_token {
        return Err(AppError::NotFound("Unknown webhook path".into()));
    }

    let config = state.store.get().ok_or(AppError::NotConfigured)?;
    let presented = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if presented != config.webhook_secret {
        return Err(AppError::Unauthorized("Webhook secret mismatch".into()));
    }

    let pool = state.db.connection()?;
    let service = UpdateService::new(
        Arc::new(PgGroupRepository::new(pool)),
        Arc::clone(&state.bot),
    );
    service.handle(update).await?;

    Ok(StatusCode::OK)
}
