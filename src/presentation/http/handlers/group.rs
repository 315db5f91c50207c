//! Registered Chat Handlers
//!
//! Chats register and unregister themselves through bot membership
//! updates; the admin API only lists them and evicts stale rows.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::response::GroupResponse;
use crate::domain::GroupRepository;
use crate::infrastructure::repositories::PgGroupRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List registered chats
pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResponse>>, AppError> {
    let pool = state.db.connection()?;
    let groups = PgGroupRepository::new(pool).list().await?;

    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// Drop a chat registration. Channels routed at it go with it.
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(chat_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let pool = state.db.connection()?;
    PgGroupRepository::new(pool).delete(chat_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
