//! Runtime Settings Handlers
//!
//! The HTTP face of the configuration store. Writes go through the
//! store's full pipeline: schema validation, database reachability,
//! persistence, then notification of the resource managers. By the
//! time a write returns, dependent resources have already been rebuilt
//! against the new values.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::{SetupRequest, TestDatabaseRequest};
use crate::application::dto::response::{SettingsResponse, SetupResponse, UserResponse};
use crate::application::services::hash_password;
use crate::config::RuntimeConfig;
use crate::domain::{User, UserRepository, UserRole};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Current runtime settings, in full, for the panel's edit form
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    match state.store.get() {
        Some(config) => Json(SettingsResponse::configured((*config).clone())),
        None => Json(SettingsResponse::unconfigured()),
    }
}

/// Replace the runtime settings wholesale. Callers submit a complete
/// document; there are no partial updates.
pub async fn put_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<RuntimeConfig>,
) -> Result<Json<SettingsResponse>, AppError> {
    auth.require_admin()?;

    state.store.set(body).await?;

    let current = state
        .store
        .get()
        .ok_or_else(|| AppError::Internal("settings absent after accepted write".into()))?;
    Ok(Json(SettingsResponse::configured((*current).clone())))
}

/// First-run setup: store the initial configuration and create the
/// first admin account in one request.
///
/// Honored only while the service is unconfigured or has no accounts;
/// once both exist it answers 409 regardless of payload.
pub async fn setup(
    State(state): State<AppState>,
    Json(body): Json<SetupRequest>,
) -> Result<(StatusCode, Json<SetupResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    // Fail closed: with a configuration present, setup stays open only
    // when we can positively confirm there are no accounts yet.
    if state.store.is_configured() {
        let pool = state
            .db
            .connection()
            .map_err(|_| AppError::Conflict("Service is already configured".into()))?;
        if PgUserRepository::new(pool).count().await? > 0 {
            return Err(AppError::Conflict("Service is already configured".into()));
        }
    }

    state.store.set(body.settings).await?;

    // The database manager rebuilt its pool while the write above was
    // dispatched, so a connection is available now.
    let pool = state.db.connection()?;
    let repo = PgUserRepository::new(pool);

    // The configured database may already hold accounts from an
    // earlier life of this service; never add another first admin.
    if repo.count().await? > 0 {
        return Err(AppError::Conflict("Service is already configured".into()));
    }

    let password_hash =
        hash_password(&body.password).map_err(|e| AppError::Internal(e.to_string()))?;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: body.username,
        password_hash,
        role: UserRole::Admin,
        created_at: now,
        updated_at: now,
    };

    let created = repo.create(&user).await?;
    Ok((
        StatusCode::CREATED,
        Json(SetupResponse {
            user: UserResponse::from(created),
        }),
    ))
}

/// Probe a candidate database URL without applying it
pub async fn test_database(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<TestDatabaseRequest>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;
    body.validate().map_err(validation_error)?;

    state.store.test_reachability(&body.database_url).await?;

    Ok(StatusCode::NO_CONTENT)
}
