//! Database Module
//!
//! PostgreSQL pool construction, migrations, and the lifecycle manager
//! that rebuilds the pool whenever the runtime configuration changes.

pub mod manager;
pub mod probe;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;

pub use manager::DatabaseManager;
pub use probe::PgProbe;

/// Pool options derived from the process settings. The connection URL is
/// not part of these settings; it arrives with the runtime configuration.
pub fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
