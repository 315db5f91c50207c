//! Database Lifecycle Manager
//!
//! Owns the PostgreSQL pool derived from the runtime configuration.
//! Subscribed to the configuration store filtered on the database URL:
//! each relevant change closes the previous pool (bounded grace), opens
//! a pool against the new URL, migrates it, and republishes it to every
//! derived resource cell.
//!
//! Failures here never crash the process. A bad database URL leaves the
//! pool absent, which disables persistence-dependent routes until the
//! next configuration change fixes it.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{ConfigChange, ConfigField, ConfigStore, DatabaseSettings, SubscriptionId};
use crate::infrastructure::database;
use crate::infrastructure::metrics;
use crate::shared::notifier::ChangeNotifier;
use crate::shared::resource::{ResourceError, ResourceRef};

/// Rebind event fired at every pool publish, carrying the new pool (or
/// absence) to the cells derived through [`DatabaseManager::prepare`].
const POOL_REBOUND: &str = "pool-rebound";

/// Lifecycle manager for the configuration-derived PostgreSQL pool.
pub struct DatabaseManager {
    settings: DatabaseSettings,
    pool: ResourceRef<PgPool>,
    rebinders: ChangeNotifier<&'static str, Option<PgPool>>,
}

impl DatabaseManager {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self {
            settings,
            pool: ResourceRef::new("database pool"),
            rebinders: ChangeNotifier::new(),
        }
    }

    /// Register this manager on the store, filtered on the database URL.
    /// The bootstrap invocation applies whatever the store currently
    /// holds, so construction order does not matter.
    pub async fn subscribe(self: &Arc<Self>, store: &ConfigStore) -> SubscriptionId {
        let manager = Arc::clone(self);
        store
            .subscribe(
                Some(vec![ConfigField::DatabaseUrl]),
                Arc::new(move |change| {
                    let manager = Arc::clone(&manager);
                    Box::pin(async move {
                        manager.apply(change).await;
                        Ok(None)
                    })
                }),
            )
            .await
    }

    /// The live pool, or a typed not-ready error when no pool exists.
    /// Repositories call this per request; a handle obtained here stays
    /// valid for the request even if a reconfiguration closes the pool
    /// mid-flight (queries then fail with a closed-pool error).
    pub fn connection(&self) -> Result<PgPool, ResourceError> {
        self.pool.get().map(|pool| (*pool).clone())
    }

    /// The live pool if one exists, for presence checks.
    pub fn current(&self) -> Option<PgPool> {
        self.pool.current().map(|pool| (*pool).clone())
    }

    pub fn is_ready(&self) -> bool {
        self.pool.is_ready()
    }

    /// Derive a cell that is rebuilt from the live pool on every
    /// reconfiguration. `build` runs once per successful pool open; call
    /// sites capture the returned [`ResourceRef`] at construction time
    /// and transparently ride out reconnects.
    pub fn prepare<T, F>(&self, name: &'static str, build: F) -> ResourceRef<T>
    where
        T: Send + Sync + 'static,
        F: Fn(PgPool) -> T + Send + Sync + 'static,
    {
        let cell = ResourceRef::new(name);
        let build = Arc::new(build);

        let rebind_cell = cell.clone();
        let rebind_build = Arc::clone(&build);
        self.rebinders.on(
            POOL_REBOUND,
            Arc::new(move |pool: &Option<PgPool>| {
                rebind_cell.publish(pool.clone().map(|p| (*rebind_build)(p)));
                Ok(())
            }),
        );

        // Bind against the current pool so cells derived after a pool
        // already opened start out ready.
        cell.publish(self.current().map(|p| (*build)(p)));
        cell
    }

    /// Handle one configuration change: tear down, then rebuild.
    ///
    /// The store serializes invocations per subscription, so the close
    /// of pool N always completes (or exhausts its grace period) before
    /// pool N+1 opens. At no point are two pools open at once.
    async fn apply(&self, change: ConfigChange) {
        self.close_current().await;

        let config = match change.current {
            Some(config) => config,
            None => {
                info!("no runtime configuration; database pool stays absent");
                metrics::record_pool_rebuild("absent");
                self.publish(None);
                return;
            }
        };

        let pool = match database::pool_options(&self.settings)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                // Fail-safe: a bad database URL disables persistence-
                // dependent routes rather than crashing the process.
                warn!(error = %e, "failed to open database pool; publishing absence");
                metrics::record_pool_rebuild("connect_failed");
                self.publish(None);
                return;
            }
        };

        // The database appears at runtime, so migrations run after every
        // successful open instead of once at boot.
        if let Err(e) = database::run_migrations(&pool).await {
            warn!(error = %e, "database migrations failed; publishing absence");
            metrics::record_pool_rebuild("migrate_failed");
            pool.close().await;
            self.publish(None);
            return;
        }

        info!("database pool opened and migrated");
        metrics::record_pool_rebuild("opened");
        self.publish(Some(pool));
    }

    /// Close the previous pool, waiting out in-flight operations up to
    /// the configured grace period. After the grace period the remaining
    /// operations are abandoned; the pool is already marked closed, so
    /// nothing new can start on it.
    async fn close_current(&self) {
        let previous = match self.pool.current() {
            Some(pool) => pool,
            None => return,
        };

        let grace = Duration::from_secs(self.settings.close_grace_seconds);
        if tokio::time::timeout(grace, previous.close()).await.is_err() {
            warn!(
                grace_seconds = self.settings.close_grace_seconds,
                "database pool close exceeded grace period; abandoning in-flight operations"
            );
        }
    }

    /// Replace the published pool and fan the change out to every
    /// derived cell.
    fn publish(&self, pool: Option<PgPool>) {
        self.pool.publish(pool.clone());
        self.rebinders.emit(&POOL_REBOUND, &pool);
    }
}
