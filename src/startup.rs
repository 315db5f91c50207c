//! Application Startup
//!
//! Application building and server initialization. Wires the
//! configuration store to the resource managers, starts the settings
//! file watcher, and defers outward-facing bot registration until the
//! listener actually accepts connections.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{ConfigStore, Settings, SettingsWatcher};
use crate::infrastructure::database::{DatabaseManager, PgProbe};
use crate::infrastructure::telegram::BotManager;
use crate::presentation::http::routes;
use crate::presentation::http::handlers::health;
use crate::presentation::middleware::{cors, logging};
use crate::shared::ready::ReadyGate;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<ConfigStore>,
    pub db: Arc<DatabaseManager>,
    pub bot: Arc<BotManager>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    ready: ReadyGate,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();
        let settings = Arc::new(settings);

        // Configuration store with a live database probe
        let probe = Arc::new(PgProbe::new(Duration::from_secs(
            settings.database.acquire_timeout,
        )));
        let store = Arc::new(ConfigStore::new(&settings.runtime.settings_path, probe));

        // Quiet load before anyone subscribes; subscribers receive the
        // loaded value as their bootstrap notification instead.
        match store.load().await {
            Some(_) => tracing::info!(path = %settings.runtime.settings_path, "runtime settings loaded"),
            None => tracing::info!(
                path = %settings.runtime.settings_path,
                "no runtime settings; waiting for setup"
            ),
        }

        let ready = ReadyGate::new();

        // Resource managers bootstrap themselves from the stored value
        let db = Arc::new(DatabaseManager::new(settings.database.clone()));
        db.subscribe(&store).await;
        tracing::info!("database manager subscribed");

        let bot = Arc::new(BotManager::new(settings.bot.clone(), ready.clone()));
        bot.subscribe(&store).await;
        tracing::info!("bot manager subscribed");

        // Pick up edits made directly to the settings file
        SettingsWatcher::new(
            Arc::clone(&store),
            Duration::from_millis(settings.runtime.watch_debounce_ms),
        )
        .spawn();

        // Create app state
        let state = AppState {
            settings: Arc::clone(&settings),
            store,
            db,
            bot,
        };

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            ready,
        })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        // The listener is bound and about to accept; deferred webhook
        // registrations may now advertise this process.
        self.ready.open();
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
