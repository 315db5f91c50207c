//! Application settings and configuration structures.
//!
//! These are the process-lifetime settings loaded once at startup. The
//! operator-editable runtime configuration (bot token, database URL,
//! secrets) is a separate layer owned by [`super::store::ConfigStore`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Runtime configuration store (settings file, watcher)
    pub runtime: RuntimeSettings,

    /// Database pool configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Telegram Bot API configuration
    pub bot: BotSettings,

    /// Admin token settings
    pub auth: AuthSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Runtime configuration store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeSettings {
    /// Path of the persisted runtime configuration file
    pub settings_path: String,

    /// Debounce window for file-watch triggered reloads in milliseconds
    pub watch_debounce_ms: u64,
}

/// PostgreSQL pool configuration. The connection URL itself is part of
/// the runtime configuration, not the process settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Grace period when closing a pool during reconfiguration, in seconds
    pub close_grace_seconds: u64,
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotSettings {
    /// Bot API base URL; override to point at a local stub in tests
    pub api_base: String,

    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// Admin authentication configuration. The signing secret lives in the
/// runtime configuration so that rotating it takes effect immediately.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the pool sizing is inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("runtime.settings_path", "settings.json")?
            .set_default("runtime.watch_debounce_ms", 500)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.close_grace_seconds", 5)?
            .set_default("bot.api_base", "https://api.telegram.org")?
            .set_default("bot.request_timeout_seconds", 10)?
            .set_default("auth.access_token_expiry_minutes", 480)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option(
                "server.host",
                std::env::var("SERVER_HOST").ok(),
            )?
            .set_override_option(
                "server.port",
                std::env::var("SERVER_PORT").ok(),
            )?
            .set_override_option(
                "runtime.settings_path",
                std::env::var("SETTINGS_PATH").ok(),
            )?
            .set_override_option(
                "bot.api_base",
                std::env::var("BOT_API_BASE").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                if settings.database.min_connections > settings.database.max_connections {
                    return Err(ConfigError::Message(format!(
                        "database.min_connections ({}) exceeds database.max_connections ({})",
                        settings.database.min_connections, settings.database.max_connections
                    )));
                }
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid server address configuration")
    }
}
