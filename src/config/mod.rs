//! # Configuration Module
//!
//! Two configuration layers live here:
//!
//! - **Process settings** ([`Settings`]): loaded once at startup from
//!   environment variables (prefixed with APP__), configuration files
//!   (config/default.toml, config/{environment}.toml) and .env files
//!   (via dotenvy). Static for the process lifetime.
//! - **Runtime configuration** ([`RuntimeConfig`]): the operator-editable
//!   value owned by [`ConfigStore`]. Created, replaced and removed while
//!   the process runs; the database pool and the bot client are derived
//!   from it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notify_bot::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Server will listen on {}:{}", settings.server.host, settings.server.port);
//! ```

pub mod jsonc;
mod schema;
mod settings;
pub mod store;
pub mod watcher;

pub use schema::{changed_fields, ConfigField, RuntimeConfig};
pub use settings::*;
pub use store::{
    ChangeHandler, ConfigChange, ConfigError, ConfigStore, Disposer, HandlerResult,
    ReachabilityProbe, SubscriptionId,
};
pub use watcher::SettingsWatcher;
