//! # Notify Bot
//!
//! A Telegram notification gateway implemented in Rust.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Runtime configuration store and file watcher
//! - HTTP server

use anyhow::Result;
use tracing::info;

use notify_bot::config::Settings;
use notify_bot::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment and config files
    let settings = Settings::load()?;

    // Initialize tracing; the environment picks the output format
    notify_bot::telemetry::init_tracing(&settings.environment);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Starting Notify Bot"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
