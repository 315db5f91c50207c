//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Runtime configuration updates and file reloads by outcome
//! - Database pool rebuilds by outcome
//! - Bot client rebuilds and webhook registrations by outcome
//! - Notifications dispatched by outcome

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Configuration update counter - explicit writes and removals by outcome
pub static CONFIG_UPDATES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "config_updates_total",
            "Runtime configuration writes by outcome",
        )
        .namespace("notify_bot"),
        &["outcome"], // "accepted", "rejected_invalid", "rejected_unreachable", "persist_failed", "removed"
    )
    .expect("Failed to create CONFIG_UPDATES_TOTAL metric")
});

/// Configuration reload counter - file-watch triggered re-reads by outcome
pub static CONFIG_RELOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("config_reloads_total", "Settings file reloads by outcome")
            .namespace("notify_bot"),
        &["outcome"], // "applied", "unchanged"
    )
    .expect("Failed to create CONFIG_RELOADS_TOTAL metric")
});

/// Database pool rebuild counter - reconfiguration outcomes
pub static POOL_REBUILDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "pool_rebuilds_total",
            "Database pool reconfigurations by outcome",
        )
        .namespace("notify_bot"),
        &["outcome"], // "opened", "absent", "connect_failed", "migrate_failed"
    )
    .expect("Failed to create POOL_REBUILDS_TOTAL metric")
});

/// Bot client rebuild counter - reconfiguration outcomes
pub static BOT_REBUILDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bot_rebuilds_total",
            "Bot client reconfigurations by outcome",
        )
        .namespace("notify_bot"),
        &["outcome"], // "published", "absent", "build_failed"
    )
    .expect("Failed to create BOT_REBUILDS_TOTAL metric")
});

/// Webhook registration counter - remote registration outcomes
pub static WEBHOOK_REGISTRATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "webhook_registrations_total",
            "Telegram webhook registrations by outcome",
        )
        .namespace("notify_bot"),
        &["outcome"], // "registered", "failed", "superseded"
    )
    .expect("Failed to create WEBHOOK_REGISTRATIONS_TOTAL metric")
});

/// Notification dispatch counter
pub static NOTIFICATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("notifications_total", "Notification deliveries by outcome")
            .namespace("notify_bot"),
        &["outcome"], // "sent", "failed"
    )
    .expect("Failed to create NOTIFICATIONS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(CONFIG_UPDATES_TOTAL.clone()))
        .expect("Failed to register CONFIG_UPDATES_TOTAL");
    registry
        .register(Box::new(CONFIG_RELOADS_TOTAL.clone()))
        .expect("Failed to register CONFIG_RELOADS_TOTAL");
    registry
        .register(Box::new(POOL_REBUILDS_TOTAL.clone()))
        .expect("Failed to register POOL_REBUILDS_TOTAL");
    registry
        .register(Box::new(BOT_REBUILDS_TOTAL.clone()))
        .expect("Failed to register BOT_REBUILDS_TOTAL");
    registry
        .register(Box::new(WEBHOOK_REGISTRATIONS_TOTAL.clone()))
        .expect("Failed to register WEBHOOK_REGISTRATIONS_TOTAL");
    registry
        .register(Box::new(NOTIFICATIONS_TOTAL.clone()))
        .expect("Failed to register NOTIFICATIONS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Metrics should be valid UTF-8")
}

/// Helper to record a runtime configuration write outcome
pub fn record_config_update(outcome: &str) {
    CONFIG_UPDATES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record a settings file reload outcome
pub fn record_config_reload(outcome: &str) {
    CONFIG_RELOADS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record a database pool rebuild outcome
pub fn record_pool_rebuild(outcome: &str) {
    POOL_REBUILDS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record a bot client rebuild outcome
pub fn record_bot_rebuild(outcome: &str) {
    BOT_REBUILDS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record a webhook registration outcome
pub fn record_webhook_registration(outcome: &str) {
    WEBHOOK_REGISTRATIONS_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

/// Helper to record a notification dispatch outcome
pub fn record_notification(outcome: &str) {
    NOTIFICATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Force lazy initialization
        let _ = &*REGISTRY;
        let _ = &*CONFIG_UPDATES_TOTAL;
        let _ = &*CONFIG_RELOADS_TOTAL;
        let _ = &*POOL_REBUILDS_TOTAL;
        let _ = &*BOT_REBUILDS_TOTAL;
        let _ = &*NOTIFICATIONS_TOTAL;
    }

    #[test]
    fn test_gather_metrics() {
        let metrics = gather_metrics();
        assert!(!metrics.is_empty());
    }

    #[test]
    fn test_record_config_update() {
        record_config_update("accepted");
        let metrics = gather_metrics();
        assert!(metrics.contains("config_updates_total"));
    }

    #[test]
    fn test_record_notification() {
        record_notification("sent");
        let metrics = gather_metrics();
        assert!(metrics.contains("notifications_total"));
    }
}
