//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database lifecycle and repositories (PostgreSQL)
//! - Telegram Bot API client and lifecycle
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
pub mod telegram;
