//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check (backward compatible)
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (can the server accept traffic?)
//!
//! An unconfigured service is degraded, not dead: it reports 200 so the
//! process stays up and an operator can reach the setup endpoint. A
//! configured service whose database is gone reports 503.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response (backward compatible)
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health check response
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

/// Individual service health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub configuration: ConfigHealth,
    pub database: ServiceHealth,
    pub bot: ServiceHealth,
}

/// Runtime configuration presence
#[derive(Debug, Serialize)]
pub struct ConfigHealth {
    pub status: HealthStatus,
    pub configured: bool,
}

/// Health status for individual services
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint (backward compatible)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
/// Returns 200 if alive, used by Kubernetes to restart dead pods
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - checks if the server can accept traffic
/// Returns 200 if healthy or merely unconfigured, 503 if a configured
/// dependency is down
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();
    let started_at = SERVER_START_TIME.to_rfc3339();

    let configured = state.store.is_configured();

    let config_health = ConfigHealth {
        status: if configured {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        configured,
    };
    let db_health = check_database(&state, configured).await;
    let bot_health = check_bot(&state, configured);

    let overall_status = determine_overall_status(configured, &db_health, &bot_health);

    let response = DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime,
        started_at,
        checks: HealthChecks {
            configuration: config_health,
            database: db_health,
            bot: bot_health,
        },
    };

    // Return 503 if unhealthy
    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Check database connectivity and latency through the live pool
async fn check_database(state: &AppState, configured: bool) -> ServiceHealth {
    let Some(pool) = state.db.current() else {
        // Absent without configuration is the expected initial state;
        // absent with configuration means the rebuild failed.
        return if configured {
            ServiceHealth {
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                message: Some("connection pool unavailable".to_string()),
            }
        } else {
            ServiceHealth {
                status: HealthStatus::Degraded,
                latency_ms: None,
                message: Some("not configured".to_string()),
            }
        };
    };

    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => {
            let latency = start.elapsed().as_millis() as u64;
            ServiceHealth {
                status: if latency < 100 {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Degraded
                },
                latency_ms: Some(latency),
                message: None,
            }
        }
        Err(e) => ServiceHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(format!("Database connection failed: {}", e)),
        },
    }
}

/// Check whether a bot client is live
fn check_bot(state: &AppState, configured: bool) -> ServiceHealth {
    if state.bot.is_ready() {
        ServiceHealth {
            status: HealthStatus::Healthy,
            latency_ms: None,
            message: None,
        }
    } else {
        ServiceHealth {
            status: HealthStatus::Degraded,
            latency_ms: None,
            message: Some(if configured {
                "client unavailable".to_string()
            } else {
                "not configured".to_string()
            }),
        }
    }
}

/// Determine overall health based on individual checks
fn determine_overall_status(
    configured: bool,
    db: &ServiceHealth,
    bot: &ServiceHealth,
) -> HealthStatus {
    // Unconfigured is a service waiting for setup, not a dead one.
    if !configured {
        return HealthStatus::Degraded;
    }

    if db.status == HealthStatus::Unhealthy {
        return HealthStatus::Unhealthy;
    }

    if db.status == HealthStatus::Degraded || bot.status != HealthStatus::Healthy {
        return HealthStatus::Degraded;
    }

    HealthStatus::Healthy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> ServiceHealth {
        ServiceHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(10),
            message: None,
        }
    }

    fn degraded() -> ServiceHealth {
        ServiceHealth {
            status: HealthStatus::Degraded,
            latency_ms: None,
            message: Some("not configured".to_string()),
        }
    }

    fn unhealthy() -> ServiceHealth {
        ServiceHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some("Connection failed".to_string()),
        }
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::Healthy;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"healthy\"");
    }

    #[test]
    fn test_unconfigured_service_is_degraded_not_unhealthy() {
        assert_eq!(
            determine_overall_status(false, &degraded(), &degraded()),
            HealthStatus::Degraded
        );
    }

    #[test]
    fn test_configured_service_with_dead_database_is_unhealthy() {
        assert_eq!(
            determine_overall_status(true, &unhealthy(), &healthy()),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn test_configured_service_with_dead_bot_is_degraded() {
        assert_eq!(
            determine_overall_status(true, &healthy(), &degraded()),
            HealthStatus::Degraded
        );
    }

    #[test]
    fn test_all_healthy() {
        assert_eq!(
            determine_overall_status(true, &healthy(), &healthy()),
            HealthStatus::Healthy
        );
    }
}
