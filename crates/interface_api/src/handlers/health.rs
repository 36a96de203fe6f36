//! Liveness and readiness probes
//!
//! Liveness only says the process is serving; readiness additionally proves
//! the billing database is reachable and the schema has been migrated, so a
//! load balancer never routes traffic to an instance that cannot persist
//! bills.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

const SERVICE_NAME: &str = "ebm-api";

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness payload, including migration state.
#[derive(Debug, Serialize)]
pub struct ReadinessStatus {
    pub service: &'static str,
    pub status: &'static str,
    pub database: &'static str,
    pub migrations_applied: i64,
}

/// The process is up and serving requests.
pub async fn health_check() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        service: SERVICE_NAME,
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 503 until the pool answers and at least one migration has been applied.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessStatus>, StatusCode> {
    let migrations_applied =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
            .fetch_one(&state.pool)
            .await
            .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    if migrations_applied == 0 {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(ReadinessStatus {
        service: SERVICE_NAME,
        status: "ready",
        database: "reachable",
        migrations_applied,
    }))
}
