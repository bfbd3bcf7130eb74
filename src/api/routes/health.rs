//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// The dataset is loaded before the server binds, so this only fails if the
/// confirmed table came back without any date columns.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if dataset_ok(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ok = dataset_ok(&state);

    Json(HealthResponse {
        status: (if ok { "healthy" } else { "degraded" }).to_string(),
        dataset: (if ok { "ok" } else { "empty" }).to_string(),
        countries: state.data.countries().len(),
        dates: state.data.dataset().confirmed.dates.len(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn dataset_ok(state: &AppState) -> bool {
    !state.data.dataset().confirmed.dates.is_empty()
}
