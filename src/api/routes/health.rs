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
/// Returns 200 if the configured defaults produce a report.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_calculator_health(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let calculator_ok = check_calculator_health(&state);

    Json(HealthResponse {
        status: if calculator_ok { "healthy" } else { "unhealthy" }.to_string(),
        calculator: if calculator_ok { "ok" } else { "error" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Recompute with the configured defaults
fn check_calculator_health(state: &AppState) -> bool {
    let defaults = state.calculator.defaults();
    match state.calculator.recompute(&defaults.fees, &defaults.sweep) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "Configured defaults do not produce a report");
            false
        }
    }
}
