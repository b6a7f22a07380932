//! Calculate Routes
//!
//! Recompute the calculator report from raw form values.
//!
//! - POST /api/v1/calculate - Form values as a JSON body
//! - GET /api/v1/calculate - Form values as query parameters

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::DefaultsResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::calculator::CalculationReport;
use crate::form::RawFormInput;

/// POST /api/v1/calculate
///
/// Every field is optional; malformed values are replaced by defaults.
pub async fn calculate_post(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawFormInput>,
) -> ApiResult<Json<CalculationReport>> {
    calculate(&state, &raw)
}

/// GET /api/v1/calculate
pub async fn calculate_get(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawFormInput>,
) -> ApiResult<Json<CalculationReport>> {
    calculate(&state, &raw)
}

/// GET /api/v1/defaults
///
/// Values the form should start with.
pub async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<DefaultsResponse> {
    let defaults = state.calculator.defaults();

    Json(DefaultsResponse {
        fees: defaults.fees,
        sweep: defaults.sweep,
        scale_anchor_days: state.calculator.scale_anchor_days(),
    })
}

fn calculate(state: &AppState, raw: &RawFormInput) -> ApiResult<Json<CalculationReport>> {
    let report = state.calculator.recompute_form(raw)?;

    tracing::info!(
        points = report.points.len(),
        threshold_days = report.threshold_days,
        break_even = ?report.kpis.break_even_interval,
        "Calculated visit costs"
    );

    Ok(Json(report))
}
