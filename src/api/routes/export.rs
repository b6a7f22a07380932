//! Export Routes
//!
//! Download the swept series for analysis elsewhere.
//!
//! - GET /api/v1/export - Export points as CSV, JSON or NDJSON

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export::{export_points, ExportFormat};
use crate::form::RawFormInput;

/// GET /api/v1/export
///
/// Export the swept points in the specified format.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawFormInput>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let report = state.calculator.recompute_form(&raw)?;
    let format = ExportFormat::parse(&params.format);
    let body = export_points(&report.points, format)?;

    let filename = format!(
        "visitcost_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    tracing::info!(
        points = report.points.len(),
        format = format.extension(),
        "Exported visit cost series"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
