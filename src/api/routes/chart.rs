//! Chart Routes
//!
//! - GET /api/v1/chart - Cost chart as SVG

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::ChartParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::{ChartRenderer, SvgChart};
use crate::form::RawFormInput;

const MAX_DIMENSION: f64 = 4096.0;
const MIN_DIMENSION: f64 = 200.0;

/// GET /api/v1/chart
///
/// Accepts the same form fields as `/calculate` plus `width` and `height`.
pub async fn render_chart(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawFormInput>,
    Query(params): Query<ChartParams>,
) -> ApiResult<Response> {
    let defaults = SvgChart::default();
    let width = checked_dimension("width", params.width, defaults.width)?;
    let height = checked_dimension("height", params.height, defaults.height)?;

    let report = state.calculator.recompute_form(&raw)?;
    let renderer = SvgChart::new(width, height);
    let svg = renderer.render(&report.chart_spec())?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, renderer.content_type())],
        svg,
    )
        .into_response())
}

fn checked_dimension(name: &str, value: Option<f64>, default: f64) -> ApiResult<f64> {
    match value {
        None => Ok(default),
        Some(v) if (MIN_DIMENSION..=MAX_DIMENSION).contains(&v) => Ok(v),
        Some(v) => Err(ApiError::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_DIMENSION, MAX_DIMENSION, v
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_dimension() {
        assert_eq!(checked_dimension("width", None, 800.0).unwrap(), 800.0);
        assert_eq!(checked_dimension("width", Some(1024.0), 800.0).unwrap(), 1024.0);
        assert!(checked_dimension("width", Some(10.0), 800.0).is_err());
        assert!(checked_dimension("width", Some(f64::NAN), 800.0).is_err());
    }
}
