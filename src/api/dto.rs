//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not already
//! domain types. Calculation requests reuse `RawFormInput` and responses
//! reuse `CalculationReport` directly.

use serde::{Deserialize, Serialize};

use crate::model::{FeeSchedule, SweepParameters};

// ============================================
// CHART DTOs
// ============================================

/// Chart size query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    /// Image width in pixels (default 800)
    #[serde(default)]
    pub width: Option<f64>,
    /// Image height in pixels (default 400)
    #[serde(default)]
    pub height: Option<f64>,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: json, csv, ndjson
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// DEFAULTS DTOs
// ============================================

/// Values the form starts with
#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub fees: FeeSchedule,
    pub sweep: SweepParameters,
    pub scale_anchor_days: Option<u32>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Calculator status
    pub calculator: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
