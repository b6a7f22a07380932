//! # Visitcost
//!
//! Clinic revisit cost calculator - estimates cumulative visit costs as a
//! function of the interval between visits.
//!
//! Visits closer together than a threshold (`base_months * 30` days) are
//! billed the repeat-visit fee; visits at or beyond it are billed the
//! first-visit fee. Sweeping the interval yields the cost curve a chart
//! draws, together with an analytic break-even interval.
//!
//! ## Modules
//!
//! - [`model`]: Cost model and interval sweep
//! - [`form`]: Coercion of raw form values with default substitution
//! - [`calculator`]: Full report recomputation on every input change
//! - [`chart`]: Chart collaborator trait and SVG renderer
//! - [`export`]: CSV / JSON / NDJSON export
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use visitcost::calculator::Calculator;
//! use visitcost::model::{FeeSchedule, SweepParameters};
//!
//! let report = Calculator::default()
//!     .recompute(&FeeSchedule::default(), &SweepParameters::default())
//!     .unwrap();
//!
//! assert_eq!(report.points.len(), 120);
//! assert_eq!(report.kpis.break_even_interval.as_deref(), Some("70.6"));
//! ```

pub mod api;
pub mod calculator;
pub mod chart;
pub mod config;
pub mod export;
pub mod form;
pub mod logging;
pub mod model;

// Re-export top-level types for convenience
pub use model::{
    break_even_point, compute_break_even_interval, compute_visit_cost_and_count,
    lookup_cost_at_interval, sweep_intervals, BreakEvenPoint, FeeSchedule, ModelError,
    ModelResult, PricePoint, PricingRegime, SweepParameters,
};

pub use calculator::{BreakEvenOutcome, CalculationReport, Calculator, Kpis};

pub use chart::{AxisScale, ChartError, ChartRenderer, ChartSpec, SvgChart};

pub use form::{FormDefaults, FormValues, RawFormInput};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, CalculatorConfig, Config, ConfigError, LoggingConfig};
