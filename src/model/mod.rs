//! Visit Cost Model
//!
//! This module provides the cost model and the interval sweep:
//!
//! - **types**: Core data structures (FeeSchedule, SweepParameters, PricePoint)
//! - **cost**: Per-interval pricing and the analytic break-even interval
//! - **sweep**: Ordered enumeration of candidate intervals
//! - **error**: Error types
//!
//! # Pricing
//!
//! ```text
//! threshold  = base_months * 30
//! visits     = floor(total_days / interval)
//! per_visit  = interval < threshold ? repeat + other : first + other
//! total_cost = per_visit * visits
//! break_even = (repeat + other) / (first + other) * threshold
//! ```
//!
//! # Example
//!
//! ```rust
//! use visitcost::model::{sweep_intervals, FeeSchedule, SweepParameters};
//!
//! let fees = FeeSchedule::new(292.0, 80.0, 694.0);
//! let params = SweepParameters::default();
//!
//! let points: Vec<_> = sweep_intervals(&params, &fees).unwrap().collect();
//! assert_eq!(points.len(), 120);
//! assert_eq!(points[29].total_cost, 56502.0);
//! ```

pub mod cost;
pub mod error;
pub mod sweep;
pub mod types;

pub use cost::{break_even_point, compute_break_even_interval, compute_visit_cost_and_count};
pub use error::{ModelError, ModelResult};
pub use sweep::{lookup_cost_at_interval, sweep_intervals, IntervalSweep};
pub use types::{
    BreakEvenPoint, FeeSchedule, PricePoint, PricingRegime, SweepParameters, VisitCost,
    DAYS_PER_MONTH,
};
