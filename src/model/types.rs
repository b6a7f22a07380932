//! Core data types for the visit cost model
//!
//! This module defines the fundamental types used by the cost model:
//! - `FeeSchedule`: The charge components applied per visit
//! - `SweepParameters`: The horizon and interval range to evaluate
//! - `PricePoint`: Cumulative cost at one swept interval
//! - `BreakEvenPoint`: The analytic break-even interval and its cost
//! - `PricingRegime`: Which fee applies to a given interval

use serde::{Deserialize, Serialize};

use super::error::{ModelError, ModelResult};

/// Number of days counted per month when deriving the threshold
pub const DAYS_PER_MONTH: u32 = 30;

/// Charge components applied per visit
///
/// All three fields are non-negative. A schedule is never edited in place;
/// the form layer builds a fresh one on every change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeeSchedule {
    /// Charged when the gap since the last visit reaches the threshold
    pub first_visit_fee: f64,
    /// Charged when the gap since the last visit is within the threshold
    pub repeat_visit_fee: f64,
    /// Charged on every visit regardless of regime
    pub other_fee: f64,
}

impl FeeSchedule {
    pub fn new(first_visit_fee: f64, repeat_visit_fee: f64, other_fee: f64) -> Self {
        Self {
            first_visit_fee,
            repeat_visit_fee,
            other_fee,
        }
    }

    /// Per-visit charge under the repeat-visit regime
    pub fn repeat_rate(&self) -> f64 {
        self.repeat_visit_fee + self.other_fee
    }

    /// Per-visit charge under the first-visit regime
    pub fn first_rate(&self) -> f64 {
        self.first_visit_fee + self.other_fee
    }

    /// Per-visit charge for the given regime
    pub fn per_visit(&self, regime: PricingRegime) -> f64 {
        match regime {
            PricingRegime::Repeat => self.repeat_rate(),
            PricingRegime::First => self.first_rate(),
        }
    }

    /// Multiply every component by the same factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            first_visit_fee: self.first_visit_fee * factor,
            repeat_visit_fee: self.repeat_visit_fee * factor,
            other_fee: self.other_fee * factor,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        // other_fee bundles three sub-charges: 160 + 334 + 200
        Self::new(292.0, 80.0, 694.0)
    }
}

/// The horizon and interval range a sweep covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepParameters {
    /// Total horizon in days
    pub total_days: u32,
    /// Largest interval evaluated (inclusive)
    pub max_interval: u32,
    /// Increment between evaluated intervals
    pub step_days: u32,
    /// Month count separating repeat-visit from first-visit pricing
    pub base_months: u32,
}

impl SweepParameters {
    pub const DEFAULT_TOTAL_DAYS: u32 = 365 * 6;
    pub const DEFAULT_MAX_INTERVAL: u32 = 120;
    pub const DEFAULT_STEP_DAYS: u32 = 1;
    pub const DEFAULT_BASE_MONTHS: u32 = 3;

    /// Create validated sweep parameters
    pub fn new(
        total_days: u32,
        max_interval: u32,
        step_days: u32,
        base_months: u32,
    ) -> ModelResult<Self> {
        let params = Self {
            total_days,
            max_interval,
            step_days,
            base_months,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every field is a positive integer
    pub fn validate(&self) -> ModelResult<()> {
        let fields = [
            ("total_days", self.total_days),
            ("max_interval", self.max_interval),
            ("step_days", self.step_days),
            ("base_months", self.base_months),
        ];

        for (name, value) in fields {
            if value == 0 {
                return Err(ModelError::InvalidParameter {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Day count separating the two pricing regimes
    pub fn threshold_days(&self) -> f64 {
        f64::from(self.base_months) * f64::from(DAYS_PER_MONTH)
    }

    /// Number of points a sweep over these parameters yields
    pub fn point_count(&self) -> usize {
        if self.step_days == 0 {
            return 0;
        }
        (self.max_interval / self.step_days) as usize
    }
}

impl Default for SweepParameters {
    fn default() -> Self {
        Self {
            total_days: Self::DEFAULT_TOTAL_DAYS,
            max_interval: Self::DEFAULT_MAX_INTERVAL,
            step_days: Self::DEFAULT_STEP_DAYS,
            base_months: Self::DEFAULT_BASE_MONTHS,
        }
    }
}

/// Which fee applies to an interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PricingRegime {
    /// Interval is strictly shorter than the threshold
    Repeat,
    /// Interval is at or beyond the threshold
    First,
}

impl PricingRegime {
    /// Select the regime for an interval. The comparison is strict, so an
    /// interval equal to the threshold is billed at the first-visit rate.
    pub fn for_interval(interval_days: f64, threshold_days: f64) -> Self {
        if interval_days < threshold_days {
            PricingRegime::Repeat
        } else {
            PricingRegime::First
        }
    }
}

impl std::fmt::Display for PricingRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingRegime::Repeat => write!(f, "repeat"),
            PricingRegime::First => write!(f, "first"),
        }
    }
}

/// Cost of visiting at a fixed interval over the whole horizon
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct VisitCost {
    pub total_cost: f64,
    pub visit_count: u64,
    pub regime: PricingRegime,
}

/// Cumulative cost at one swept interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub interval_days: u32,
    pub total_cost: f64,
    pub visit_count: u64,
}

/// The analytic break-even interval and the cumulative cost there
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BreakEvenPoint {
    pub interval_days: f64,
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rates() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.repeat_rate(), 774.0);
        assert_eq!(fees.first_rate(), 986.0);
        assert_eq!(fees.per_visit(PricingRegime::Repeat), 774.0);
        assert_eq!(fees.per_visit(PricingRegime::First), 986.0);
    }

    #[test]
    fn test_sweep_parameters_defaults() {
        let params = SweepParameters::default();
        assert_eq!(params.total_days, 2190);
        assert_eq!(params.max_interval, 120);
        assert_eq!(params.step_days, 1);
        assert_eq!(params.base_months, 3);
        assert_eq!(params.threshold_days(), 90.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_sweep_parameters_reject_zero() {
        let err = SweepParameters::new(2190, 120, 0, 3).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { name: "step_days", .. }
        ));

        assert!(SweepParameters::new(0, 120, 1, 3).is_err());
        assert!(SweepParameters::new(2190, 120, 1, 0).is_err());
    }

    #[test]
    fn test_point_count() {
        let params = SweepParameters::new(2190, 120, 7, 3).unwrap();
        assert_eq!(params.point_count(), 17);

        let params = SweepParameters::new(2190, 5, 10, 3).unwrap();
        assert_eq!(params.point_count(), 0);
    }

    #[test]
    fn test_regime_boundary_is_strict() {
        assert_eq!(PricingRegime::for_interval(89.0, 90.0), PricingRegime::Repeat);
        assert_eq!(PricingRegime::for_interval(89.999, 90.0), PricingRegime::Repeat);
        assert_eq!(PricingRegime::for_interval(90.0, 90.0), PricingRegime::First);
        assert_eq!(PricingRegime::for_interval(91.0, 90.0), PricingRegime::First);
    }

    #[test]
    fn test_regime_serde() {
        let json = serde_json::to_string(&PricingRegime::Repeat).unwrap();
        assert_eq!(json, "\"repeat\"");
        assert_eq!(PricingRegime::First.to_string(), "first");
    }
}
