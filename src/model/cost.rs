//! Cost evaluation
//!
//! Pure functions pricing a visit interval over the horizon and deriving the
//! analytic break-even interval.

use super::error::{ModelError, ModelResult};
use super::types::{BreakEvenPoint, FeeSchedule, PricingRegime, SweepParameters, VisitCost};

/// Price visiting every `interval_days` over `total_days`.
///
/// `interval_days` may be fractional (the break-even interval usually is) but
/// must be positive; the sweep never passes anything else.
pub fn compute_visit_cost_and_count(
    interval_days: f64,
    total_days: u32,
    fees: &FeeSchedule,
    threshold_days: f64,
) -> VisitCost {
    debug_assert!(interval_days > 0.0, "interval must be positive");

    let visit_count = (f64::from(total_days) / interval_days).floor() as u64;
    let regime = PricingRegime::for_interval(interval_days, threshold_days);
    let total_cost = fees.per_visit(regime) * visit_count as f64;

    VisitCost {
        total_cost,
        visit_count,
        regime,
    }
}

/// Interval at which the two regimes yield the same effective rate:
/// `(repeat + other) / (first + other) * threshold_days`.
///
/// This is a ratio of rates scaled by the threshold, not a root-find over the
/// swept curve.
pub fn compute_break_even_interval(fees: &FeeSchedule, threshold_days: f64) -> ModelResult<f64> {
    let denominator = fees.first_rate();
    if denominator == 0.0 {
        return Err(ModelError::DegenerateFees);
    }

    let interval = (fees.repeat_rate() / denominator) * threshold_days;
    if !interval.is_finite() {
        return Err(ModelError::DegenerateFees);
    }

    Ok(interval)
}

/// Break-even interval together with the cumulative cost evaluated there
pub fn break_even_point(
    fees: &FeeSchedule,
    params: &SweepParameters,
) -> ModelResult<BreakEvenPoint> {
    let threshold_days = params.threshold_days();
    let interval_days = compute_break_even_interval(fees, threshold_days)?;

    if interval_days <= 0.0 {
        return Err(ModelError::NonPositiveInterval(interval_days));
    }

    let cost = compute_visit_cost_and_count(interval_days, params.total_days, fees, threshold_days);

    Ok(BreakEvenPoint {
        interval_days,
        total_cost: cost.total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fees() -> FeeSchedule {
        FeeSchedule::new(292.0, 80.0, 694.0)
    }

    #[test]
    fn test_short_interval_uses_repeat_rate() {
        let cost = compute_visit_cost_and_count(30.0, 2190, &sample_fees(), 90.0);
        assert_eq!(cost.visit_count, 73);
        assert_eq!(cost.total_cost, 56502.0);
        assert_eq!(cost.regime, PricingRegime::Repeat);
    }

    #[test]
    fn test_long_interval_uses_first_rate() {
        let cost = compute_visit_cost_and_count(120.0, 2190, &sample_fees(), 90.0);
        assert_eq!(cost.visit_count, 18);
        assert_eq!(cost.total_cost, 17748.0);
        assert_eq!(cost.regime, PricingRegime::First);
    }

    #[test]
    fn test_threshold_interval_uses_first_rate() {
        let cost = compute_visit_cost_and_count(90.0, 2190, &sample_fees(), 90.0);
        assert_eq!(cost.regime, PricingRegime::First);
        assert_eq!(cost.visit_count, 24);
        assert_eq!(cost.total_cost, 986.0 * 24.0);

        let cost = compute_visit_cost_and_count(89.0, 2190, &sample_fees(), 90.0);
        assert_eq!(cost.regime, PricingRegime::Repeat);
        assert_eq!(cost.total_cost, 774.0 * 24.0);
    }

    #[test]
    fn test_regime_follows_threshold_not_fixed_quarter() {
        // base_months = 2 moves the boundary to 60 days
        let cost = compute_visit_cost_and_count(70.0, 2190, &sample_fees(), 60.0);
        assert_eq!(cost.regime, PricingRegime::First);
    }

    #[test]
    fn test_visit_count_is_floor() {
        let fees = sample_fees();
        for interval in 1..=400u32 {
            let cost = compute_visit_cost_and_count(f64::from(interval), 2190, &fees, 90.0);
            assert_eq!(cost.visit_count, u64::from(2190 / interval));
        }

        let cost = compute_visit_cost_and_count(2.5, 10, &fees, 90.0);
        assert_eq!(cost.visit_count, 4);
    }

    #[test]
    fn test_interval_longer_than_horizon() {
        let cost = compute_visit_cost_and_count(400.0, 365, &sample_fees(), 90.0);
        assert_eq!(cost.visit_count, 0);
        assert_eq!(cost.total_cost, 0.0);
    }

    #[test]
    fn test_break_even_interval() {
        let interval = compute_break_even_interval(&sample_fees(), 90.0).unwrap();
        assert!((interval - 774.0 / 986.0 * 90.0).abs() < 1e-9);
        assert!((interval - 70.65).abs() < 0.01);
    }

    #[test]
    fn test_break_even_is_scale_invariant() {
        let fees = sample_fees();
        let base = compute_break_even_interval(&fees, 90.0).unwrap();

        for factor in [0.5, 3.0, 17.25, 1000.0] {
            let scaled = compute_break_even_interval(&fees.scaled(factor), 90.0).unwrap();
            assert!((scaled - base).abs() < 1e-9, "factor {} changed result", factor);
        }
    }

    #[test]
    fn test_break_even_degenerate_fees() {
        let fees = FeeSchedule::new(0.0, 80.0, 0.0);
        assert_eq!(
            compute_break_even_interval(&fees, 90.0),
            Err(ModelError::DegenerateFees)
        );

        let fees = FeeSchedule::new(0.0, 0.0, 0.0);
        assert_eq!(
            compute_break_even_interval(&fees, 90.0),
            Err(ModelError::DegenerateFees)
        );
    }

    #[test]
    fn test_break_even_point() {
        let params = SweepParameters::default();
        let point = break_even_point(&sample_fees(), &params).unwrap();

        assert!((point.interval_days - 70.649).abs() < 0.001);
        // floor(2190 / 70.649) = 30 visits at the repeat rate
        assert_eq!(point.total_cost, 774.0 * 30.0);
    }

    #[test]
    fn test_break_even_point_zero_interval() {
        let fees = FeeSchedule::new(100.0, 0.0, 0.0);
        let err = break_even_point(&fees, &SweepParameters::default()).unwrap_err();
        assert_eq!(err, ModelError::NonPositiveInterval(0.0));
    }
}
