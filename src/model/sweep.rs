//! Interval sweep
//!
//! Enumerates `step, 2*step, ... <= max_interval` and prices each interval.
//! The sweep is an iterator so it can be restarted by cloning it; the order
//! (strictly increasing, gapless by step) is relied on by chart consumers.

use super::cost::compute_visit_cost_and_count;
use super::error::ModelResult;
use super::types::{FeeSchedule, PricePoint, SweepParameters};

/// Lazy, ordered sequence of price points
#[derive(Debug, Clone)]
pub struct IntervalSweep {
    fees: FeeSchedule,
    total_days: u32,
    threshold_days: f64,
    // u64 so stepping past u32::MAX cannot wrap
    step_days: u64,
    max_interval: u64,
    next_interval: u64,
}

impl IntervalSweep {
    fn new(params: &SweepParameters, fees: &FeeSchedule) -> Self {
        Self {
            fees: *fees,
            total_days: params.total_days,
            threshold_days: params.threshold_days(),
            step_days: u64::from(params.step_days),
            max_interval: u64::from(params.max_interval),
            next_interval: u64::from(params.step_days),
        }
    }

    fn remaining(&self) -> usize {
        if self.next_interval > self.max_interval {
            return 0;
        }
        ((self.max_interval - self.next_interval) / self.step_days + 1) as usize
    }
}

impl Iterator for IntervalSweep {
    type Item = PricePoint;

    fn next(&mut self) -> Option<PricePoint> {
        if self.next_interval > self.max_interval {
            return None;
        }

        let interval_days = self.next_interval as u32;
        self.next_interval += self.step_days;

        let cost = compute_visit_cost_and_count(
            f64::from(interval_days),
            self.total_days,
            &self.fees,
            self.threshold_days,
        );

        Some(PricePoint {
            interval_days,
            total_cost: cost.total_cost,
            visit_count: cost.visit_count,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for IntervalSweep {}

/// Build the sweep for the given parameters.
///
/// Fails only when a parameter is zero; a zero step would never terminate.
pub fn sweep_intervals(params: &SweepParameters, fees: &FeeSchedule) -> ModelResult<IntervalSweep> {
    params.validate()?;
    Ok(IntervalSweep::new(params, fees))
}

/// Find the point at exactly `interval_days`.
///
/// Returns `None` when the step does not land on that interval; callers use
/// this to anchor the chart's vertical scale and fall back to automatic
/// scaling when it is absent.
pub fn lookup_cost_at_interval(points: &[PricePoint], interval_days: u32) -> Option<&PricePoint> {
    points
        .binary_search_by_key(&interval_days, |p| p.interval_days)
        .ok()
        .map(|idx| &points[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::error::ModelError;

    fn collect(params: SweepParameters) -> Vec<PricePoint> {
        sweep_intervals(&params, &FeeSchedule::default())
            .unwrap()
            .collect()
    }

    #[test]
    fn test_default_sweep() {
        let points = collect(SweepParameters::default());
        assert_eq!(points.len(), 120);
        assert_eq!(points[0].interval_days, 1);
        assert_eq!(points[0].visit_count, 2190);
        assert_eq!(points[119].interval_days, 120);
        assert_eq!(points[119].total_cost, 17748.0);
        assert_eq!(points[29].interval_days, 30);
        assert_eq!(points[29].total_cost, 56502.0);
    }

    #[test]
    fn test_sweep_is_strictly_increasing_with_expected_len() {
        for (max_interval, step) in [(120, 1), (120, 7), (100, 10), (9, 10), (1, 1), (365, 30)] {
            let params = SweepParameters::new(2190, max_interval, step, 3).unwrap();
            let points = collect(params);

            assert_eq!(points.len(), (max_interval / step) as usize);
            assert_eq!(points.len(), params.point_count());
            for pair in points.windows(2) {
                assert_eq!(pair[1].interval_days - pair[0].interval_days, step);
            }
            if let Some(first) = points.first() {
                assert_eq!(first.interval_days, step);
            }
        }
    }

    #[test]
    fn test_sweep_is_restartable() {
        let sweep = sweep_intervals(&SweepParameters::default(), &FeeSchedule::default()).unwrap();
        let first: Vec<_> = sweep.clone().collect();
        let second: Vec<_> = sweep.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sweep_exact_size() {
        let params = SweepParameters::new(2190, 120, 7, 3).unwrap();
        let mut sweep = sweep_intervals(&params, &FeeSchedule::default()).unwrap();
        assert_eq!(sweep.len(), 17);
        sweep.next();
        assert_eq!(sweep.len(), 16);
    }

    #[test]
    fn test_sweep_handles_large_step() {
        let params = SweepParameters::new(2190, u32::MAX, u32::MAX - 1, 3).unwrap();
        let points = collect(params);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_sweep_rejects_zero_step() {
        let params = SweepParameters {
            step_days: 0,
            ..SweepParameters::default()
        };
        let err = sweep_intervals(&params, &FeeSchedule::default()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { .. }));
    }

    #[test]
    fn test_regime_switch_in_sweep() {
        let points = collect(SweepParameters::default());
        let fees = FeeSchedule::default();

        for p in &points {
            let per_visit = if p.interval_days < 90 {
                fees.repeat_rate()
            } else {
                fees.first_rate()
            };
            assert_eq!(p.total_cost, per_visit * p.visit_count as f64);
        }
    }

    #[test]
    fn test_lookup_anchor() {
        let points = collect(SweepParameters::default());
        let point = lookup_cost_at_interval(&points, 20).unwrap();
        assert_eq!(point.interval_days, 20);
        assert_eq!(point.total_cost, 774.0 * 109.0);
    }

    #[test]
    fn test_lookup_anchor_absent_when_step_misses() {
        let points = collect(SweepParameters::new(2190, 120, 7, 3).unwrap());
        assert!(lookup_cost_at_interval(&points, 20).is_none());

        let points = collect(SweepParameters::new(2190, 10, 1, 3).unwrap());
        assert!(lookup_cost_at_interval(&points, 20).is_none());
    }
}
