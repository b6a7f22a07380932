//! Calculator
//!
//! Recomputes everything the presentation layer shows whenever an input
//! changes: the swept series, the break-even marker, the axis anchor and the
//! KPI readouts. Nothing is cached between calls.

use serde::Serialize;

use crate::chart::{AxisScale, ChartSpec};
use crate::form::{FormDefaults, FormValues, RawFormInput};
use crate::model::{
    break_even_point, lookup_cost_at_interval, sweep_intervals, BreakEvenPoint, FeeSchedule,
    ModelResult, PricePoint, SweepParameters,
};

/// Interval whose cost anchors the y axis unless configured otherwise
pub const DEFAULT_SCALE_ANCHOR_DAYS: u32 = 20;

/// Largest number of swept points a single recompute produces
pub const DEFAULT_MAX_POINTS: usize = 100_000;

/// Break-even marker, or why there is none
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BreakEvenOutcome {
    Defined(BreakEvenPoint),
    Undefined { code: String, reason: String },
}

impl BreakEvenOutcome {
    pub fn point(&self) -> Option<&BreakEvenPoint> {
        match self {
            BreakEvenOutcome::Defined(point) => Some(point),
            BreakEvenOutcome::Undefined { .. } => None,
        }
    }
}

impl From<ModelResult<BreakEvenPoint>> for BreakEvenOutcome {
    fn from(result: ModelResult<BreakEvenPoint>) -> Self {
        match result {
            Ok(point) => BreakEvenOutcome::Defined(point),
            Err(e) => BreakEvenOutcome::Undefined {
                code: e.code().to_string(),
                reason: e.to_string(),
            },
        }
    }
}

/// Summary readouts
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpis {
    /// Break-even interval rounded to one decimal, e.g. `"70.6"`
    pub break_even_interval: Option<String>,
    /// Cumulative cost at the break-even interval
    pub break_even_cost: Option<f64>,
    pub threshold_days: f64,
    pub base_months: u32,
    pub total_days: u32,
    pub range_start: u32,
    pub range_end: u32,
    pub step_days: u32,
    pub repeat_rate: f64,
    pub first_rate: f64,
}

/// Everything derived from one set of inputs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalculationReport {
    pub fees: FeeSchedule,
    pub sweep: SweepParameters,
    pub threshold_days: f64,
    pub points: Vec<PricePoint>,
    pub break_even: BreakEvenOutcome,
    pub scale_anchor_days: Option<u32>,
    pub anchor_cost: Option<f64>,
    pub y_scale: AxisScale,
    pub kpis: Kpis,
}

impl CalculationReport {
    /// Chart description: cost curve, threshold line, break-even dot
    pub fn chart_spec(&self) -> ChartSpec {
        let series = self
            .points
            .iter()
            .map(|p| (f64::from(p.interval_days), p.total_cost))
            .collect();

        let domain = if self.sweep.step_days <= self.sweep.max_interval {
            (f64::from(self.sweep.step_days), f64::from(self.sweep.max_interval))
        } else {
            (0.0, self.threshold_days)
        };

        let mut spec = ChartSpec::new(series)
            .reference_line(self.threshold_days)
            .x_domain(domain.0, domain.1)
            .y_scale(self.y_scale);

        if let Some(point) = self.break_even.point() {
            spec = spec.reference_dot(point.interval_days, point.total_cost);
        }

        spec
    }

    /// Cheapest swept interval, ties resolved toward the shorter interval
    pub fn cheapest(&self) -> Option<&PricePoint> {
        self.points.iter().reduce(|best, p| {
            if p.total_cost < best.total_cost {
                p
            } else {
                best
            }
        })
    }
}

/// Recomputes reports from inputs
#[derive(Debug, Clone)]
pub struct Calculator {
    defaults: FormDefaults,
    scale_anchor_days: Option<u32>,
    max_points: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(FormDefaults::default(), Some(DEFAULT_SCALE_ANCHOR_DAYS))
    }
}

impl Calculator {
    pub fn new(defaults: FormDefaults, scale_anchor_days: Option<u32>) -> Self {
        Self {
            defaults,
            scale_anchor_days,
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    /// Builder method: cap the number of swept points
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(1);
        self
    }

    pub fn defaults(&self) -> &FormDefaults {
        &self.defaults
    }

    pub fn scale_anchor_days(&self) -> Option<u32> {
        self.scale_anchor_days
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Pull `max_interval` down so the sweep stays within `max_points`
    fn bounded(&self, sweep: &SweepParameters) -> SweepParameters {
        if sweep.point_count() <= self.max_points {
            return *sweep;
        }

        // step * max_points < max_interval here, so it fits in u32
        let cap = u64::from(sweep.step_days).saturating_mul(self.max_points as u64);
        let max_interval = u32::try_from(cap).unwrap_or(sweep.max_interval);
        tracing::debug!(
            requested = sweep.max_interval,
            max_interval,
            max_points = self.max_points,
            "Clamping max_interval to the point limit"
        );

        SweepParameters {
            max_interval,
            ..*sweep
        }
    }

    /// Coerce raw form values and recompute
    pub fn recompute_form(&self, raw: &RawFormInput) -> ModelResult<CalculationReport> {
        let FormValues { fees, sweep } = raw.coerce(&self.defaults);
        self.recompute(&fees, &sweep)
    }

    /// Recompute the full report from scratch
    pub fn recompute(
        &self,
        fees: &FeeSchedule,
        sweep: &SweepParameters,
    ) -> ModelResult<CalculationReport> {
        let sweep = &self.bounded(sweep);
        let points: Vec<PricePoint> = sweep_intervals(sweep, fees)?.collect();
        let threshold_days = sweep.threshold_days();

        let break_even: BreakEvenOutcome = break_even_point(fees, sweep).into();
        if let BreakEvenOutcome::Undefined { reason, .. } = &break_even {
            tracing::warn!(?fees, reason = %reason, "Break-even point is undefined");
        }

        let anchor_cost = self
            .scale_anchor_days
            .and_then(|days| lookup_cost_at_interval(&points, days))
            .map(|p| p.total_cost);

        // A zero anchor cost would collapse the axis, so it falls back too
        let y_scale = match anchor_cost {
            Some(cost) if cost > 0.0 => AxisScale::Fixed(cost),
            _ => AxisScale::Auto,
        };

        let kpis = Kpis {
            break_even_interval: break_even
                .point()
                .map(|p| format!("{:.1}", p.interval_days)),
            break_even_cost: break_even.point().map(|p| p.total_cost),
            threshold_days,
            base_months: sweep.base_months,
            total_days: sweep.total_days,
            range_start: sweep.step_days,
            range_end: sweep.max_interval,
            step_days: sweep.step_days,
            repeat_rate: fees.repeat_rate(),
            first_rate: fees.first_rate(),
        };

        tracing::debug!(
            points = points.len(),
            threshold_days,
            anchor_cost = ?anchor_cost,
            "Recomputed calculation report"
        );

        Ok(CalculationReport {
            fees: *fees,
            sweep: *sweep,
            threshold_days,
            points,
            break_even,
            scale_anchor_days: self.scale_anchor_days,
            anchor_cost,
            y_scale,
            kpis,
        })
    }
}
