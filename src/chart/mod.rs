//! Chart Rendering
//!
//! The calculator hands the chart an ordered `(x, y)` series plus optional
//! reference markers. Rendering is behind the `ChartRenderer` trait so any
//! toolkit can draw it; `SvgChart` is the built-in implementation.

pub mod svg;

pub use svg::SvgChart;

use serde::Serialize;
use thiserror::Error;

/// Vertical axis scaling policy
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "mode", content = "max", rename_all = "lowercase")]
pub enum AxisScale {
    /// `[0, max]`; values above `max` are clipped
    Fixed(f64),
    /// `[0, largest y in the series]`
    Auto,
}

impl AxisScale {
    /// Resolve the upper bound of the y axis for a series
    pub fn upper_bound(&self, series: &[(f64, f64)]) -> f64 {
        let max = match self {
            AxisScale::Fixed(max) => *max,
            AxisScale::Auto => series.iter().map(|(_, y)| *y).fold(0.0, f64::max),
        };

        if max > 0.0 && max.is_finite() {
            max
        } else {
            1.0
        }
    }
}

/// A marker drawn at a single point
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ReferenceDot {
    pub x: f64,
    pub y: f64,
}

/// Everything a renderer needs to draw the cost chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    /// Ordered by x, strictly increasing
    pub series: Vec<(f64, f64)>,
    /// Dashed vertical line (the pricing threshold)
    pub reference_line_x: Option<f64>,
    /// Highlighted point (the break-even)
    pub reference_dot: Option<ReferenceDot>,
    /// X range to draw when the series is empty
    pub x_domain: Option<(f64, f64)>,
    pub y_scale: AxisScale,
    pub x_label: String,
    pub y_label: String,
}

impl ChartSpec {
    pub fn new(series: Vec<(f64, f64)>) -> Self {
        Self {
            series,
            reference_line_x: None,
            reference_dot: None,
            x_domain: None,
            y_scale: AxisScale::Auto,
            x_label: "Visit interval (days)".to_string(),
            y_label: "Cumulative cost".to_string(),
        }
    }

    /// Builder method: set the vertical reference line
    pub fn reference_line(mut self, x: f64) -> Self {
        self.reference_line_x = Some(x);
        self
    }

    /// Builder method: set the highlighted point
    pub fn reference_dot(mut self, x: f64, y: f64) -> Self {
        self.reference_dot = Some(ReferenceDot { x, y });
        self
    }

    /// Builder method: set the y axis scaling
    pub fn y_scale(mut self, scale: AxisScale) -> Self {
        self.y_scale = scale;
        self
    }

    /// Builder method: set the fallback x range
    pub fn x_domain(mut self, min: f64, max: f64) -> Self {
        self.x_domain = Some((min, max));
        self
    }

    /// Range of x values to draw: the series if it has points, otherwise the
    /// fallback domain, otherwise `[0, reference line]`
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match (self.series.first(), self.series.last()) {
            (Some(first), Some(last)) => Some((first.0, last.0)),
            _ => self
                .x_domain
                .or_else(|| self.reference_line_x.map(|x| (0.0, x))),
        }
    }
}

/// Chart rendering errors
#[derive(Error, Debug)]
pub enum ChartError {
    /// Writing the output failed
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type alias for chart rendering
pub type ChartResult<T> = Result<T, ChartError>;

/// A chart backend
pub trait ChartRenderer {
    /// MIME type of the rendered output
    fn content_type(&self) -> &'static str;

    /// Render the chart to a document
    fn render(&self, spec: &ChartSpec) -> ChartResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_scale_fixed() {
        let series = vec![(1.0, 500.0), (2.0, 100.0)];
        assert_eq!(AxisScale::Fixed(200.0).upper_bound(&series), 200.0);
    }

    #[test]
    fn test_axis_scale_auto() {
        let series = vec![(1.0, 500.0), (2.0, 100.0)];
        assert_eq!(AxisScale::Auto.upper_bound(&series), 500.0);
        assert_eq!(AxisScale::Auto.upper_bound(&[(1.0, 0.0)]), 1.0);
    }

    #[test]
    fn test_chart_spec_builder() {
        let spec = ChartSpec::new(vec![(1.0, 10.0), (5.0, 2.0)])
            .reference_line(3.0)
            .reference_dot(2.5, 4.0)
            .y_scale(AxisScale::Fixed(8.0));

        assert_eq!(spec.reference_line_x, Some(3.0));
        assert_eq!(spec.reference_dot, Some(ReferenceDot { x: 2.5, y: 4.0 }));
        assert_eq!(spec.x_range(), Some((1.0, 5.0)));
        assert_eq!(ChartSpec::new(Vec::new()).x_range(), None);
    }

    #[test]
    fn test_x_range_fallbacks() {
        let spec = ChartSpec::new(vec![(2.0, 1.0), (4.0, 1.0)]).x_domain(0.0, 100.0);
        assert_eq!(spec.x_range(), Some((2.0, 4.0)));

        let spec = ChartSpec::new(Vec::new()).x_domain(10.0, 50.0);
        assert_eq!(spec.x_range(), Some((10.0, 50.0)));

        let spec = ChartSpec::new(Vec::new()).reference_line(90.0);
        assert_eq!(spec.x_range(), Some((0.0, 90.0)));
    }

    #[test]
    fn test_axis_scale_serde() {
        let json = serde_json::to_value(AxisScale::Fixed(10.0)).unwrap();
        assert_eq!(json, serde_json::json!({"mode": "fixed", "max": 10.0}));
        let json = serde_json::to_value(AxisScale::Auto).unwrap();
        assert_eq!(json, serde_json::json!({"mode": "auto"}));
    }
}
