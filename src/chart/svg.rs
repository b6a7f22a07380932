//! SVG Chart
//!
//! Line chart rendered as a standalone SVG document.

use std::fmt::Write;

use super::{ChartRenderer, ChartResult, ChartSpec};

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 45.0;

const Y_TICKS: usize = 5;
const X_TICKS: usize = 6;

const GRID_COLOR: &str = "#e5e7eb"; // gray-200
const AXIS_COLOR: &str = "#6b7280"; // gray-500
const LINE_COLOR: &str = "#111827"; // gray-900
const DOT_COLOR: &str = "#F44336"; // red

/// SVG renderer
#[derive(Debug, Clone)]
pub struct SvgChart {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgChart {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

/// Maps data coordinates to pixel coordinates
struct Frame {
    x_min: f64,
    x_max: f64,
    y_max: f64,
    plot_width: f64,
    plot_height: f64,
}

impl Frame {
    fn x(&self, value: f64) -> f64 {
        MARGIN_LEFT + (value - self.x_min) / (self.x_max - self.x_min) * self.plot_width
    }

    // SVG y grows downward
    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + (1.0 - value / self.y_max) * self.plot_height
    }
}

impl SvgChart {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    // An empty series still gets axes, grid and markers
    fn frame(&self, spec: &ChartSpec) -> Frame {
        let (mut x_min, mut x_max) = spec.x_range().unwrap_or((0.0, 1.0));
        if x_max <= x_min {
            x_min -= 1.0;
            x_max += 1.0;
        }

        Frame {
            x_min,
            x_max,
            y_max: spec.y_scale.upper_bound(&spec.series),
            plot_width: self.width - MARGIN_LEFT - MARGIN_RIGHT,
            plot_height: self.height - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }
}

impl ChartRenderer for SvgChart {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, spec: &ChartSpec) -> ChartResult<String> {
        let frame = self.frame(spec);
        let mut out = String::new();

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(
            out,
            r#"<defs><clipPath id="plot"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            MARGIN_LEFT, MARGIN_TOP, frame.plot_width, frame.plot_height
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        // Horizontal grid lines with y labels
        for i in 0..=Y_TICKS {
            let value = frame.y_max * i as f64 / Y_TICKS as f64;
            let y = frame.y(value);
            writeln!(
                out,
                r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID_COLOR}" stroke-dasharray="3 3"/>"#,
                MARGIN_LEFT,
                self.width - MARGIN_RIGHT,
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{AXIS_COLOR}">{}</text>"#,
                MARGIN_LEFT - 6.0,
                y + 4.0,
                group_thousands(value)
            )?;
        }

        // X labels
        for i in 0..=X_TICKS {
            let value = frame.x_min + (frame.x_max - frame.x_min) * i as f64 / X_TICKS as f64;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
                frame.x(value),
                MARGIN_TOP + frame.plot_height + 16.0,
                value.round()
            )?;
        }

        // Axes
        let bottom = MARGIN_TOP + frame.plot_height;
        writeln!(
            out,
            r#"<path d="M{l:.1},{t:.1} V{b:.1} H{r:.1}" fill="none" stroke="{AXIS_COLOR}"/>"#,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = bottom,
            r = MARGIN_LEFT + frame.plot_width
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            MARGIN_LEFT + frame.plot_width / 2.0,
            self.height - 6.0,
            escape(&spec.x_label)
        )?;
        writeln!(
            out,
            r#"<text transform="translate(14 {:.1}) rotate(-90)" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            MARGIN_TOP + frame.plot_height / 2.0,
            escape(&spec.y_label)
        )?;

        out.push_str(r#"<g clip-path="url(#plot)">"#);
        out.push('\n');

        // Cost curve
        if !spec.series.is_empty() {
            out.push_str(&format!(
                r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="2" points=""#
            ));
            for (idx, (x, y)) in spec.series.iter().enumerate() {
                if idx > 0 {
                    out.push(' ');
                }
                write!(out, "{:.2},{:.2}", frame.x(*x), frame.y(*y))?;
            }
            out.push_str("\"/>\n");
        }

        if let Some(x) = spec.reference_line_x {
            let px = frame.x(x);
            writeln!(
                out,
                r#"<line class="reference-line" x1="{px:.2}" y1="{:.1}" x2="{px:.2}" y2="{:.1}" stroke="{AXIS_COLOR}" stroke-dasharray="5 5"/>"#,
                MARGIN_TOP, bottom
            )?;
        }

        if let Some(dot) = spec.reference_dot {
            writeln!(
                out,
                r#"<circle class="reference-dot" cx="{:.2}" cy="{:.2}" r="5" fill="{DOT_COLOR}"/>"#,
                frame.x(dot.x),
                frame.y(dot.y)
            )?;
        }

        out.push_str("</g>\n</svg>\n");
        Ok(out)
    }
}

/// Format a value with thousands separators, no decimals
pub fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if rounded < 0.0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
