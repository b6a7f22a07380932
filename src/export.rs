//! Point Export
//!
//! Serializes a swept price series as CSV, a JSON array, or NDJSON.

use crate::model::PricePoint;
use thiserror::Error;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    /// Parse a format name; unknown names fall back to NDJSON
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "csv" => ExportFormat::Csv,
            "json" => ExportFormat::Json,
            _ => ExportFormat::Ndjson,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Buffer error: {0}")]
    Buffer(String),
}

/// Render points in the requested format
pub fn export_points(points: &[PricePoint], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => format_csv(points),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(points)?),
        ExportFormat::Ndjson => format_ndjson(points),
    }
}

/// CSV with header `interval_days,visit_count,total_cost`
fn format_csv(points: &[PricePoint]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["interval_days", "visit_count", "total_cost"])?;

    for point in points {
        writer.write_record([
            point.interval_days.to_string(),
            point.visit_count.to_string(),
            point.total_cost.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn format_ndjson(points: &[PricePoint]) -> Result<String, ExportError> {
    let mut out = String::new();
    for point in points {
        out.push_str(&serde_json::to_string(point)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<PricePoint> {
        vec![
            PricePoint {
                interval_days: 30,
                total_cost: 56502.0,
                visit_count: 73,
            },
            PricePoint {
                interval_days: 120,
                total_cost: 17748.0,
                visit_count: 18,
            },
        ]
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json"), ExportFormat::Json);
        assert_eq!(ExportFormat::parse("ndjson"), ExportFormat::Ndjson);
        assert_eq!(ExportFormat::parse("xml"), ExportFormat::Ndjson);
    }

    #[test]
    fn test_export_csv() {
        let csv = export_points(&sample_points(), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "interval_days,visit_count,total_cost");
        assert_eq!(lines[1], "30,73,56502");
        assert_eq!(lines[2], "120,18,17748");
    }

    #[test]
    fn test_export_json() {
        let json = export_points(&sample_points(), ExportFormat::Json).unwrap();
        let parsed: Vec<PricePoint> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_points());
    }

    #[test]
    fn test_export_ndjson() {
        let out = export_points(&sample_points(), ExportFormat::Ndjson).unwrap();
        assert_eq!(out.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(first["interval_days"], 30);
        assert_eq!(first["visit_count"], 73);
    }

    #[test]
    fn test_export_empty() {
        let csv = export_points(&[], ExportFormat::Csv).unwrap();
        assert_eq!(csv, "interval_days,visit_count,total_cost\n");
        assert_eq!(export_points(&[], ExportFormat::Ndjson).unwrap(), "");
    }
}
