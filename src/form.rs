//! Form Input Coercion
//!
//! Turns raw form values into a `FeeSchedule` and `SweepParameters`.
//! Coercion never fails: anything that does not parse, or falls below the
//! field's minimum, is replaced by a default so the calculator always renders.
//!
//! - Integer fields (`total_days`, `max_interval`, `step_days`, `base_months`):
//!   minimum 1, fractional values truncate, fallback is the configured default.
//! - Fee fields: minimum 0, fallback is `0`.
//! - A field that is absent altogether takes the configured default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{FeeSchedule, SweepParameters};

/// Raw values as typed into the calculator form
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawFormInput {
    #[serde(default, deserialize_with = "text_or_number")]
    pub total_days: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub max_interval: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub step_days: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub base_months: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub first_visit_fee: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub repeat_visit_fee: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub other_fee: Option<String>,
}

/// Accept `"12"`, `12` or `12.5` for a form field
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Field>::deserialize(deserializer)?.map(|field| match field {
        Field::Text(s) => s,
        Field::Number(n) => n.to_string(),
    }))
}

/// Defaults applied when a form field is missing or malformed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormDefaults {
    pub fees: FeeSchedule,
    pub sweep: SweepParameters,
}

/// Fully coerced form state
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FormValues {
    pub fees: FeeSchedule,
    pub sweep: SweepParameters,
}

impl RawFormInput {
    /// Coerce every field, substituting defaults where needed
    pub fn coerce(&self, defaults: &FormDefaults) -> FormValues {
        let sweep = SweepParameters {
            total_days: coerce_count("total_days", self.total_days.as_deref(), defaults.sweep.total_days),
            max_interval: coerce_count(
                "max_interval",
                self.max_interval.as_deref(),
                defaults.sweep.max_interval,
            ),
            step_days: coerce_count("step_days", self.step_days.as_deref(), defaults.sweep.step_days),
            base_months: coerce_count(
                "base_months",
                self.base_months.as_deref(),
                defaults.sweep.base_months,
            ),
        };

        let fees = FeeSchedule {
            first_visit_fee: coerce_fee(
                "first_visit_fee",
                self.first_visit_fee.as_deref(),
                defaults.fees.first_visit_fee,
            ),
            repeat_visit_fee: coerce_fee(
                "repeat_visit_fee",
                self.repeat_visit_fee.as_deref(),
                defaults.fees.repeat_visit_fee,
            ),
            other_fee: coerce_fee("other_fee", self.other_fee.as_deref(), defaults.fees.other_fee),
        };

        FormValues { fees, sweep }
    }
}

/// Parse a numeric field the way a browser number input reads it
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Positive integer field; malformed or below 1 falls back to `default`
pub fn coerce_count(field: &str, raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };

    match parse_number(raw) {
        Some(v) if v >= 1.0 => {
            if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                v.trunc() as u32
            }
        }
        _ => {
            tracing::debug!(field, raw, default, "Substituting default for invalid count");
            default
        }
    }
}

/// Non-negative fee field; missing takes `default`, malformed or negative is 0
pub fn coerce_fee(field: &str, raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };

    match parse_number(raw) {
        Some(v) if v >= 0.0 => v,
        _ => {
            tracing::debug!(field, raw, "Substituting 0 for invalid fee");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> RawFormInput {
        let mut raw = RawFormInput::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "total_days" => raw.total_days = value,
                "max_interval" => raw.max_interval = value,
                "step_days" => raw.step_days = value,
                "base_months" => raw.base_months = value,
                "first_visit_fee" => raw.first_visit_fee = value,
                "repeat_visit_fee" => raw.repeat_visit_fee = value,
                "other_fee" => raw.other_fee = value,
                other => panic!("unknown field {}", other),
            }
        }
        raw
    }

    #[test]
    fn test_empty_form_uses_defaults() {
        let values = RawFormInput::default().coerce(&FormDefaults::default());
        assert_eq!(values.sweep, SweepParameters::default());
        assert_eq!(values.fees, FeeSchedule::default());
    }

    #[test]
    fn test_valid_values_pass_through() {
        let values = input(&[
            ("total_days", "365"),
            ("max_interval", "60"),
            ("step_days", " 5 "),
            ("base_months", "2"),
            ("first_visit_fee", "300.5"),
            ("repeat_visit_fee", "90"),
            ("other_fee", "0"),
        ])
        .coerce(&FormDefaults::default());

        assert_eq!(values.sweep, SweepParameters::new(365, 60, 5, 2).unwrap());
        assert_eq!(values.fees, FeeSchedule::new(300.5, 90.0, 0.0));
    }

    #[test]
    fn test_invalid_counts_fall_back_to_defaults() {
        let values = input(&[
            ("total_days", ""),
            ("max_interval", "abc"),
            ("step_days", "0"),
            ("base_months", "-3"),
        ])
        .coerce(&FormDefaults::default());

        assert_eq!(values.sweep, SweepParameters::default());
    }

    #[test]
    fn test_fractional_count_truncates() {
        assert_eq!(coerce_count("step_days", Some("2.9"), 1), 2);
        assert_eq!(coerce_count("step_days", Some("0.5"), 1), 1);
        assert_eq!(coerce_count("step_days", Some("1e2"), 1), 100);
        assert_eq!(coerce_count("step_days", Some("1e20"), 1), u32::MAX);
        assert_eq!(coerce_count("step_days", Some("inf"), 7), 7);
    }

    #[test]
    fn test_invalid_fees_become_zero() {
        let values = input(&[
            ("first_visit_fee", "x"),
            ("repeat_visit_fee", "-10"),
            ("other_fee", ""),
        ])
        .coerce(&FormDefaults::default());

        assert_eq!(values.fees, FeeSchedule::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = FormDefaults {
            fees: FeeSchedule::new(1.0, 2.0, 3.0),
            sweep: SweepParameters::new(100, 50, 2, 1).unwrap(),
        };
        let values = input(&[("step_days", "nope")]).coerce(&defaults);
        assert_eq!(values.sweep.step_days, 2);
        assert_eq!(values.fees, defaults.fees);
    }

    #[test]
    fn test_deserialize_text_and_numbers() {
        let raw: RawFormInput =
            serde_json::from_str(r#"{"total_days": 365, "step_days": "7", "other_fee": 12.5}"#)
                .unwrap();
        assert_eq!(raw.total_days.as_deref(), Some("365"));
        assert_eq!(raw.step_days.as_deref(), Some("7"));
        assert_eq!(raw.other_fee.as_deref(), Some("12.5"));
        assert!(raw.max_interval.is_none());

        let values = raw.coerce(&FormDefaults::default());
        assert_eq!(values.sweep.total_days, 365);
        assert_eq!(values.fees.other_fee, 12.5);
    }
}
