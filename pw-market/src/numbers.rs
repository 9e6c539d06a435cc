//! Numeric conversion helpers centralizing amount parsing and safe casts.

use num_traits::cast::cast;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Clamp an amount to a finite, non-negative value, returning 0.0 otherwise.
#[must_use]
pub fn normalize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse an amount that may arrive as text, normalizing anything unusable to 0.0.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .map_or(0.0, normalize_amount)
}

/// Read an amount from an arbitrary JSON value (number, numeric string, or null).
#[must_use]
pub fn amount_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map_or(0.0, normalize_amount),
        Value::String(s) => parse_amount(s),
        _ => 0.0,
    }
}

/// Serde adapter for optional amounts; unusable values become `None`.
///
/// # Errors
///
/// Only fails when the input is not valid JSON for the surrounding document.
pub fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .map(amount_from_value)
        .filter(|amount| *amount > 0.0))
}

/// Round an amount to two decimal places for display and comparison.
///
/// Amounts too large to scale by 100 have no fractional cents left and are
/// returned as they are.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    let normalized = normalize_amount(value);
    let cents = normalized * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        normalized
    }
}

/// Format an amount with two decimals, the way prices are shown in the client.
#[must_use]
pub fn fmt_amount(value: f64) -> String {
    format!("{:.2}", round_to_cents(value))
}

/// Convert a float identifier to `u64` only when it is a positive whole number.
#[must_use]
pub fn whole_positive_u64(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
        return None;
    }
    cast::<f64, u64>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_handles_text_and_garbage() {
        assert!((parse_amount(" 1,250.50 ") - 1250.5).abs() < f64::EPSILON);
        assert!(parse_amount("abc").abs() < f64::EPSILON);
        assert!(parse_amount("-40").abs() < f64::EPSILON);
        assert!(parse_amount("NaN").abs() < f64::EPSILON);
    }

    #[test]
    fn amount_from_value_accepts_numbers_and_strings() {
        assert!((amount_from_value(&serde_json::json!(12.5)) - 12.5).abs() < f64::EPSILON);
        assert!((amount_from_value(&serde_json::json!("88")) - 88.0).abs() < f64::EPSILON);
        assert!(amount_from_value(&Value::Null).abs() < f64::EPSILON);
        assert!(amount_from_value(&serde_json::json!([1])).abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_and_formatting() {
        assert!((round_to_cents(10.005_1) - 10.01).abs() < 1e-9);
        assert_eq!(fmt_amount(300.0), "300.00");
        assert_eq!(fmt_amount(f64::NAN), "0.00");
    }

    #[test]
    fn huge_amounts_stay_finite() {
        let huge = parse_amount("1e307");
        assert!((round_to_cents(huge) - 1e307).abs() < 1e292);
        let shown = fmt_amount(huge);
        assert!(!shown.contains("inf"), "{shown}");
        assert!(shown.ends_with(".00"));
    }

    #[test]
    fn whole_positive_rejects_fractions_and_zero() {
        assert_eq!(whole_positive_u64(42.0), Some(42));
        assert_eq!(whole_positive_u64(0.0), None);
        assert_eq!(whole_positive_u64(1.5), None);
        assert_eq!(whole_positive_u64(-3.0), None);
        assert_eq!(whole_positive_u64(f64::INFINITY), None);
    }
}
