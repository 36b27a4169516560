//! Shared utilities for report rendering.
//!
//! Helpers for turning numbers and JSON values into the text that ends up
//! in tables, findings and diagrams.

use serde_json::Value;

// =============================================================================
// Number Formatting
// =============================================================================

/// Format a number in its shortest form: `42.0` renders as `42`, `0.5` as
/// `0.5`. Negative zero renders as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Format a ratio (0.0 - 1.0) as a percentage with two decimals, e.g. `10.00%`.
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Compute `part / whole` as a percentage, returning 0 when `whole` is 0.
pub fn percentage_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

// =============================================================================
// Value Coercion
// =============================================================================

/// Coerce a JSON value into display text.
///
/// `null` becomes the empty string, strings are used verbatim, numbers use
/// [`format_number`], and arrays/objects are JSON-serialized.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Check whether a JSON value is "truthy" in the loose sense used for
/// optional diagram inputs: `null`, `false`, `0` and `""` are not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a field from a JSON object as display text. Fields that are absent
/// or not [`is_truthy`] count as missing.
pub fn field_text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .filter(|field| is_truthy(field))
        .map(value_to_text)
}
