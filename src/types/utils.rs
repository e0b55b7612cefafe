//! Shared JSON extraction helpers.
//!
//! The backend's structured answers arrive as loosely-typed
//! `serde_json::Value` records that may be missing keys or carry values of
//! the wrong shape. These accessors turn that into the default-injection
//! the normalizer needs without verbose `get/as_*` chains.

use serde_json::Value;

/// Extract string from JSON value by key.
#[inline]
pub fn json_string(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

/// Extract string with default value.
#[inline]
pub fn json_string_or(value: &Value, key: &str, default: &str) -> String {
    json_string(value, key).unwrap_or_else(|| default.to_string())
}

/// Extract string array from JSON value by key.
///
/// Non-string elements are skipped; a missing or non-array value yields
/// an empty vector.
#[inline]
pub fn json_string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract boolean with default.
#[inline]
pub fn json_bool(value: &Value, key: &str, default: bool) -> bool {
    value.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

/// Extract a 0-100 score with default.
///
/// Accepts any JSON number (floats are rounded), clamped into 0-100.
/// Non-numeric values fall back to the default.
#[inline]
pub fn json_score_or(value: &Value, key: &str, default: u8) -> u8 {
    match value.get(key).and_then(|v| v.as_f64()) {
        Some(n) => n.round().clamp(0.0, 100.0) as u8,
        None => default,
    }
}

/// Extract a raw numeric value without defaulting, for policies that
/// distinguish "absent" from any concrete number.
#[inline]
pub fn json_number(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(|v| v.as_f64())
}
