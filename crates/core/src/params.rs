//! Lenient extraction of typed values from a flat JSON settings object.
//!
//! Each helper takes the raw object, a key and a default. Missing keys and
//! values of the wrong JSON type yield the default; these never fail.

use serde_json::Value;

/// Extracts an `f64` (JSON float or integer) and clamps it to `[min, max]`.
///
/// Wrong-typed or missing values yield `default` unclamped, so callers pass
/// a default that already lies in range.
pub fn param_f64_clamped(params: &Value, name: &str, default: f64, min: f64, max: f64) -> f64 {
    match params.get(name).and_then(Value::as_f64) {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a string slice from `params[name]`, or `None` if missing or wrong type.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

/// Returns the first of `names` present in `params`, for keys that were
/// renamed between releases. A `null` value counts as absent.
pub fn first_present<'a>(params: &Value, names: &[&'a str]) -> Option<&'a str> {
    names
        .iter()
        .copied()
        .find(|n| params.get(*n).is_some_and(|v| !v.is_null()))
}
