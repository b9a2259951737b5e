//! Helpers for reading typed engine parameters from a `serde_json::Value` object.
//!
//! Each `param_*` helper takes a JSON value, a key name, and a default. If the
//! key is missing or the value is not the expected type, the default is
//! returned. The `require_*` checks turn a value that was read into a
//! validation error naming the parameter.

use crate::error::EngineError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`,
/// then converts to `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Fails with `EngineError::InvalidParam` unless `value` is finite.
pub fn require_finite(name: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be finite, got {value}")))
    }
}

/// Fails with `EngineError::InvalidParam` unless `value` is finite and lies in `[min, max]`.
pub fn require_in_range(name: &str, value: f64, min: f64, max: f64) -> Result<f64, EngineError> {
    require_finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be in [{min}, {max}], got {value}")))
    }
}

/// Fails with `EngineError::InvalidParam` unless `value` is finite and strictly positive.
pub fn require_positive(name: &str, value: f64) -> Result<f64, EngineError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be greater than zero, got {value}")))
    }
}

fn invalid(name: &str, reason: String) -> EngineError {
    EngineError::InvalidParam {
        name: name.to_owned(),
        reason,
    }
}
