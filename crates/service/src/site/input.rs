//! Coercion of loosely typed request values.

use serde_json::Value;

use crate::errors::ServiceError;

/// Largest settable count (2^53 - 1, exact as a JSON double).
pub const MAX_VIEW_COUNT: i64 = 9_007_199_254_740_991;

/// `new_count` as an integer in `0..=MAX_VIEW_COUNT`. Floats truncate toward
/// zero and numeric strings are parsed.
pub fn view_count(v: Option<&Value>) -> Result<i64, ServiceError> {
    let n = match v {
        None | Some(Value::Null) => return Err(ServiceError::bad_request("No number provided")),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => f.trunc() as i64,
                _ => return Err(ServiceError::bad_request("Number out of range")),
            },
        },
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ServiceError::bad_request("new_count must be a whole number"))?,
        Some(_) => return Err(ServiceError::bad_request("new_count must be a whole number")),
    };
    if n < 0 {
        return Err(ServiceError::bad_request("new_count must not be negative"));
    }
    if n > MAX_VIEW_COUNT {
        return Err(ServiceError::bad_request("Number out of range"));
    }
    Ok(n)
}

/// Catalog id as an opaque string; numbers are accepted in their text form.
pub fn app_id(v: Option<&Value>) -> Result<String, ServiceError> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ServiceError::bad_request("No id provided")),
    }
}

pub fn flag(v: Option<&Value>) -> Result<bool, ServiceError> {
    match v {
        Some(Value::Bool(b)) => Ok(*b),
        None | Some(Value::Null) => Err(ServiceError::bad_request("No value provided")),
        Some(_) => Err(ServiceError::bad_request("enabled must be true or false")),
    }
}
