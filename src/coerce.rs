//! Coercion of resolved raw values into the accessor types.
//!
//! Environment and file values are always text. Default-table values and
//! caller defaults may already be typed; those are converted with the rules
//! below instead of being round-tripped through text.

use toml::Value;

use crate::error::GetconfError;

const TRUTHY: [&str; 4] = ["on", "true", "yes", "1"];

fn malformed(key: &str, value: &Value, reason: impl Into<String>) -> GetconfError {
    GetconfError::MalformedValue {
        key: key.to_string(),
        value: display(value),
        reason: reason.into(),
    }
}

/// Render a value as plain text (strings unquoted).
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn to_text(key: &str, value: Value) -> Result<String, GetconfError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(float_text(f)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(d) => Ok(d.to_string()),
        other @ (Value::Array(_) | Value::Table(_)) => {
            Err(malformed(key, &other, format!("expected text, found {}", other.type_str())))
        }
    }
}

/// Whole floats keep a fractional digit: `2.0`, not `2`.
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Split `text` on `sep`, trimming each piece and dropping empty ones.
pub fn split_list(text: &str, sep: &str) -> Vec<String> {
    text.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn to_list(key: &str, value: Value, sep: &str) -> Result<Vec<String>, GetconfError> {
    match value {
        Value::String(s) => Ok(split_list(&s, sep)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                nested @ (Value::Array(_) | Value::Table(_)) => Err(malformed(
                    key,
                    &nested,
                    "list items must be scalar values",
                )),
                scalar => to_text(key, scalar),
            })
            .collect(),
        other => Err(malformed(
            key,
            &other,
            format!("expected text or a list, found {}", other.type_str()),
        )),
    }
}

pub fn to_bool(value: Value) -> bool {
    match value {
        Value::String(s) => TRUTHY.contains(&s.to_lowercase().as_str()),
        Value::Boolean(b) => b,
        Value::Integer(i) => i == 1,
        // A float never renders as one of the accepted words.
        Value::Float(_) | Value::Datetime(_) | Value::Array(_) | Value::Table(_) => false,
    }
}

pub fn to_int(key: &str, value: Value) -> Result<i64, GetconfError> {
    match value {
        Value::Integer(i) => Ok(i),
        Value::Boolean(b) => Ok(i64::from(b)),
        Value::Float(f) if f.is_finite() => {
            let whole = f.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is already out of range.
            if whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
                Ok(whole as i64)
            } else {
                Err(malformed(key, &value, "out of range for an integer"))
            }
        }
        Value::String(ref s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| malformed(key, &value, e.to_string())),
        other => Err(malformed(
            key,
            &other,
            format!("cannot convert {} to an integer", other.type_str()),
        )),
    }
}

pub fn to_float(key: &str, value: Value) -> Result<f64, GetconfError> {
    match value {
        Value::Float(f) => Ok(f),
        Value::Integer(i) => Ok(i as f64),
        Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::String(ref s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| malformed(key, &value, e.to_string())),
        other => Err(malformed(
            key,
            &other,
            format!("cannot convert {} to a float", other.type_str()),
        )),
    }
}
