//! Classifiers and coercions for loosely-typed setting values.
//!
//! Settings arrive from the host as JSON and are edited as free text, so the
//! helpers here reproduce the JavaScript conversions the pixel library and the
//! host runtime apply (`Number(v)`, `String(v)`, truthiness) on top of
//! `serde_json::Value`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

static DATA_ELEMENT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%[^%]+%$").expect("valid data element pattern"));

static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal pattern")
});

/// Largest integer an `f64` represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A data element token is a `%name%` placeholder the host resolves before
/// the extension runs. Tokens are opaque and bypass every type check.
pub fn is_data_element_token(value: &Value) -> bool {
    value.as_str().is_some_and(is_data_element_str)
}

pub fn is_data_element_str(value: &str) -> bool {
    DATA_ELEMENT_TOKEN.is_match(value)
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A value worth writing into a settings object: anything but `null` and the
/// empty string. Unlike truthiness this keeps `0` and `false`.
pub fn is_meaningful(value: &Value) -> bool {
    !matches!(value, Value::Null) && value.as_str() != Some("")
}

/// Builds a JSON number, keeping integral values free of a fractional part so
/// `600` serializes as `600` and not `600.0`.
///
/// Returns `None` for non-finite input, which JSON cannot represent.
pub fn number_value(number: f64) -> Option<Value> {
    if !number.is_finite() {
        return None;
    }
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        // -0.0 collapses to 0, as JSON.stringify does.
        return Some(Value::from(number as i64));
    }
    Number::from_f64(number).map(Value::Number)
}

/// `Number(v)` for JSON values. `None` stands for `NaN`.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => parse_number(&js_string(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// `Number(text)`: surrounding whitespace is ignored, the empty string is `0`,
/// hexadecimal / octal / binary prefixes and `Infinity` are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    if DECIMAL_LITERAL.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

/// Numbers are returned unchanged; strings holding a finite numeric literal
/// become numbers; anything else, data element tokens included, is returned
/// as is.
pub fn cast_to_number_if_string(value: &Value) -> Value {
    match value {
        Value::String(s) if !s.trim().is_empty() && !is_data_element_str(s) => parse_number(s)
            .and_then(number_value)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

/// `String(v)` for JSON values.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
