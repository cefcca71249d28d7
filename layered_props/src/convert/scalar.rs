//! Scalar typing shared by the text converters.

use serde_json::{Number, Value};

/// Type a textual scalar.
///
/// Text becomes a boolean, integer or float only when that value formats
/// back to exactly the same text, so `12` is a number but `012`, `+12` and
/// `1e3` stay strings. Everything else is a string.
///
/// ```
/// use layered_props::convert::infer_scalar;
/// use serde_json::json;
///
/// assert_eq!(infer_scalar("12"), json!(12));
/// assert_eq!(infer_scalar("012"), json!("012"));
/// assert_eq!(infer_scalar("2.5"), json!(2.5));
/// assert_eq!(infer_scalar("true"), json!(true));
/// assert_eq!(infer_scalar("True"), json!("True"));
/// ```
#[must_use]
pub fn infer_scalar(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = text.parse::<i64>() {
        if int.to_string() == text {
            return Value::from(int);
        }
    }
    if let Ok(uint) = text.parse::<u64>() {
        if uint.to_string() == text {
            return Value::from(uint);
        }
    }
    let canonical_float = text
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .filter(|number| number.to_string() == text);
    canonical_float.map_or_else(|| Value::String(text.to_owned()), Value::Number)
}

/// Text form of a scalar: strings verbatim, numbers in canonical decimal,
/// booleans as `true`/`false`, `null` as the empty string.
///
/// Containers render as compact JSON.
#[must_use]
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        container => container.to_string(),
    }
}

/// Short human-readable name of a node's shape, used in diagnostics.
#[must_use]
pub const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
