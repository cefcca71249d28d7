//! Scalar coercion table used by the lenient mapper and the typed getters.
//!
//! Each function returns `None` when the source cannot be read as the target
//! kind; callers decide whether that degrades to a zero value or an error.

use serde_json::Value;

/// Integral float to `i64`, rejecting fractions and out-of-range values.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "the value is integral and range-checked before the cast"
)]
fn integral_i64(float: f64) -> Option<i64> {
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then(|| float as i64)
}

/// Integral non-negative float to `u64`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "the value is integral, non-negative and range-checked before the cast"
)]
fn integral_u64(float: f64) -> Option<u64> {
    let in_range = float >= 0.0 && float < u64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then(|| float as u64)
}

/// `true`/`false` literals, or the same words in any ASCII case.
pub(crate) fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => {
            let word = text.trim();
            if word.eq_ignore_ascii_case("true") {
                Some(true)
            } else if word.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub(crate) fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_i64)),
        Value::String(text) => {
            let digits = text.trim();
            digits
                .parse::<i64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().and_then(integral_i64))
        }
        _ => None,
    }
}

pub(crate) fn to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(integral_u64)),
        Value::String(text) => {
            let digits = text.trim();
            digits
                .parse::<u64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().and_then(integral_u64))
        }
        _ => None,
    }
}

pub(crate) fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Narrow to `f32`; precision loss is accepted for `f32` targets.
#[expect(
    clippy::cast_possible_truncation,
    reason = "f32 targets accept rounding"
)]
pub(crate) const fn narrow_f32(float: f64) -> f32 {
    float as f32
}

/// Text of a scalar. Numbers use their canonical decimal form.
pub(crate) fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn to_char(value: &Value) -> Option<char> {
    let text = to_text(value)?;
    let mut chars = text.chars();
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}
