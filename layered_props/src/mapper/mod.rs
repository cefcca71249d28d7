//! Lenient mapping between dynamic trees and typed values.
//!
//! [`from_dynamic`] binds a [`DynamicValue`](crate::DynamicValue) onto any
//! `DeserializeOwned` type:
//!
//! - struct fields bind to source keys case-insensitively (`appName`,
//!   `AppName` and `app_name` all feed a field named `app_name`), preferring
//!   an exact match when several keys qualify;
//! - every declared field is populated; a missing or `null` source leaves the
//!   field at its zero value (`0`, `""`, `false`, `None`, empty collection);
//! - scalars are coerced between text, numbers and booleans where the text
//!   matches the target grammar;
//! - a string holding JSON text is parsed when a struct, map or sequence is
//!   expected.
//!
//! Failed coercions and shape mismatches below the root fall back to the
//! zero value. [`MapMode::Strict`] collects them instead and fails with one
//! aggregated error. A shape mismatch at the root always fails.
//!
//! Missing fields take their zero value even when a `#[serde(default = ..)]`
//! function is declared. Field aliases declared with `#[serde(alias = ..)]`
//! bind like the primary name.
//!
//! Enum variants are matched case-insensitively. Enums have no zero value:
//! a variant that cannot be resolved leaves an `Option` field at `None`
//! (recorded in strict mode) and fails a required one.
//!
//! [`to_dynamic`] goes the other way, naming struct fields in lower camel
//! case. Fields renamed with `#[serde(rename = ..)]` to anything other than
//! a snake-case identifier keep the name as written.
//!
//! ```
//! use layered_props::mapper::{from_dynamic, to_dynamic};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
//! struct App {
//!     app_name: String,
//!     age: u32,
//!     tags: Vec<String>,
//! }
//!
//! let app: App = from_dynamic(&json!({ "AppName": "zhou", "age": "12" }))?;
//! assert_eq!(app, App { app_name: "zhou".into(), age: 12, tags: vec![] });
//! assert_eq!(
//!     to_dynamic(&app)?,
//!     json!({ "appName": "zhou", "age": 12, "tags": [] })
//! );
//! # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
//! ```

mod coerce;
mod de;
mod naming;
mod ser;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{KeyPath, PropsResult};

pub use naming::{normalise_field_name, to_lower_camel};

/// How [`from_dynamic_with`] treats values it cannot coerce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapMode {
    /// Substitute the zero value and carry on.
    #[default]
    Lenient,
    /// Record every failure and report them together.
    Strict,
}

/// Map a dynamic value onto `T`, leniently.
///
/// # Errors
///
/// Returns [`PropsError::Conversion`](crate::PropsError::Conversion) when the
/// root's shape cannot satisfy `T` (for example a sequence for a struct), or
/// a [`PropsError::Mapping`](crate::PropsError::Mapping) raised by `T`'s own
/// `Deserialize` impl.
pub fn from_dynamic<T: DeserializeOwned>(value: &Value) -> PropsResult<T> {
    from_dynamic_with(Some(value), MapMode::Lenient)
}

/// Map a possibly absent dynamic value onto `T` using `mode`.
///
/// An absent value produces `T`'s zero value.
///
/// # Errors
///
/// As [`from_dynamic`]. In [`MapMode::Strict`] every failed coercion or
/// nested mismatch is also reported, folded into
/// [`PropsError::Aggregate`](crate::PropsError::Aggregate) when there is
/// more than one.
pub fn from_dynamic_with<T: DeserializeOwned>(
    value: Option<&Value>,
    mode: MapMode,
) -> PropsResult<T> {
    from_dynamic_at(value, KeyPath::root(), mode)
}

/// As [`from_dynamic_with`], reporting error paths below `base`.
pub(crate) fn from_dynamic_at<T: DeserializeOwned>(
    value: Option<&Value>,
    base: KeyPath,
    mode: MapMode,
) -> PropsResult<T> {
    let ctx = de::Context::new(mode);
    loop {
        match T::deserialize(de::Node::root(value, base.clone(), &ctx)) {
            Ok(mapped) => return ctx.finish().map_or(Ok(mapped), |err| Err(Arc::new(err))),
            Err(err) if ctx.replay_after(&err) => {}
            Err(err) => return Err(Arc::new(err)),
        }
    }
}

/// Map a textual value onto `T`.
///
/// Text aimed at a struct, map or sequence is parsed as JSON; text aimed at a
/// scalar is coerced; a `String` target receives the text unchanged.
///
/// ```
/// use layered_props::mapper::from_text;
///
/// assert_eq!(from_text::<i64>("123")?, 123);
/// assert_eq!(from_text::<Vec<u8>>("[1, 2]")?, vec![1, 2]);
/// assert_eq!(from_text::<String>(r#"{"a":1}"#)?, r#"{"a":1}"#);
/// # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
/// ```
///
/// # Errors
///
/// As [`from_dynamic`].
pub fn from_text<T: DeserializeOwned>(text: &str) -> PropsResult<T> {
    from_dynamic(&Value::String(text.to_owned()))
}

/// Render `value` as a dynamic tree with lower-camel-case field names.
///
/// # Errors
///
/// Returns [`PropsError::Mapping`](crate::PropsError::Mapping) when a map
/// key is not a scalar, an integer exceeds 64 bits, or `value`'s
/// `Serialize` impl fails.
pub fn to_dynamic<T: ?Sized + Serialize>(value: &T) -> PropsResult<Value> {
    value.serialize(ser::DynamicSerializer).map_err(Arc::new)
}

/// Re-shape one typed value into another through the dynamic form.
///
/// # Errors
///
/// As [`to_dynamic`] followed by [`from_dynamic`].
pub fn remap<S: ?Sized + Serialize, T: DeserializeOwned>(source: &S) -> PropsResult<T> {
    from_dynamic(&to_dynamic(source)?)
}

#[cfg(test)]
mod tests;
