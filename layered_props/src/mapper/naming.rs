//! Field-name normalisation shared by both mapping directions.

use heck::ToLowerCamelCase;

/// Fold a field or key name for case-insensitive binding.
///
/// ASCII letters are lowercased and `_`/`-` separators dropped, so
/// `appName`, `AppName`, `app_name` and `app-name` all fold to `appname`.
///
/// ```
/// use layered_props::mapper::normalise_field_name;
///
/// assert_eq!(normalise_field_name("AppName"), "appname");
/// assert_eq!(normalise_field_name("app_name"), normalise_field_name("appName"));
/// ```
#[must_use]
pub fn normalise_field_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !matches!(ch, '_' | '-'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Lower-camel-case projection of a declared field name.
///
/// Only snake-case identifiers (lowercase ASCII letters, digits and `_`) are
/// projected; those are the names Rust fields carry unless renamed. Any
/// other name came from an explicit `#[serde(rename = ..)]` and is kept
/// exactly as written.
///
/// ```
/// use layered_props::mapper::to_lower_camel;
///
/// assert_eq!(to_lower_camel("app_name"), "appName");
/// assert_eq!(to_lower_camel("max_retry_backoff"), "maxRetryBackoff");
/// assert_eq!(to_lower_camel("URL"), "URL");
/// assert_eq!(to_lower_camel("api-module"), "api-module");
/// ```
#[must_use]
pub fn to_lower_camel(name: &str) -> String {
    if is_snake_identifier(name) {
        name.to_lower_camel_case()
    } else {
        name.to_owned()
    }
}

fn is_snake_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'_')
}

/// Match source text against an enum's declared variant names.
///
/// An exact match wins; otherwise the first variant whose
/// [`normalise_field_name`] form equals the text's is returned.
pub(crate) fn resolve_variant(variants: &[&'static str], text: &str) -> Option<&'static str> {
    variants
        .iter()
        .copied()
        .find(|variant| *variant == text)
        .or_else(|| {
            let folded = normalise_field_name(text);
            variants
                .iter()
                .copied()
                .find(|variant| normalise_field_name(variant) == folded)
        })
}

/// Resolve which source key feeds each declared field.
///
/// Returns, per field, the index into `keys` of the bound source key. Exact
/// matches are bound first; remaining fields then take the first unbound key
/// whose [`normalise_field_name`] form matches. A key binds at most one field,
/// and earlier declared fields win ties.
pub(crate) fn bind_fields(fields: &[&str], keys: &[&str]) -> Vec<Option<usize>> {
    let mut taken = vec![false; keys.len()];
    let mut bound: Vec<Option<usize>> = vec![None; fields.len()];
    for (field, slot) in fields.iter().zip(bound.iter_mut()) {
        for (index, (key, used)) in keys.iter().zip(taken.iter_mut()).enumerate() {
            if !*used && key == field {
                *used = true;
                *slot = Some(index);
                break;
            }
        }
    }
    for (field, slot) in fields.iter().zip(bound.iter_mut()) {
        if slot.is_some() {
            continue;
        }
        let folded = normalise_field_name(field);
        for (index, (key, used)) in keys.iter().zip(taken.iter_mut()).enumerate() {
            if !*used && normalise_field_name(key) == folded {
                *used = true;
                *slot = Some(index);
                break;
            }
        }
    }
    bound
}
