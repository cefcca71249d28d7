//! Java-style `.properties` text ⇄ flat map.
//!
//! Reading follows the conventional format: `#` and `!` start comment
//! lines, keys end at the first unescaped `=`, `:` or whitespace, a trailing
//! odd backslash continues the logical line, and `\t \n \r \f \\ \uXXXX`
//! escapes are decoded. Writing emits one `key=value` line per entry and
//! escapes whatever the reader would otherwise misinterpret.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use super::scalar::{infer_scalar, scalar_text};
use super::{FlatMap, TextFormat};
use crate::{PropsError, PropsResult};

/// Parse properties text into flat leaves.
///
/// Values are typed with [`infer_scalar`]. A repeated key keeps its first
/// position and its last value.
///
/// ```
/// use layered_props::convert::properties_text_to_flat;
/// use serde_json::json;
///
/// let flat = properties_text_to_flat("# comment\nserver.port=8080\nname = demo\\u0021\n")?;
/// assert_eq!(flat["server.port"], json!(8080));
/// assert_eq!(flat["name"], json!("demo!"));
/// # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
/// ```
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`] for a malformed `\u` escape.
pub fn properties_text_to_flat(text: &str) -> PropsResult<FlatMap> {
    let mut flat = FlatMap::new();
    for (line_no, line) in logical_lines(text) {
        let (raw_key, raw_value) = split_entry(&line);
        let key = unescape(&raw_key).map_err(|msg| parse_error(line_no, &msg))?;
        let value = unescape(raw_value).map_err(|msg| parse_error(line_no, &msg))?;
        flat.insert(key, infer_scalar(&value));
    }
    Ok(flat)
}

/// Render flat leaves as properties text, one `key=value` line per entry in
/// iteration order.
///
/// `null` leaves are written with an empty value.
#[must_use]
pub fn flat_to_properties_text(flat: &FlatMap) -> String {
    let mut out = String::new();
    for (key, value) in flat {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, &scalar_text(value), false);
        out.push('\n');
    }
    out
}

fn parse_error(line_no: usize, message: &str) -> Arc<PropsError> {
    Arc::new(PropsError::FormatParse {
        format: TextFormat::Properties,
        message: format!("line {line_no}: {message}"),
    })
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{c}')
}

/// Join continuation lines and drop blanks and comments.
///
/// Yields the 1-based number of the first physical line of each entry with
/// the joined text.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut entries = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (index, physical) in text.lines().enumerate() {
        let trimmed = physical.trim_start_matches(is_blank);
        let (line_no, mut line) = match pending.take() {
            Some((start, joined)) => (start, joined),
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, String::new())
            }
        };
        if continues(trimmed) {
            line.push_str(trimmed.strip_suffix('\\').unwrap_or(trimmed));
            pending = Some((line_no, line));
        } else {
            line.push_str(trimmed);
            entries.push((line_no, line));
        }
    }
    if let Some(last) = pending {
        entries.push(last);
    }
    entries
}

/// A line continues when it ends with an odd run of backslashes.
fn continues(line: &str) -> bool {
    line.chars()
        .rev()
        .take_while(|ch| *ch == '\\')
        .fold(false, |odd, _| !odd)
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (String, &str) {
    let mut key = String::new();
    let mut chars = line.char_indices();
    let mut value_start = line.len();
    while let Some((pos, ch)) = chars.next() {
        if ch == '\\' {
            key.push(ch);
            if let Some((_, escaped)) = chars.next() {
                key.push(escaped);
            }
            continue;
        }
        if ch == '=' || ch == ':' || is_blank(ch) {
            value_start = pos;
            break;
        }
        key.push(ch);
    }
    let rest = line.get(value_start..).unwrap_or_default();
    let after_blank = rest.trim_start_matches(is_blank);
    let after_sep = after_blank
        .strip_prefix(['=', ':'])
        .unwrap_or(after_blank)
        .trim_start_matches(is_blank);
    (key, after_sep)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(decode_unicode(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_hex4(chars: &mut Peekable<Chars<'_>>) -> Result<u32, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 {
        return Err(format!("truncated unicode escape '\\u{digits}'"));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| format!("invalid unicode escape '\\u{digits}'"))
}

/// Decode the four hex digits after `\u`, pairing UTF-16 surrogates.
fn decode_unicode(chars: &mut Peekable<Chars<'_>>) -> Result<char, String> {
    let high = read_hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| format!("unpaired surrogate \\u{high:04X}"));
    }
    if chars.next_if_eq(&'\\').is_none() || chars.next_if_eq(&'u').is_none() {
        return Err(format!("unpaired surrogate \\u{high:04X}"));
    }
    let low = read_hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(format!("invalid low surrogate \\u{low:04X}"));
    }
    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(combined).ok_or_else(|| format!("invalid surrogate pair \\u{high:04X}\\u{low:04X}"))
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (pos, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | ' ' if is_key => {
                out.push('\\');
                out.push(ch);
            }
            '#' | '!' if is_key && pos == 0 => {
                out.push('\\');
                out.push(ch);
            }
            ' ' if pos == 0 => out.push_str("\\ "),
            control if control.is_control() => {
                out.push_str(&format!("\\u{:04X}", u32::from(control)));
            }
            other => out.push(other),
        }
    }
}
