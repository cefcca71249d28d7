//! Flat key grammar: `server.ports[0]`, `e[0][1]`, `a.b.c`.
//!
//! A [`KeyPath`] is the parsed form of a flat key: an ordered list of
//! mapping-key and sequence-index steps into a configuration tree. Indices
//! are written without leading zeros (`a[7]`, never `a[007]`), which keeps
//! formatting an exact inverse of parsing for every key the parser accepts.
//!
//! ```
//! use layered_props::{KeyPath, Step};
//!
//! let path: KeyPath = "e[0][1]".parse()?;
//! assert_eq!(
//!     path.steps(),
//!     &[Step::Key("e".into()), Step::Index(0), Step::Index(1)]
//! );
//! assert_eq!(path.to_string(), "e[0][1]");
//! # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{PropsError, PropsResult};

/// One step of a [`KeyPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Descend into a mapping entry.
    Key(String),
    /// Descend into a sequence element.
    Index(usize),
}

/// Parsed flat key addressing a node inside a configuration tree.
///
/// The empty path addresses the whole tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Step>);

impl KeyPath {
    /// The empty path.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a flat key.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::MalformedKey`] when a bracket is unterminated,
    /// an index is not a non-negative integer or carries a leading zero, a
    /// `]` appears without its `[`, or text follows a closing bracket before
    /// the next `.`.
    pub fn parse(key: &str) -> PropsResult<Self> {
        let mut steps = Vec::new();
        if key.is_empty() {
            return Ok(Self(steps));
        }
        for (position, segment) in key.split('.').enumerate() {
            parse_segment(key, segment, position == 0, &mut steps)
                .map_err(|reason| Arc::new(PropsError::malformed_key(key, reason)))?;
        }
        Ok(Self(steps))
    }

    /// Steps in order from the root.
    #[must_use]
    pub const fn steps(&self) -> &[Step] {
        self.0.as_slice()
    }

    /// Whether this is the root path.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Final step, if any.
    #[must_use]
    pub const fn last(&self) -> Option<&Step> {
        self.0.as_slice().last()
    }

    /// Path without its final step; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// Whether `prefix` is a (non-strict) prefix of this path.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Append a mapping step.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.0.push(Step::Key(key.into()));
    }

    /// Append a sequence step.
    pub fn push_index(&mut self, index: usize) {
        self.0.push(Step::Index(index));
    }

    /// Remove and return the final step.
    pub fn pop(&mut self) -> Option<Step> {
        self.0.pop()
    }

    /// Borrowing iterator over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

/// Parse one dot-separated segment: an optional name followed by `[n]`
/// suffixes. Only the first segment of a key may omit the name.
fn parse_segment(
    key: &str,
    segment: &str,
    first: bool,
    steps: &mut Vec<Step>,
) -> Result<(), String> {
    let (name, indices) = match segment.split_once('[') {
        Some((name, rest)) => (name, Some(rest)),
        None => (segment, None),
    };
    if name.contains(']') {
        return Err(format!("stray ']' in segment '{name}'"));
    }
    let Some(mut rest) = indices else {
        steps.push(Step::Key(name.to_owned()));
        return Ok(());
    };
    if name.is_empty() {
        if !first {
            return Err("index must follow a key name".to_owned());
        }
    } else {
        steps.push(Step::Key(name.to_owned()));
    }
    loop {
        let Some((digits, after)) = rest.split_once(']') else {
            return Err(format!("unterminated bracket in '{key}'"));
        };
        steps.push(Step::Index(parse_index(digits)?));
        if after.is_empty() {
            return Ok(());
        }
        let Some(next) = after.strip_prefix('[') else {
            return Err(format!("unexpected '{after}' after index"));
        };
        rest = next;
    }
}

fn parse_index(digits: &str) -> Result<usize, String> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("index '{digits}' is not a non-negative integer"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(format!("index '{digits}' has a leading zero"));
    }
    digits
        .parse()
        .map_err(|_| format!("index '{digits}' is out of range"))
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.0.iter().enumerate() {
            match step {
                Step::Key(key) if position == 0 => f.write_str(key)?,
                Step::Key(key) => write!(f, ".{key}")?,
                Step::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Arc<PropsError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<Step> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests;
