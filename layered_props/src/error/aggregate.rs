//! Strict-mode failure report, indexed by the key path of each failed field.

use std::{error::Error, fmt, sync::Arc};

use super::PropsError;

/// Failures recorded while mapping one value in [`MapMode::Strict`], in the
/// order the fields were visited.
///
/// Entries raised by a particular field carry its key path, so a caller can
/// ask which fields failed with [`paths`](Self::paths) or pull the failures
/// of one field with [`at`](Self::at).
///
/// ```
/// use layered_props::PropsError;
///
/// let err = PropsError::aggregate(vec![
///     PropsError::conversion("servers", "sequence", "string"),
///     PropsError::conversion("app.port", "u16", "mapping"),
/// ]);
/// if let Some(PropsError::Aggregate(report)) = err {
///     assert_eq!(report.paths(), ["servers", "app.port"]);
///     assert_eq!(report.at("app.port").count(), 1);
/// }
/// ```
///
/// [`MapMode::Strict`]: crate::mapper::MapMode::Strict
#[derive(Debug, Default)]
pub struct AggregatedErrors {
    entries: Vec<Arc<PropsError>>,
}

impl AggregatedErrors {
    pub(super) const fn new(entries: Vec<Arc<PropsError>>) -> Self {
        Self { entries }
    }

    /// Every recorded failure, in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = &PropsError> {
        self.entries.iter().map(Arc::as_ref)
    }

    /// Key paths of the failed fields, first occurrence only.
    ///
    /// Failures that are not tied to a field (a malformed key, say) do not
    /// contribute a path.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for path in self.iter().filter_map(PropsError::field_path) {
            if !seen.contains(&path) {
                seen.push(path);
            }
        }
        seen
    }

    /// Failures recorded against the field at `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a PropsError> + 'a {
        self.iter().filter(move |err| err.field_path() == Some(path))
    }

    /// Number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.iter().peekable();
        while let Some(err) = lines.next() {
            match err.field_path() {
                Some("") => write!(f, "  <root>: {err}")?,
                Some(path) => write!(f, "  {path}: {err}")?,
                None => write!(f, "  {err}")?,
            }
            if lines.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
