//! Shorthand constructors for `PropsError`.

use std::sync::Arc;

use super::{AggregatedErrors, PropsError};

impl PropsError {
    /// Build a [`PropsError::MalformedKey`].
    #[must_use]
    pub fn malformed_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PropsError::Conversion`] for the node at `path`.
    #[must_use]
    pub fn conversion(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Key path of the field this error was raised for, if any.
    ///
    /// An empty path denotes the root value.
    #[must_use]
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::Conversion { path, .. } | Self::Coercion { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Fold a list of errors into one.
    ///
    /// Returns `None` for an empty list, the error itself when exactly one
    /// uniquely owned error is supplied, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let single = arcs.pop()?;
        Some(match Arc::try_unwrap(single) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }
}
