//! Primary error enum for conversion, mapping and loading flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::convert::TextFormat;

/// Errors that can occur while converting, mapping or loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropsError {
    /// A flat key does not follow the `a.b[0].c` grammar.
    #[error("malformed key '{key}': {reason}")]
    MalformedKey {
        /// The rejected key text.
        key: String,
        /// What the parser tripped over.
        reason: String,
    },

    /// Source text is not valid in its declared format.
    #[error("failed to parse {format} text: {message}")]
    FormatParse {
        /// Format the text was parsed as.
        format: TextFormat,
        /// Parser diagnostic.
        message: String,
    },

    /// The shape of a dynamic value cannot satisfy the requested type.
    #[error("cannot map '{path}': expected {expected}, found {found}")]
    Conversion {
        /// Key path of the offending node, empty for the root.
        path: String,
        /// Shape the target type requires.
        expected: String,
        /// Shape actually present in the source.
        found: String,
    },

    /// A scalar could not be coerced into the target type (strict mode only).
    #[error("cannot coerce {value} at '{path}' into {target}")]
    Coercion {
        /// Key path of the offending field.
        path: String,
        /// Name of the target type.
        target: &'static str,
        /// Rendering of the source value.
        value: String,
    },

    /// A struct field was supplied twice, usually through a serde alias that
    /// the mapper could not fold into its primary name.
    #[error("duplicate field `{field}`")]
    DuplicateField {
        /// Primary name of the repeated field.
        field: &'static str,
    },

    /// Free-form failure reported through serde's error hooks.
    #[error("mapping failed: {0}")]
    Mapping(String),

    /// Error originating from a configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O or parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Multiple errors collected during a single strict conversion.
    #[error("{count} configuration errors:\n{0}", count = .0.len())]
    Aggregate(Box<AggregatedErrors>),
}
