//! Conversions from external parser errors into `PropsError`.

use std::fmt::Display;

use super::PropsError;
use crate::convert::TextFormat;

impl From<serde_json::Error> for PropsError {
    fn from(e: serde_json::Error) -> Self {
        Self::FormatParse {
            format: TextFormat::Json,
            message: format!("{e} at line {}, column {}", e.line(), e.column()),
        }
    }
}

impl From<serde_yaml::Error> for PropsError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::FormatParse {
            format: TextFormat::Yaml,
            message: e.to_string(),
        }
    }
}

impl serde::de::Error for PropsError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Mapping(msg.to_string())
    }

    fn duplicate_field(field: &'static str) -> Self {
        Self::DuplicateField { field }
    }
}

impl serde::ser::Error for PropsError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Mapping(msg.to_string())
    }
}
