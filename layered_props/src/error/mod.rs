//! Error types produced by the converters, the mapper and the store.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::PropsError;
