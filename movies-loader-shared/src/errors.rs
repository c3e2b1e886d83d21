//! Errors raised while constructing catalog records.
use thiserror::Error;

/// Represents a record that could not be built from its raw parts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Unwraps a required field, failing with `MissingField` when it is absent.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField { field })
}
