//! Value model error types

use thiserror::Error;

/// Result type for record field writes
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type for parsing values from text
pub type ValueResult<T> = Result<T, ValueError>;

/// A record rejected a field write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The record has no field with this name; record shape is fixed
    #[error("{record} has no field '{field}'")]
    UnknownField { record: String, field: String },

    /// The value cannot be stored in the field without coercion
    #[error("cannot assign {actual} to field of type {expected}")]
    Incompatible { expected: String, actual: String },
}

impl FieldError {
    /// Create an unknown-field error
    pub fn unknown_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        FieldError::UnknownField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Create an incompatible-value error
    pub fn incompatible(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        FieldError::Incompatible {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::UnknownField { .. } => "UNKNOWN_FIELD",
            FieldError::Incompatible { .. } => "INCOMPATIBLE_VALUE",
        }
    }
}

/// Text could not be parsed into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Malformed JSON input
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Malformed `key=value;...` input
    #[error("Invalid string map at offset {offset}: {reason}")]
    InvalidStringMap { offset: usize, reason: String },
}

impl ValueError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::InvalidJson(_) => "INVALID_JSON",
            ValueError::InvalidStringMap { .. } => "INVALID_STRING_MAP",
        }
    }
}

impl From<serde_json::Error> for ValueError {
    fn from(err: serde_json::Error) -> Self {
        ValueError::InvalidJson(err.to_string())
    }
}
