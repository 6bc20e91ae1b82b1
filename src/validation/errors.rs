//! Validation error types
//!
//! Error codes:
//! - MALFORMED_TYPE: a type descriptor could not be parsed
//! - INVALID_OPERATOR: unknown comparison operator
//! - INVALID_PATTERN: a LIKE pattern is not a valid regular expression
//! - INVALID_DATA: fail-fast validation found problems

use std::fmt::Write as _;

use thiserror::Error;

use super::result::{ResultSeverity, ValidationResult};

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A schema could not be built. Raised at construction, never during
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Malformed type descriptor '{descriptor}': {reason}")]
    MalformedType { descriptor: String, reason: String },

    #[error("Unknown comparison operator '{0}'")]
    InvalidOperator(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl SchemaError {
    /// Create a malformed-type error
    pub fn malformed_type(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedType {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::MalformedType { .. } => "MALFORMED_TYPE",
            SchemaError::InvalidOperator(_) => "INVALID_OPERATOR",
            SchemaError::InvalidPattern { .. } => "INVALID_PATTERN",
        }
    }
}

/// Fail-fast validation error carrying every result that triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    results: Vec<ValidationResult>,
}

impl ValidationError {
    /// Builds an error from the results that count as failures.
    ///
    /// Errors always count; warnings count only when `strict` is set.
    /// Returns `None` if nothing counts.
    pub fn from_results(results: &[ValidationResult], strict: bool) -> Option<Self> {
        let failures: Vec<ValidationResult> = results
            .iter()
            .filter(|result| match result.severity {
                ResultSeverity::Error => true,
                ResultSeverity::Warning => strict,
                ResultSeverity::Information => false,
            })
            .cloned()
            .collect();
        if failures.is_empty() {
            return None;
        }

        let mut message = String::from("Validation failed");
        for (i, failure) in failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            let _ = write!(message, "{}{}", sep, failure.message);
        }
        Some(Self {
            message,
            results: failures,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The results that caused the failure, in validation order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn code(&self) -> &'static str {
        "INVALID_DATA"
    }
}
