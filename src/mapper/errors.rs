//! Mapper error types

use thiserror::Error;

use crate::value::FieldError;

/// Result type for structural mapping
pub type MapperResult<T> = Result<T, MapperError>;

/// Structural mapping failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// A matched property could not be assigned to the target field
    #[error("Cannot assign {source_property} to {target_type}.{target_property}: {reason}")]
    IncompatibleAssignment {
        source_property: String,
        target_property: String,
        target_type: String,
        reason: String,
    },

    /// Source nesting exceeds the configured depth limit
    #[error("Mapping exceeds {0} nested levels")]
    DepthExceeded(usize),
}

impl MapperError {
    /// Create an incompatible-assignment error from a rejected field write
    pub fn incompatible(
        property: impl Into<String>,
        target_type: impl Into<String>,
        err: &FieldError,
    ) -> Self {
        let property = property.into();
        MapperError::IncompatibleAssignment {
            source_property: property.clone(),
            target_property: property,
            target_type: target_type.into(),
            reason: err.to_string(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            MapperError::IncompatibleAssignment { .. } => "INCOMPATIBLE_ASSIGNMENT",
            MapperError::DepthExceeded(_) => "DEPTH_EXCEEDED",
        }
    }
}
