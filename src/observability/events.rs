//! Observable events
//!
//! Every log line emitted by the crate names one of these events.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Property access
    /// A record rejected a write (unknown field or incompatible value)
    PropertySetSkipped,
    /// Traversal stopped at the configured depth limit
    DepthLimitReached,
    /// An indexed write would grow a sequence past the configured limit
    SequenceGrowthRefused,

    // Mapping
    /// Direct assignment failed while mapping
    MapperAssignmentFailed,

    // Validation
    /// Fail-fast validation rejected a value
    ValidationFailed,
    /// A schema definition was rejected at construction
    SchemaRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::PropertySetSkipped => "PROPERTY_SET_SKIPPED",
            Event::DepthLimitReached => "DEPTH_LIMIT_REACHED",
            Event::SequenceGrowthRefused => "SEQUENCE_GROWTH_REFUSED",
            Event::MapperAssignmentFailed => "MAPPER_ASSIGNMENT_FAILED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::PropertySetSkipped,
            Event::DepthLimitReached,
            Event::SequenceGrowthRefused,
            Event::MapperAssignmentFailed,
            Event::ValidationFailed,
            Event::SchemaRejected,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::DepthLimitReached), "DEPTH_LIMIT_REACHED");
    }
}
