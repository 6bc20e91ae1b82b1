//! Observability for anyshape
//!
//! Structured JSON logging of typed events. Logging is read-only: it never
//! changes the outcome of an access, validation or mapping call.
//!
//! # Usage
//!
//! ```ignore
//! use anyshape::observability::{log_event_with_fields, Event, Severity};
//!
//! log_event_with_fields(Severity::Warn, Event::DepthLimitReached, &[("path", "a.b")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};

/// Log an event with fields
pub fn log_event_with_fields(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
