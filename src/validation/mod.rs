//! Schema validation
//!
//! Schemas are trees of typed nodes with attached rules. Validating a value
//! walks the schema and the value together and collects every deviation
//! as a [`ValidationResult`]. Only schema construction can fail;
//! [`Schema::validate_and_throw`] turns results into an error on request.

mod comparison;
mod errors;
mod result;
mod rules;
mod schema;

pub use comparison::{compile_pattern, CompareOp, ObjectComparator};
pub use errors::{SchemaError, SchemaResult, ValidationError};
pub use result::{ResultCode, ResultSeverity, ValidationResult};
pub use rules::Rule;
pub use schema::{PropertySchema, Schema, SchemaKind};
