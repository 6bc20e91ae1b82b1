//! Type matching and conversion
//!
//! Type names resolve through a process-wide, read-only alias table.
//! Matching accepts lossless widening; conversion never fails.

mod converter;
mod descriptor;
mod matcher;
mod type_code;

pub use converter::TypeConverter;
pub use descriptor::TypeDescriptor;
pub use matcher::TypeMatcher;
pub use type_code::TypeCode;
