//! Structural mapping
//!
//! Moves data between shapes that agree on property names but not on
//! concrete types, e.g. a domain record onto its transfer object.

mod errors;
mod transfer;

pub use errors::{MapperError, MapperResult};
pub use transfer::{record_from_value, Mapper};
