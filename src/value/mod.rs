//! Value model
//!
//! Tagged scalar/sequence/map/record containers, conversions between them,
//! and the text forms they are built from (JSON and flat string maps).

mod convert;
mod errors;
mod json;
mod native;
mod record;
mod string_map;
mod types;

pub use convert::{format_duration, parse_datetime, parse_duration};
pub use errors::{FieldError, FieldResult, ValueError, ValueResult};
pub use native::{FromValue, ToValue};
pub use record::{FieldRecord, Record};
pub use string_map::StringValueMap;
pub use types::{Value, ValueMap};
