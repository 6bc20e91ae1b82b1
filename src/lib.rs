//! anyshape - shape-agnostic value access, validation and mapping
//!
//! Values of heterogeneous runtime shape (records, maps, sequences and
//! scalars) are handled through one `Value` model:
//! - `access` reads and writes named and dot-path properties
//! - `validation` checks values against declarative schemas and reports
//!   every deviation in one pass
//! - `mapper` copies same-named properties between shapes

pub mod access;
pub mod config;
pub mod mapper;
pub mod observability;
pub mod typing;
pub mod validation;
pub mod value;

pub use access::{Path, PathAccessor, PropertyAccessor};
pub use config::EngineConfig;
pub use mapper::{Mapper, MapperError};
pub use typing::{TypeCode, TypeConverter, TypeDescriptor, TypeMatcher};
pub use validation::{Rule, Schema, SchemaError, ValidationError, ValidationResult};
pub use value::{FromValue, Record, ToValue, Value, ValueMap};
