//! Property and path access over heterogeneous values
//!
//! `property` resolves one name against a map, sequence or record.
//! `path` chains those lookups along dot-delimited paths.

mod path;
mod property;

pub use path::{join_path, Path, PathAccessor};
pub use property::{parse_index, Properties, PropertyAccessor};
