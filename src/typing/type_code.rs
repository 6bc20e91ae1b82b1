//! Value categories and the type alias table

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::value::Value;

/// Coarse runtime classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// Matches any value
    Unknown,
    Null,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    String,
    DateTime,
    Duration,
    Enum,
    Array,
    Map,
    /// Fixed-field record
    Object,
}

/// Alias table, built on first use and never modified afterwards.
static ALIASES: OnceLock<HashMap<&'static str, TypeCode>> = OnceLock::new();

fn aliases() -> &'static HashMap<&'static str, TypeCode> {
    ALIASES.get_or_init(|| {
        let entries: [(&'static str, TypeCode); 31] = [
            ("any", TypeCode::Unknown),
            ("unknown", TypeCode::Unknown),
            ("null", TypeCode::Null),
            ("bool", TypeCode::Boolean),
            ("boolean", TypeCode::Boolean),
            ("int", TypeCode::Integer),
            ("integer", TypeCode::Integer),
            ("int32", TypeCode::Integer),
            ("long", TypeCode::Long),
            ("int64", TypeCode::Long),
            ("float", TypeCode::Float),
            ("float32", TypeCode::Float),
            ("double", TypeCode::Double),
            ("float64", TypeCode::Double),
            ("number", TypeCode::Double),
            ("string", TypeCode::String),
            ("str", TypeCode::String),
            ("text", TypeCode::String),
            ("date", TypeCode::DateTime),
            ("datetime", TypeCode::DateTime),
            ("timestamp", TypeCode::DateTime),
            ("duration", TypeCode::Duration),
            ("timespan", TypeCode::Duration),
            ("enum", TypeCode::Enum),
            ("array", TypeCode::Array),
            ("list", TypeCode::Array),
            ("map", TypeCode::Map),
            ("dict", TypeCode::Map),
            ("dictionary", TypeCode::Map),
            ("object", TypeCode::Object),
            ("record", TypeCode::Object),
        ];
        entries.into_iter().collect()
    })
}

impl TypeCode {
    /// Category of a value.
    pub fn of(value: &Value) -> TypeCode {
        match value {
            Value::Null => TypeCode::Null,
            Value::Boolean(_) => TypeCode::Boolean,
            Value::Integer(_) => TypeCode::Integer,
            Value::Long(_) => TypeCode::Long,
            Value::Float(_) => TypeCode::Float,
            Value::Double(_) => TypeCode::Double,
            Value::String(_) => TypeCode::String,
            Value::DateTime(_) => TypeCode::DateTime,
            Value::Duration(_) => TypeCode::Duration,
            Value::Enum(_) => TypeCode::Enum,
            Value::Array(_) => TypeCode::Array,
            Value::Map(_) => TypeCode::Map,
            Value::Record(_) => TypeCode::Object,
        }
    }

    /// Looks up a type alias, case-insensitively.
    pub fn from_alias(name: &str) -> Option<TypeCode> {
        aliases().get(name.trim().to_ascii_lowercase().as_str()).copied()
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Unknown => "any",
            TypeCode::Null => "null",
            TypeCode::Boolean => "boolean",
            TypeCode::Integer => "integer",
            TypeCode::Long => "long",
            TypeCode::Float => "float",
            TypeCode::Double => "double",
            TypeCode::String => "string",
            TypeCode::DateTime => "datetime",
            TypeCode::Duration => "duration",
            TypeCode::Enum => "enum",
            TypeCode::Array => "array",
            TypeCode::Map => "map",
            TypeCode::Object => "object",
        }
    }

    /// Returns true for single-valued, non-null categories.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeCode::Boolean
                | TypeCode::Integer
                | TypeCode::Long
                | TypeCode::Float
                | TypeCode::Double
                | TypeCode::String
                | TypeCode::DateTime
                | TypeCode::Duration
                | TypeCode::Enum
        )
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
