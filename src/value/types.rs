//! The tagged value container
//!
//! A `Value` is one of:
//! - null
//! - a scalar (boolean, integer, long, float, double, string, datetime,
//!   duration, enum)
//! - an ordered sequence of values
//! - a string-keyed map of values
//! - an opaque record: a native structure with a fixed field set

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

use super::convert::format_duration;
use super::record::Record;

/// String-keyed map of values, iterated in ascending key order.
pub type ValueMap = BTreeMap<String, Value>;

/// A dynamically shaped value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent or explicitly null
    #[default]
    Null,
    /// Boolean
    Boolean(bool),
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Point in time, always UTC
    DateTime(DateTime<Utc>),
    /// Signed time span
    Duration(Duration),
    /// Name of an enumeration variant
    Enum(String),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Associative map
    Map(ValueMap),
    /// Fixed-field native structure
    Record(Box<dyn Record>),
}

impl Value {
    /// Builds a map value from key/value pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wraps a native record.
    pub fn record<R: Record>(record: R) -> Value {
        Value::Record(Box::new(record))
    }

    /// Returns an empty map value.
    pub fn empty_map() -> Value {
        Value::Map(ValueMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for non-null, non-container values.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Null | Value::Array(_) | Value::Map(_) | Value::Record(_)
        )
    }

    /// Returns true for map-like values: maps and records.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Record(_))
    }

    /// Returns true for values whose properties can be traversed.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Map(_) | Value::Record(_))
    }

    /// Returns true for numeric scalars.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Long(_) | Value::Float(_) | Value::Double(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Value::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        match self {
            Value::Record(record) => Some(record.as_mut()),
            _ => None,
        }
    }

    /// Short category name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Enum(_) => "enum",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Record(_) => "object",
        }
    }
}

impl PartialEq for Value {
    /// Structural equality. No coercion: `Integer(1) != Long(1)`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                a.type_name() == b.type_name()
                    && a.field_names() == b.field_names()
                    && a
                        .field_names()
                        .iter()
                        .all(|name| a.get_field(name) == b.get_field(name))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Stringified form: scalars print raw, sequences join with `,`,
    /// maps and records print as JSON. Null prints as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) | Value::Enum(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Duration(d) => f.write_str(&format_duration(d)),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Map(_) | Value::Record(_) => f.write_str(&self.to_json_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
