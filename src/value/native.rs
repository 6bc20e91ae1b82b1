//! Conversions between native Rust types and `Value`
//!
//! `FromValue` is a direct assignment: it accepts the matching category and
//! lossless numeric widening, nothing else. Coercing conversions live on
//! `Value` itself (`to_long`, `to_nullable_string`, ...).

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};

use super::errors::{FieldError, FieldResult};
use super::types::{Value, ValueMap};

/// Produces a `Value` snapshot of a native value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Builds a native value from a `Value` without coercion.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> FieldResult<Self>;
}

fn mismatch<T>(expected: &str, value: &Value) -> FieldResult<T> {
    Err(FieldError::incompatible(expected, value.kind_name()))
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> FieldResult<Self> {
        Ok(value)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => mismatch("boolean", &other),
        }
    }
}

impl ToValue for i32 {
    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            other => mismatch("integer", &other),
        }
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Long(*self)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Integer(n) => Ok(n as i64),
            Value::Long(n) => Ok(n),
            other => mismatch("long", &other),
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Integer(n) => Ok(n as f32),
            Value::Long(n) => Ok(n as f32),
            Value::Float(n) => Ok(n),
            other => mismatch("float", &other),
        }
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Double(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Integer(n) => Ok(n as f64),
            Value::Long(n) => Ok(n as f64),
            Value::Float(n) => Ok(n as f64),
            Value::Double(n) => Ok(n),
            other => mismatch("double", &other),
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::String(s) | Value::Enum(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => mismatch("datetime", &other),
        }
    }
}

impl ToValue for Duration {
    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }
}

impl FromValue for Duration {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Duration(d) => Ok(d),
            other => mismatch("duration", &other),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => mismatch("array", &other),
        }
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: Value) -> FieldResult<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => mismatch("array", &other),
        }
    }
}

/// Entries of a map-like value: maps directly, records by field.
fn into_entries(value: Value, expected: &str) -> FieldResult<Vec<(String, Value)>> {
    match value {
        Value::Map(map) => Ok(map.into_iter().collect()),
        Value::Record(record) => Ok(record
            .field_names()
            .into_iter()
            .map(|name| {
                let field = record.get_field(&name).unwrap_or_default();
                (name, field)
            })
            .collect()),
        other => mismatch(expected, &other),
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<ValueMap>(),
        )
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: Value) -> FieldResult<Self> {
        into_entries(value, "map")?
            .into_iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
            .collect()
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<ValueMap>(),
        )
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: Value) -> FieldResult<Self> {
        into_entries(value, "map")?
            .into_iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_is_accepted() {
        assert_eq!(i64::from_value(Value::Integer(7)), Ok(7));
        assert_eq!(f64::from_value(Value::Long(3)), Ok(3.0));
    }

    #[test]
    fn test_no_coercion() {
        let err = i64::from_value(Value::from("7")).unwrap_err();
        assert_eq!(err, FieldError::incompatible("long", "string"));
        assert!(i32::from_value(Value::Long(7)).is_err());
        assert!(String::from_value(Value::Integer(7)).is_err());
    }

    #[test]
    fn test_option_accepts_null() {
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(
            Option::<String>::from_value(Value::from("a")),
            Ok(Some("a".to_string()))
        );
    }

    #[test]
    fn test_collections() {
        let deque: VecDeque<i32> =
            FromValue::from_value(Value::Array(vec![Value::from(1), Value::from(2)])).unwrap();
        assert_eq!(deque, VecDeque::from(vec![1, 2]));

        let map: HashMap<String, String> =
            FromValue::from_value(Value::from_pairs([("k", "v")])).unwrap();
        assert_eq!(map["k"], "v");

        assert_eq!(
            vec![1i64, 2].to_value(),
            Value::Array(vec![Value::Long(1), Value::Long(2)])
        );
    }
}
