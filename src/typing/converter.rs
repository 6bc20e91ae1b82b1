//! Conversion of values into a target category

use chrono::{DateTime, Duration, Utc};

use super::type_code::TypeCode;
use crate::value::{Value, ValueMap};

/// Converts values between categories. Never fails.
pub struct TypeConverter;

impl TypeConverter {
    /// Converts `value` into `code`, or `None` when it cannot be converted.
    pub fn to_nullable_type(code: TypeCode, value: &Value) -> Option<Value> {
        if value.is_null() {
            return None;
        }
        match code {
            TypeCode::Unknown | TypeCode::Object => Some(value.clone()),
            TypeCode::Null => None,
            TypeCode::Boolean => value.to_nullable_boolean().map(Value::Boolean),
            TypeCode::Integer => value.to_nullable_integer().map(Value::Integer),
            TypeCode::Long => value.to_nullable_long().map(Value::Long),
            TypeCode::Float => value.to_nullable_float().map(Value::Float),
            TypeCode::Double => value.to_nullable_double().map(Value::Double),
            TypeCode::String => value.to_nullable_string().map(Value::String),
            TypeCode::DateTime => value.to_nullable_datetime().map(Value::DateTime),
            TypeCode::Duration => value.to_nullable_duration().map(Value::Duration),
            TypeCode::Enum => match value {
                Value::String(s) | Value::Enum(s) => Some(Value::Enum(s.clone())),
                _ => None,
            },
            TypeCode::Array => Some(Value::Array(value.to_array())),
            TypeCode::Map => match value {
                Value::Map(_) | Value::Record(_) => Some(Value::Map(value.to_map())),
                _ => None,
            },
        }
    }

    /// Converts `value` into `code`, falling back to the category default.
    pub fn to_type(code: TypeCode, value: &Value) -> Value {
        Self::to_nullable_type(code, value).unwrap_or_else(|| Self::default_for(code))
    }

    /// Converts `value` into `code`, falling back to `default`.
    pub fn to_type_with_default(code: TypeCode, value: &Value, default: Value) -> Value {
        Self::to_nullable_type(code, value).unwrap_or(default)
    }

    /// Default value of a category.
    pub fn default_for(code: TypeCode) -> Value {
        match code {
            TypeCode::Unknown | TypeCode::Null | TypeCode::Object => Value::Null,
            TypeCode::Boolean => Value::Boolean(false),
            TypeCode::Integer => Value::Integer(0),
            TypeCode::Long => Value::Long(0),
            TypeCode::Float => Value::Float(0.0),
            TypeCode::Double => Value::Double(0.0),
            TypeCode::String => Value::String(String::new()),
            TypeCode::DateTime => Value::DateTime(DateTime::<Utc>::default()),
            TypeCode::Duration => Value::Duration(Duration::zero()),
            TypeCode::Enum => Value::Enum(String::new()),
            TypeCode::Array => Value::Array(Vec::new()),
            TypeCode::Map => Value::Map(ValueMap::new()),
        }
    }
}
