//! Type matching
//!
//! A value matches an expected type when:
//! - it is null (absence is a presence concern, not a type concern)
//! - the expected type is `any`
//! - its category equals the expected category
//! - its category widens losslessly into the expected one:
//!   integer → long → float → double, any scalar → string,
//!   record → map, map → object

use super::descriptor::TypeDescriptor;
use super::type_code::TypeCode;
use crate::value::Value;

/// Matches values against expected types.
pub struct TypeMatcher;

impl TypeMatcher {
    /// Checks a value against a descriptor, including array elements.
    pub fn matches(expected: &TypeDescriptor, value: &Value) -> bool {
        if !Self::matches_code(expected.code(), value) {
            return false;
        }
        match (expected.element(), value) {
            (Some(element), Value::Array(items)) => {
                items.iter().all(|item| Self::matches(element, item))
            }
            _ => true,
        }
    }

    /// Checks a value against a bare category.
    pub fn matches_code(expected: TypeCode, value: &Value) -> bool {
        if value.is_null() || expected == TypeCode::Unknown {
            return true;
        }
        let actual = TypeCode::of(value);
        actual == expected || Self::is_coercible(actual, expected)
    }

    /// Checks a value against a descriptor string. Unparseable descriptors
    /// never match.
    pub fn matches_name(expected: &str, value: &Value) -> bool {
        TypeDescriptor::parse(expected)
            .map(|descriptor| Self::matches(&descriptor, value))
            .unwrap_or(false)
    }

    /// Returns true if `from` converts into `to` without loss.
    pub fn is_coercible(from: TypeCode, to: TypeCode) -> bool {
        match (from, to) {
            (a, b) if a == b => true,
            (TypeCode::Integer, TypeCode::Long | TypeCode::Float | TypeCode::Double) => true,
            (TypeCode::Long, TypeCode::Float | TypeCode::Double) => true,
            (TypeCode::Float, TypeCode::Double) => true,
            (scalar, TypeCode::String) => scalar.is_scalar(),
            (TypeCode::Object, TypeCode::Map) => true,
            (TypeCode::Map, TypeCode::Object) => true,
            _ => false,
        }
    }
}
