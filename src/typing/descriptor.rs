//! Type descriptors
//!
//! A descriptor is a category name from the alias table, optionally followed
//! by one or more `[]` suffixes: `int`, `object[]`, `string[][]`.

use std::fmt;
use std::str::FromStr;

use super::type_code::TypeCode;
use crate::validation::{SchemaError, SchemaResult};

/// Expected type of a value, with an element type for arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    code: TypeCode,
    element: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn new(code: TypeCode) -> Self {
        Self {
            code,
            element: None,
        }
    }

    /// Array whose elements must match `element`.
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self {
            code: TypeCode::Array,
            element: Some(Box::new(element)),
        }
    }

    /// Parses a descriptor string.
    ///
    /// # Errors
    ///
    /// `MalformedType` for empty input, unbalanced brackets or unknown
    /// type names.
    pub fn parse(text: &str) -> SchemaResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::malformed_type(text, "empty type name"));
        }

        if let Some(inner) = trimmed.strip_suffix("[]") {
            if inner.trim().is_empty() {
                return Err(SchemaError::malformed_type(text, "missing element type"));
            }
            return Self::parse(inner).map(Self::array_of);
        }

        if trimmed.contains(['[', ']']) {
            return Err(SchemaError::malformed_type(text, "unbalanced brackets"));
        }

        TypeCode::from_alias(trimmed)
            .map(Self::new)
            .ok_or_else(|| SchemaError::malformed_type(text, "unknown type name"))
    }

    pub fn code(&self) -> TypeCode {
        self.code
    }

    /// Element type, for array descriptors declared with `[]`.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        self.element.as_deref()
    }
}

impl From<TypeCode> for TypeDescriptor {
    fn from(code: TypeCode) -> Self {
        Self::new(code)
    }
}

impl FromStr for TypeDescriptor {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}[]", element),
            None => f.write_str(self.code.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar() {
        let descriptor = TypeDescriptor::parse("Long").unwrap();
        assert_eq!(descriptor.code(), TypeCode::Long);
        assert!(descriptor.element().is_none());
    }

    #[test]
    fn test_parse_arrays() {
        let descriptor = TypeDescriptor::parse("object[]").unwrap();
        assert_eq!(descriptor.code(), TypeCode::Array);
        assert_eq!(descriptor.element().unwrap().code(), TypeCode::Object);

        let nested: TypeDescriptor = "int[][]".parse().unwrap();
        assert_eq!(nested.to_string(), "integer[][]");
    }

    #[test]
    fn test_malformed_descriptors() {
        for text in ["", "  ", "[]", "int[", "int]", "widget", "int[x]"] {
            let err = TypeDescriptor::parse(text).unwrap_err();
            assert_eq!(err.code(), "MALFORMED_TYPE", "input {:?}", text);
        }
    }
}
