//! Declarative schemas
//!
//! Validation semantics:
//! - a required null value yields one VALUE_IS_NULL error and nothing else
//! - an optional null value yields nothing
//! - a value of the wrong kind yields TYPE_MISMATCH; rules still run but
//!   nested properties, elements and entries are not visited
//! - rules run in declaration order
//! - objects validate each declared property, then flag undeclared ones as
//!   UNEXPECTED_PROPERTY warnings when strict
//! - arrays validate every element; maps validate every key and value
//!
//! Validation never fails. It returns every deviation it finds.

use crate::access::{join_path, PathAccessor, PropertyAccessor};
use crate::config::EngineConfig;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::typing::{TypeCode, TypeDescriptor, TypeMatcher};
use crate::value::Value;

use super::errors::{SchemaError, SchemaResult, ValidationError};
use super::result::{ResultCode, ValidationResult};
use super::rules::Rule;

/// Shape expected by a schema node.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// Leaf value, optionally typed
    Value(Option<TypeDescriptor>),
    /// Map or record with declared properties
    Object(Vec<PropertySchema>),
    /// Sequence whose elements share one schema
    Array(Box<Schema>),
    /// Map or record whose keys and values share one schema each
    Map { key: Box<Schema>, value: Box<Schema> },
}

/// A named property of an object schema.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    pub name: String,
    pub schema: Schema,
}

impl PropertySchema {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// A node of a schema tree.
///
/// Built once, then reused across any number of `validate` calls.
#[derive(Debug, Clone)]
pub struct Schema {
    required: bool,
    strict: bool,
    rules: Vec<Rule>,
    kind: SchemaKind,
}

impl Default for Schema {
    /// Optional, untyped leaf.
    fn default() -> Self {
        Self::with_kind(SchemaKind::Value(None))
    }
}

impl From<TypeCode> for Schema {
    fn from(code: TypeCode) -> Self {
        Self::with_kind(SchemaKind::Value(Some(TypeDescriptor::new(code))))
    }
}

impl From<TypeDescriptor> for Schema {
    fn from(descriptor: TypeDescriptor) -> Self {
        Self::with_kind(SchemaKind::Value(Some(descriptor)))
    }
}

fn rejected(err: SchemaError) -> SchemaError {
    log_event_with_fields(
        Severity::Info,
        Event::SchemaRejected,
        &[("code", err.code()), ("reason", &err.to_string())],
    );
    err
}

impl Schema {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            required: false,
            strict: true,
            rules: Vec::new(),
            kind,
        }
    }

    /// Untyped leaf.
    pub fn value() -> Self {
        Self::default()
    }

    /// Leaf typed by a descriptor such as `"int"` or `"string[]"`.
    ///
    /// # Errors
    ///
    /// `MalformedType` if the descriptor does not parse.
    pub fn typed(descriptor: &str) -> SchemaResult<Self> {
        TypeDescriptor::parse(descriptor)
            .map(Self::from)
            .map_err(rejected)
    }

    /// Object with no declared properties yet.
    pub fn object() -> Self {
        Self::with_kind(SchemaKind::Object(Vec::new()))
    }

    pub fn array(element: Schema) -> Self {
        Self::with_kind(SchemaKind::Array(Box::new(element)))
    }

    pub fn map(key: Schema, value: Schema) -> Self {
        Self::with_kind(SchemaKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// Marks the value as required: null yields VALUE_IS_NULL.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Enables or disables flagging of undeclared object properties.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declares a property. A non-object schema becomes an object schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let property = PropertySchema::new(name, schema);
        match &mut self.kind {
            SchemaKind::Object(properties) => properties.push(property),
            other => *other = SchemaKind::Object(vec![property]),
        }
        self
    }

    pub fn with_required_property(self, name: impl Into<String>, schema: Schema) -> Self {
        self.with_property(name, schema.required())
    }

    pub fn with_optional_property(self, name: impl Into<String>, schema: Schema) -> Self {
        self.with_property(name, schema.optional())
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Declared properties of an object schema.
    pub fn properties(&self) -> &[PropertySchema] {
        match &self.kind {
            SchemaKind::Object(properties) => properties,
            _ => &[],
        }
    }

    /// Validates `value` with the process-wide configuration.
    pub fn validate(&self, value: &Value) -> Vec<ValidationResult> {
        self.validate_with_config(value, EngineConfig::global())
    }

    /// Validates `value`, bounding nesting by `config.max_depth`.
    pub fn validate_with_config(&self, value: &Value, config: EngineConfig) -> Vec<ValidationResult> {
        let walk = Walk {
            config,
            paths: PathAccessor::new(config),
        };
        let mut results = Vec::new();
        self.validate_at(&walk, "", value, 0, &mut results);
        results
    }

    /// Validates and fails on any error, or on any warning when `strict`.
    ///
    /// # Errors
    ///
    /// `ValidationError` carrying the offending results.
    pub fn validate_and_throw(&self, value: &Value, strict: bool) -> Result<(), ValidationError> {
        let results = self.validate(value);
        match ValidationError::from_results(&results, strict) {
            Some(err) => {
                log_event_with_fields(
                    Severity::Info,
                    Event::ValidationFailed,
                    &[
                        ("failures", &err.results().len().to_string()),
                        ("message", err.message()),
                    ],
                );
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn validate_at(
        &self,
        walk: &Walk,
        path: &str,
        value: &Value,
        depth: usize,
        results: &mut Vec<ValidationResult>,
    ) {
        if !walk.config.allows(depth) {
            results.push(ValidationResult::error(
                path,
                ResultCode::DepthExceeded,
                format!("Nesting exceeds {} levels", walk.config.max_depth),
            ));
            return;
        }

        if value.is_null() {
            if self.required {
                results.push(ValidationResult::error(
                    path,
                    ResultCode::ValueIsNull,
                    if path.is_empty() {
                        "Value cannot be null".to_string()
                    } else {
                        format!("Value {} cannot be null", path)
                    },
                ));
            }
            return;
        }

        let kind_matches = self.check_kind(path, value, results);

        for rule in &self.rules {
            results.extend(rule.evaluate(&walk.paths, path, self, value));
        }

        if !kind_matches {
            return;
        }

        match &self.kind {
            SchemaKind::Value(_) => {}
            SchemaKind::Object(properties) => {
                for property in properties {
                    let child = walk.paths.get(value, &property.name).unwrap_or_default();
                    property.schema.validate_at(
                        walk,
                        &join_path(path, &property.name),
                        &child,
                        depth + 1,
                        results,
                    );
                }
                if self.strict {
                    for name in PropertyAccessor::names(value) {
                        if !Self::is_declared(properties, &name) {
                            let child_path = join_path(path, &name);
                            results.push(ValidationResult::warning(
                                child_path.clone(),
                                ResultCode::UnexpectedProperty,
                                format!("Unexpected property {}", child_path),
                            ));
                        }
                    }
                }
            }
            SchemaKind::Array(element) => {
                if let Value::Array(items) = value {
                    for (index, item) in items.iter().enumerate() {
                        element.validate_at(
                            walk,
                            &join_path(path, &index.to_string()),
                            item,
                            depth + 1,
                            results,
                        );
                    }
                }
            }
            SchemaKind::Map { key, value: entry } => {
                for (name, item) in PropertyAccessor::get_all(value) {
                    let child_path = join_path(path, &name);
                    key.validate_at(walk, &child_path, &Value::String(name), depth + 1, results);
                    entry.validate_at(walk, &child_path, &item, depth + 1, results);
                }
            }
        }
    }

    fn check_kind(&self, path: &str, value: &Value, results: &mut Vec<ValidationResult>) -> bool {
        let expected = match &self.kind {
            SchemaKind::Value(None) => return true,
            SchemaKind::Value(Some(descriptor)) => {
                if TypeMatcher::matches(descriptor, value) {
                    return true;
                }
                descriptor.to_string()
            }
            SchemaKind::Object(_) | SchemaKind::Map { .. } => {
                if value.is_composite() {
                    return true;
                }
                match self.kind {
                    SchemaKind::Object(_) => TypeCode::Object.to_string(),
                    _ => TypeCode::Map.to_string(),
                }
            }
            SchemaKind::Array(_) => {
                if matches!(value, Value::Array(_)) {
                    return true;
                }
                TypeCode::Array.to_string()
            }
        };

        results.push(
            ValidationResult::error(
                path,
                ResultCode::TypeMismatch,
                format!("Expected type {} but found {}", expected, value.kind_name()),
            )
            .with_expected(expected)
            .with_actual(value.kind_name()),
        );
        false
    }

    fn is_declared(properties: &[PropertySchema], name: &str) -> bool {
        properties
            .iter()
            .any(|property| property.name.split('.').next() == Some(name))
    }
}

struct Walk {
    config: EngineConfig,
    paths: PathAccessor,
}
