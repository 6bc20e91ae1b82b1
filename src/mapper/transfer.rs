//! Structural transfer between value shapes
//!
//! Properties are matched by exact name. For each match:
//! - null sources are skipped and the target keeps its default
//! - scalars are assigned directly
//! - composites landing on a record field become a fresh instance of that
//!   record, filled recursively
//! - composites landing anywhere else are rebuilt as plain maps and left to
//!   the field's `FromValue` to convert
//! - sequences append to the target's existing collection
//! - maps insert their entries into the target's existing map
//!
//! Nothing is shared between source and target.

use crate::access::PropertyAccessor;
use crate::config::EngineConfig;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::value::{FieldError, FieldResult, Record, Value, ValueMap};

use super::errors::{MapperError, MapperResult};

/// Copies same-named properties from one shape to another.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    config: EngineConfig,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(EngineConfig::global())
    }
}

impl Mapper {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Builds a default `T` and fills it from `source`.
    ///
    /// # Errors
    ///
    /// `IncompatibleAssignment` if a matched property cannot be stored in
    /// the target field, `DepthExceeded` if the source nests too deeply.
    pub fn transfer<T: Record + Default>(source: &Value) -> MapperResult<T> {
        Self::default().map(source)
    }

    /// Fills an existing record from `source`.
    pub fn transfer_into(source: &Value, target: &mut dyn Record) -> MapperResult<()> {
        Self::default().map_into(source, target)
    }

    /// Fills a record or map value from `source`. Map targets accept every
    /// source property.
    pub fn transfer_value(source: &Value, target: &mut Value) -> MapperResult<()> {
        Self::default().map_value(source, target)
    }

    /// Like [`Mapper::transfer`] with this mapper's configuration.
    pub fn map<T: Record + Default>(&self, source: &Value) -> MapperResult<T> {
        let mut target = T::default();
        self.map_record(source, &mut target, 0)?;
        Ok(target)
    }

    /// Like [`Mapper::transfer_into`] with this mapper's configuration.
    pub fn map_into(&self, source: &Value, target: &mut dyn Record) -> MapperResult<()> {
        self.map_record(source, target, 0)
    }

    /// Like [`Mapper::transfer_value`] with this mapper's configuration.
    pub fn map_value(&self, source: &Value, target: &mut Value) -> MapperResult<()> {
        match target {
            Value::Record(record) => self.map_record(source, record.as_mut(), 0),
            Value::Map(map) => self.map_entries(source, map, 0),
            _ => Ok(()),
        }
    }

    fn check_depth(&self, depth: usize) -> MapperResult<()> {
        if self.config.allows(depth) {
            Ok(())
        } else {
            Err(MapperError::DepthExceeded(self.config.max_depth))
        }
    }

    fn map_record(&self, source: &Value, target: &mut dyn Record, depth: usize) -> MapperResult<()> {
        self.check_depth(depth)?;

        for name in target.field_names() {
            let Some(property) = PropertyAccessor::lookup(source, &name) else {
                continue;
            };
            if property.is_null() {
                continue;
            }
            let current = target.get_field(&name).unwrap_or_default();
            let value = self.convert(&property, current, depth + 1)?;

            if let Err(err) = target.set_field(&name, value) {
                log_event_with_fields(
                    Severity::Warn,
                    Event::MapperAssignmentFailed,
                    &[
                        ("property", &name),
                        ("target", target.type_name()),
                        ("reason", &err.to_string()),
                    ],
                );
                return Err(MapperError::incompatible(name, target.type_name(), &err));
            }
        }
        Ok(())
    }

    fn map_entries(&self, source: &Value, target: &mut ValueMap, depth: usize) -> MapperResult<()> {
        self.check_depth(depth)?;

        for (name, property) in PropertyAccessor::get_all(source) {
            if property.is_null() {
                continue;
            }
            let current = target.remove(&name).unwrap_or_default();
            let value = self.convert(&property, current, depth + 1)?;
            target.insert(name, value);
        }
        Ok(())
    }

    /// Produces the value to store where `current` sits now.
    fn convert(&self, source: &Value, current: Value, depth: usize) -> MapperResult<Value> {
        match (source, current) {
            (Value::Map(_) | Value::Record(_), Value::Record(existing)) => {
                let mut instance = existing.new_instance();
                self.map_record(source, instance.as_mut(), depth)?;
                Ok(Value::Record(instance))
            }
            (Value::Map(_) | Value::Record(_), Value::Map(mut existing)) => {
                self.map_entries(source, &mut existing, depth)?;
                Ok(Value::Map(existing))
            }
            (Value::Array(items), Value::Array(mut existing)) => {
                self.check_depth(depth)?;
                for item in items {
                    existing.push(self.detach(item, depth + 1)?);
                }
                Ok(Value::Array(existing))
            }
            (source, _) => self.detach(source, depth),
        }
    }

    /// Deep copy with records flattened into plain maps.
    fn detach(&self, value: &Value, depth: usize) -> MapperResult<Value> {
        match value {
            Value::Array(items) => {
                self.check_depth(depth)?;
                items
                    .iter()
                    .map(|item| self.detach(item, depth + 1))
                    .collect::<MapperResult<Vec<_>>>()
                    .map(Value::Array)
            }
            Value::Map(_) | Value::Record(_) => {
                self.check_depth(depth)?;
                PropertyAccessor::get_all(value)
                    .into_iter()
                    .map(|(name, item)| Ok((name, self.detach(&item, depth + 1)?)))
                    .collect::<MapperResult<ValueMap>>()
                    .map(Value::Map)
            }
            scalar => Ok(scalar.clone()),
        }
    }
}

/// Converts a value into a record type.
///
/// A record of type `T` is taken as is; any other map or record is
/// transferred into a default `T`.
pub fn record_from_value<T: Record + Default>(value: Value) -> FieldResult<T> {
    match value {
        Value::Record(record) if record.is::<T>() => record
            .into_any()
            .downcast::<T>()
            .map(|record| *record)
            .map_err(|_| FieldError::incompatible(std::any::type_name::<T>(), "object")),
        Value::Map(_) | Value::Record(_) => Mapper::transfer::<T>(&value)
            .map_err(|err| FieldError::incompatible(std::any::type_name::<T>(), err.to_string())),
        other => Err(FieldError::incompatible(
            std::any::type_name::<T>(),
            other.kind_name(),
        )),
    }
}
