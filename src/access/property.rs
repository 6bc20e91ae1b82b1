//! Single-level property access over maps, sequences and records
//!
//! One capability, three adapters:
//! - `ValueMap`: string keys; writes insert or overwrite
//! - `Vec<Value>`: base-10 indices; writes past the end grow with nulls,
//!   bounded by `EngineConfig::max_sequence_growth`
//! - `Box<dyn Record>`: field names; writes to unknown fields are no-ops
//!
//! `PropertyAccessor` picks the adapter from the runtime category. Null and
//! scalar targets make every operation a no-op. Names match exactly.

use std::borrow::Cow;

use crate::config::EngineConfig;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::value::{Record, Value, ValueMap};

/// Named property access on one container shape.
pub trait Properties {
    /// Reads a property. `None` if absent.
    fn property(&self, name: &str) -> Option<Cow<'_, Value>>;

    /// Mutable access for shapes that store `Value`s in place.
    fn property_mut(&mut self, name: &str) -> Option<&mut Value>;

    /// Writes a property. Returns false if the write did not happen.
    fn set_property(&mut self, name: &str, value: Value) -> bool;

    /// Returns true if the property exists, even when it holds null.
    fn has_property(&self, name: &str) -> bool;

    fn property_names(&self) -> Vec<String>;
}

/// Parses a sequence index: ASCII digits only, base 10.
pub fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Slot for writing `name` into a sequence, growing it with nulls if the
/// index is past the end. `None` if `name` is not an index or the growth
/// exceeds `config.max_sequence_growth`; the sequence is then untouched.
pub(crate) fn sequence_slot<'a>(
    items: &'a mut Vec<Value>,
    name: &str,
    config: &EngineConfig,
) -> Option<&'a mut Value> {
    let index = parse_index(name)?;
    if !config.allows_index(items.len(), index) {
        log_event_with_fields(
            Severity::Warn,
            Event::SequenceGrowthRefused,
            &[
                ("index", name),
                ("len", &items.len().to_string()),
                ("limit", &config.max_sequence_growth.to_string()),
            ],
        );
        return None;
    }
    if index >= items.len() {
        items.resize(index + 1, Value::Null);
    }
    items.get_mut(index)
}

impl Properties for ValueMap {
    fn property(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }

    fn property_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.get_mut(name)
    }

    fn set_property(&mut self, name: &str, value: Value) -> bool {
        self.insert(name.to_string(), value);
        true
    }

    fn has_property(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn property_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl Properties for Vec<Value> {
    fn property(&self, name: &str) -> Option<Cow<'_, Value>> {
        parse_index(name)
            .and_then(|index| self.get(index))
            .map(Cow::Borrowed)
    }

    fn property_mut(&mut self, name: &str) -> Option<&mut Value> {
        let index = parse_index(name)?;
        self.get_mut(index)
    }

    fn set_property(&mut self, name: &str, value: Value) -> bool {
        match sequence_slot(self, name, &EngineConfig::global()) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn has_property(&self, name: &str) -> bool {
        parse_index(name).map(|index| index < self.len()).unwrap_or(false)
    }

    fn property_names(&self) -> Vec<String> {
        (0..self.len()).map(|index| index.to_string()).collect()
    }
}

impl Properties for Box<dyn Record> {
    fn property(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get_field(name).map(Cow::Owned)
    }

    fn property_mut(&mut self, _name: &str) -> Option<&mut Value> {
        None
    }

    fn set_property(&mut self, name: &str, value: Value) -> bool {
        match self.set_field(name, value) {
            Ok(()) => true,
            Err(err) => {
                if Logger::enabled(Severity::Trace) {
                    log_event_with_fields(
                        Severity::Trace,
                        Event::PropertySetSkipped,
                        &[
                            ("record", self.type_name()),
                            ("property", name),
                            ("reason", &err.to_string()),
                        ],
                    );
                }
                false
            }
        }
    }

    fn has_property(&self, name: &str) -> bool {
        self.has_field(name)
    }

    fn property_names(&self) -> Vec<String> {
        self.field_names()
    }
}

/// Dispatches property access by runtime category.
pub struct PropertyAccessor;

impl PropertyAccessor {
    fn adapter(value: &Value) -> Option<&dyn Properties> {
        match value {
            Value::Map(map) => Some(map),
            Value::Array(items) => Some(items),
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    fn adapter_mut(value: &mut Value) -> Option<&mut dyn Properties> {
        match value {
            Value::Map(map) => Some(map),
            Value::Array(items) => Some(items),
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Reads a property, borrowing when the container stores it in place.
    pub fn lookup<'a>(value: &'a Value, name: &str) -> Option<Cow<'a, Value>> {
        Self::adapter(value)?.property(name)
    }

    /// Reads a property. `None` if absent or the target is not a container.
    pub fn get(value: &Value, name: &str) -> Option<Value> {
        Self::lookup(value, name).map(Cow::into_owned)
    }

    /// In-place mutable access to a map entry or sequence element.
    pub fn get_mut<'a>(value: &'a mut Value, name: &str) -> Option<&'a mut Value> {
        Self::adapter_mut(value)?.property_mut(name)
    }

    /// Returns true if the property exists, even when it holds null.
    pub fn has(value: &Value, name: &str) -> bool {
        Self::adapter(value)
            .map(|adapter| adapter.has_property(name))
            .unwrap_or(false)
    }

    /// Writes a property. Returns false if nothing was written.
    pub fn set(value: &mut Value, name: &str, new_value: Value) -> bool {
        Self::adapter_mut(value)
            .map(|adapter| adapter.set_property(name, new_value))
            .unwrap_or(false)
    }

    /// Property names: record fields, map keys, or "0".."n-1".
    pub fn names(value: &Value) -> Vec<String> {
        Self::adapter(value)
            .map(|adapter| adapter.property_names())
            .unwrap_or_default()
    }

    /// All properties of one level.
    pub fn get_all(value: &Value) -> ValueMap {
        let Some(adapter) = Self::adapter(value) else {
            return ValueMap::new();
        };
        adapter
            .property_names()
            .into_iter()
            .filter_map(|name| {
                let property = adapter.property(&name)?.into_owned();
                Some((name, property))
            })
            .collect()
    }

    /// Writes every entry, skipping those the target rejects.
    pub fn set_all(value: &mut Value, properties: &ValueMap) {
        if let Some(adapter) = Self::adapter_mut(value) {
            for (name, property) in properties {
                adapter.set_property(name, property.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldRecord;
    use serde_json::json;

    fn record() -> Value {
        Value::record(FieldRecord::new(
            "Person",
            [("name", Value::from("Ann")), ("age", Value::Null)],
        ))
    }

    #[test]
    fn test_map_access() {
        let mut value = Value::from(json!({"a": 1}));
        assert_eq!(PropertyAccessor::get(&value, "a"), Some(Value::from(1)));
        assert_eq!(PropertyAccessor::get(&value, "A"), None);

        assert!(PropertyAccessor::set(&mut value, "b", Value::from("x")));
        assert_eq!(PropertyAccessor::names(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_sequence_access() {
        let mut value = Value::from(json!([10, 20]));
        assert_eq!(PropertyAccessor::get(&value, "1"), Some(Value::from(20)));
        assert_eq!(PropertyAccessor::get(&value, "2"), None);
        assert_eq!(PropertyAccessor::get(&value, "-1"), None);
        assert_eq!(PropertyAccessor::get(&value, "+1"), None);
        assert_eq!(PropertyAccessor::get(&value, "x"), None);

        assert!(PropertyAccessor::set(&mut value, "4", Value::from(50)));
        assert_eq!(value, Value::from(json!([10, 20, null, null, 50])));
        assert!(!PropertyAccessor::set(&mut value, "x", Value::from(1)));
        assert_eq!(PropertyAccessor::names(&value), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_sequence_write_out_of_range_index() {
        let mut value = Value::from(json!([]));
        assert!(!PropertyAccessor::set(&mut value, "18446744073709551615", Value::from(1)));
        assert!(!PropertyAccessor::set(&mut value, "99999999999999999999", Value::from(1)));
        assert!(!PropertyAccessor::set(&mut value, "4000000000", Value::from(1)));
        assert_eq!(value, Value::from(json!([])));
    }

    #[test]
    fn test_sequence_slot_growth_limit() {
        let config = EngineConfig::default().with_sequence_growth(2);
        let mut items = vec![Value::from(1)];

        assert!(sequence_slot(&mut items, "3", &config).is_none());
        assert_eq!(items.len(), 1);

        if let Some(slot) = sequence_slot(&mut items, "2", &config) {
            *slot = Value::from(3);
        }
        assert_eq!(items, vec![Value::from(1), Value::Null, Value::from(3)]);
        assert!(sequence_slot(&mut items, "0", &config).is_some());
        assert!(sequence_slot(&mut items, "x", &config).is_none());
    }

    #[test]
    fn test_record_access() {
        let mut value = record();
        assert_eq!(PropertyAccessor::get(&value, "name"), Some(Value::from("Ann")));
        assert!(PropertyAccessor::set(&mut value, "age", Value::from(30)));
        assert_eq!(PropertyAccessor::get(&value, "age"), Some(Value::from(30)));

        // Shape is fixed
        assert!(!PropertyAccessor::set(&mut value, "email", Value::from("a@b")));
        assert_eq!(PropertyAccessor::names(&value), vec!["name", "age"]);
    }

    #[test]
    fn test_has_distinguishes_null_from_absent() {
        let value = Value::from(json!({"a": null}));
        assert!(PropertyAccessor::has(&value, "a"));
        assert!(!PropertyAccessor::has(&value, "b"));
        assert!(PropertyAccessor::has(&record(), "age"));
    }

    #[test]
    fn test_null_and_scalar_targets_are_noops() {
        let mut null = Value::Null;
        assert_eq!(PropertyAccessor::get(&null, "a"), None);
        assert!(!PropertyAccessor::set(&mut null, "a", Value::from(1)));
        assert!(PropertyAccessor::names(&null).is_empty());
        assert_eq!(null, Value::Null);

        let mut scalar = Value::from(5);
        assert!(!PropertyAccessor::set(&mut scalar, "a", Value::from(1)));
        assert!(PropertyAccessor::get_all(&scalar).is_empty());
    }

    #[test]
    fn test_get_all_and_set_all() {
        let mut value = record();
        let all = PropertyAccessor::get_all(&value);
        assert_eq!(all.len(), 2);
        assert_eq!(all["name"], Value::from("Ann"));

        let mut updates = ValueMap::new();
        updates.insert("name".into(), Value::from("Bob"));
        updates.insert("unknown".into(), Value::from(1));
        PropertyAccessor::set_all(&mut value, &updates);

        assert_eq!(PropertyAccessor::get(&value, "name"), Some(Value::from("Bob")));
        assert_eq!(PropertyAccessor::names(&value).len(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut value = Value::from(json!({"a": [1]}));
        if let Some(inner) = PropertyAccessor::get_mut(&mut value, "a") {
            PropertyAccessor::set(inner, "0", Value::from(2));
        }
        assert_eq!(value, Value::from(json!({"a": [2]})));
        assert!(PropertyAccessor::get_mut(&mut record(), "name").is_none());
    }
}
