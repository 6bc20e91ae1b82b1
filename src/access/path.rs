//! Dot-path traversal over nested values
//!
//! A path such as `orders.0.lines.2.sku` is split on `.`; each segment is
//! resolved with [`PropertyAccessor`]. Reads stop at the first missing
//! segment. Writes auto-vivify: a missing or non-container intermediate is
//! replaced by an empty map before descending. Writes past the end of a
//! sequence grow it by at most `max_sequence_growth` nulls.
//!
//! Paths with more segments than `max_depth` neither resolve nor write.

use std::borrow::Cow;
use std::fmt;

use super::property::{sequence_slot, Properties, PropertyAccessor};
use crate::config::EngineConfig;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::value::{Value, ValueMap};

/// A parsed dot-delimited path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Splits on `.`. The empty string is the empty path.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: text.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Joins a parent path and a property name with `.`.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Recursive property access by dot-path.
#[derive(Debug, Clone, Copy)]
pub struct PathAccessor {
    config: EngineConfig,
}

impl Default for PathAccessor {
    fn default() -> Self {
        Self::new(EngineConfig::global())
    }
}

impl PathAccessor {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn resolve<'a>(root: &'a Value, segments: &[String]) -> Option<Cow<'a, Value>> {
        let mut current = Cow::Borrowed(root);
        for segment in segments {
            current = match current {
                Cow::Borrowed(value) => PropertyAccessor::lookup(value, segment)?,
                Cow::Owned(value) => {
                    Cow::Owned(PropertyAccessor::lookup(&value, segment)?.into_owned())
                }
            };
        }
        Some(current)
    }

    fn within_depth(&self, path: &Path) -> bool {
        if self.config.allows(path.len()) {
            return true;
        }
        log_event_with_fields(
            Severity::Warn,
            Event::DepthLimitReached,
            &[
                ("path", &path.to_string()),
                ("limit", &self.config.max_depth.to_string()),
            ],
        );
        false
    }

    /// Returns true if every segment resolves. A leaf holding null counts
    /// as present. The empty path is never present.
    pub fn has(&self, root: &Value, path: &str) -> bool {
        let path = Path::parse(path);
        let Some((last, parents)) = path.segments().split_last() else {
            return false;
        };
        if !self.within_depth(&path) {
            return false;
        }
        match Self::resolve(root, parents) {
            Some(parent) => PropertyAccessor::has(&parent, last),
            None => false,
        }
    }

    /// Reads the value at `path`. `None` if any segment is missing or the
    /// path is empty.
    pub fn get(&self, root: &Value, path: &str) -> Option<Value> {
        let path = Path::parse(path);
        if path.is_empty() || !self.within_depth(&path) {
            return None;
        }
        Self::resolve(root, path.segments()).map(Cow::into_owned)
    }

    fn visit_leaves<F>(&self, value: &Value, prefix: &str, depth: usize, visit: &mut F)
    where
        F: FnMut(String, &Value),
    {
        for name in PropertyAccessor::names(value) {
            let Some(child) = PropertyAccessor::lookup(value, &name) else {
                continue;
            };
            let path = join_path(prefix, &name);
            if !child.is_container() {
                visit(path, &*child);
            } else if self.config.allows(depth + 1) {
                self.visit_leaves(&child, &path, depth + 1, visit);
            } else {
                log_event_with_fields(
                    Severity::Warn,
                    Event::DepthLimitReached,
                    &[
                        ("path", &path),
                        ("limit", &self.config.max_depth.to_string()),
                    ],
                );
                visit(path, &*child);
            }
        }
    }

    /// Every leaf path, depth first, sequences by ascending index.
    ///
    /// Empty containers contribute no paths. Containers at the depth limit
    /// are reported as leaves.
    pub fn names(&self, root: &Value) -> Vec<String> {
        let mut names = Vec::new();
        self.visit_leaves(root, "", 1, &mut |path, _| names.push(path));
        names
    }

    /// Leaf path → leaf value, consistent with [`PathAccessor::names`].
    pub fn get_all(&self, root: &Value) -> ValueMap {
        let mut leaves = ValueMap::new();
        self.visit_leaves(root, "", 1, &mut |path, value| {
            leaves.insert(path, value.clone());
        });
        leaves
    }

    /// Writes `value` at `path`, creating intermediate maps as needed.
    /// Returns false if nothing was written: empty path, null or scalar
    /// root, unknown record field, path beyond the depth limit, or an
    /// index past the sequence growth limit.
    pub fn set(&self, root: &mut Value, path: &str, value: Value) -> bool {
        let path = Path::parse(path);
        if path.is_empty() || !self.within_depth(&path) {
            return false;
        }
        self.set_segments(root, path.segments(), value)
    }

    fn vivify(slot: &mut Value) {
        if !slot.is_container() {
            *slot = Value::empty_map();
        }
    }

    fn set_segments(&self, target: &mut Value, segments: &[String], value: Value) -> bool {
        let Some((first, rest)) = segments.split_first() else {
            return false;
        };

        match target {
            Value::Array(items) => {
                let Some(child) = sequence_slot(items, first, &self.config) else {
                    return false;
                };
                if rest.is_empty() {
                    *child = value;
                    return true;
                }
                Self::vivify(child);
                self.set_segments(child, rest, value)
            }
            _ if rest.is_empty() => PropertyAccessor::set(target, first, value),
            Value::Map(map) => {
                let child = map.entry(first.clone()).or_insert(Value::Null);
                Self::vivify(child);
                self.set_segments(child, rest, value)
            }
            Value::Record(record) => {
                if !record.has_field(first) {
                    return false;
                }
                // Records hand out copies: modify, then write back
                let mut child = record.get_field(first).unwrap_or_default();
                Self::vivify(&mut child);
                self.set_segments(&mut child, rest, value) && record.set_property(first, child)
            }
            _ => false,
        }
    }

    /// Applies [`PathAccessor::set`] for every entry, in map order.
    pub fn set_all(&self, root: &mut Value, values: &ValueMap) {
        for (path, value) in values {
            self.set(root, path, value.clone());
        }
    }

    /// Deep-merges `src` into `dest`: every leaf of `src` overwrites the
    /// same path in `dest`.
    pub fn copy(&self, dest: &mut Value, src: &Value) {
        for (path, value) in self.get_all(src) {
            self.set(dest, &path, value);
        }
    }
}

impl Value {
    /// Reads a dot-path. See [`PathAccessor::get`].
    pub fn get_path(&self, path: &str) -> Option<Value> {
        PathAccessor::default().get(self, path)
    }

    /// Returns true if a dot-path resolves. See [`PathAccessor::has`].
    pub fn has_path(&self, path: &str) -> bool {
        PathAccessor::default().has(self, path)
    }

    /// Writes a dot-path. See [`PathAccessor::set`].
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> bool {
        PathAccessor::default().set(self, path, value.into())
    }

    /// Every leaf path. See [`PathAccessor::names`].
    pub fn leaf_paths(&self) -> Vec<String> {
        PathAccessor::default().names(self)
    }
}
