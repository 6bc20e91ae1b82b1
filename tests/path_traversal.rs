//! Path Traversal Tests
//!
//! Properties of dot-path access:
//! - set then get on map paths returns the written value
//! - names and get_all agree on every leaf
//! - writes auto-vivify missing or scalar intermediates
//! - a present-but-null leaf is reported by has

use anyshape::access::PathAccessor;
use anyshape::config::EngineConfig;
use anyshape::value::{FieldRecord, Value};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn accessor() -> PathAccessor {
    PathAccessor::new(EngineConfig::default())
}

fn sample() -> Value {
    Value::from(json!({
        "value1": 123,
        "value2": {"value21": "ABC", "value22": null},
        "value3": [444, {"value311": 555}]
    }))
}

// =============================================================================
// Set / Get Tests
// =============================================================================

/// Writing a map path and reading it back yields the written value.
#[test]
fn test_set_then_get_roundtrip() {
    let paths = accessor();
    let values = [
        Value::from(1),
        Value::from("text"),
        Value::from(json!({"nested": [1, 2]})),
        Value::from(false),
    ];
    for (i, value) in values.into_iter().enumerate() {
        let mut root = sample();
        let path = format!("value2.fresh{}.leaf", i);
        assert!(paths.set(&mut root, &path, value.clone()));
        assert_eq!(paths.get(&root, &path), Some(value));
    }
}

/// Writing into a sequence element adds to the existing map there.
#[test]
fn test_vivification_inside_sequence() {
    let paths = accessor();
    let mut root = sample();

    assert!(paths.set(&mut root, "value3.1.value312", Value::from("CCC")));
    assert_eq!(
        paths.get(&root, "value3.1"),
        Some(Value::from(json!({"value311": 555, "value312": "CCC"})))
    );

    let names = paths.names(&root);
    for expected in ["value3.0", "value3.1.value311", "value3.1.value312"] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
}

/// A scalar in the way is replaced by a map.
#[test]
fn test_scalar_intermediate_is_overwritten() {
    let paths = accessor();
    let mut root = sample();
    assert!(paths.set(&mut root, "value1.inner", Value::from(1)));
    assert_eq!(paths.get(&root, "value1"), Some(Value::from(json!({"inner": 1}))));
}

/// Reads never fail; they return None.
#[test]
fn test_missing_paths_read_as_none() {
    let paths = accessor();
    let root = sample();
    assert_eq!(paths.get(&root, "value3.9"), None);
    assert_eq!(paths.get(&root, "value3.-1"), None);
    assert_eq!(paths.get(&root, "value1.x"), None);
    assert_eq!(paths.get(&root, "nope.x.y"), None);
    assert_eq!(paths.get(&Value::Null, "a"), None);
}

// =============================================================================
// Enumeration Tests
// =============================================================================

/// Every leaf name maps to the value get returns for it.
#[test]
fn test_names_consistent_with_get_all() {
    let paths = accessor();
    let root = sample();
    let names = paths.names(&root);
    let all = paths.get_all(&root);

    assert_eq!(names.len(), all.len());
    for name in &names {
        assert_eq!(paths.get(&root, name).as_ref(), all.get(name), "{}", name);
    }
    assert_eq!(
        names,
        vec!["value1", "value2.value21", "value2.value22", "value3.0", "value3.1.value311"]
    );
}

/// Records enumerate their fields in declaration order.
#[test]
fn test_names_through_records() {
    let root = Value::record(FieldRecord::new(
        "Outer",
        [
            ("z", Value::from(1)),
            ("a", Value::from(json!({"k": [true]}))),
        ],
    ));
    assert_eq!(accessor().names(&root), vec!["z", "a.k.0"]);
}

// =============================================================================
// Presence Tests
// =============================================================================

/// A leaf holding null is present; a missing leaf is not.
#[test]
fn test_has_treats_null_leaf_as_present() {
    let paths = accessor();
    let root = sample();
    assert!(paths.has(&root, "value2.value22"));
    assert!(!paths.has(&root, "value2.value23"));
    assert!(!paths.has(&root, "value2.value22.deeper"));
    assert!(paths.has(&root, "value3.1.value311"));
    assert!(!paths.has(&root, ""));
}

// =============================================================================
// Merge Tests
// =============================================================================

/// copy overwrites leaves and keeps everything else.
#[test]
fn test_copy_deep_merges() {
    let paths = accessor();
    let mut dest = sample();
    let src = Value::from(json!({"value2": {"value21": "XYZ"}, "value4": [1]}));
    paths.copy(&mut dest, &src);

    assert_eq!(paths.get(&dest, "value2.value21"), Some(Value::from("XYZ")));
    assert!(paths.has(&dest, "value2.value22"));
    assert_eq!(paths.get(&dest, "value4"), Some(Value::from(json!({"0": 1}))));
    assert_eq!(paths.get(&dest, "value1"), Some(Value::from(123)));
}

/// Null and scalar roots are never written.
#[test]
fn test_unwritable_roots() {
    let paths = accessor();
    let mut null = Value::Null;
    let mut scalar = Value::from(3);
    assert!(!paths.set(&mut null, "a", Value::from(1)));
    assert!(!paths.set(&mut scalar, "a", Value::from(1)));
    assert_eq!(null, Value::Null);
    assert_eq!(scalar, Value::from(3));
}

/// Huge or overflowing indices leave the sequence untouched.
#[test]
fn test_out_of_range_index_not_written() {
    let paths = PathAccessor::new(EngineConfig::default().with_sequence_growth(16));
    let mut root = sample();

    assert!(!paths.set(&mut root, "value3.18446744073709551615", Value::from(1)));
    assert!(!paths.set(&mut root, "value3.4000000000.x", Value::from(1)));
    assert!(!paths.set(&mut root, "value3.18", Value::from(1)));
    assert_eq!(root, sample());

    assert!(paths.set(&mut root, "value3.17", Value::from(1)));
    assert_eq!(paths.get(&root, "value3.17"), Some(Value::from(1)));
    assert_eq!(paths.get(&root, "value3.16"), Some(Value::Null));
}
