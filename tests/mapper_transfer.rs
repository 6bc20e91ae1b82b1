//! Mapper Transfer Tests
//!
//! Properties of structural mapping:
//! - collections change concrete type and keep their element count
//! - nested records become fresh target instances
//! - unmapped target fields keep their defaults
//! - incompatible assignments name both sides

use std::collections::{BTreeMap, HashMap, VecDeque};

use anyshape::impl_record;
use anyshape::mapper::{Mapper, MapperError};
use anyshape::value::{ToValue, Value};
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    sku: String,
    qty: i32,
}
impl_record!(Line { sku, qty });

#[derive(Debug, Clone, Default, PartialEq)]
struct Address {
    city: String,
    zip: Option<String>,
}
impl_record!(Address { city, zip });

#[derive(Debug, Clone, Default, PartialEq)]
struct Order {
    id: String,
    lines: Vec<Line>,
    tags: BTreeMap<String, String>,
    shipping: Option<Address>,
    billing: Address,
    total: f64,
}
impl_record!(Order { id, lines, tags, shipping, billing, total });

#[derive(Debug, Clone, Default, PartialEq)]
struct LineDto {
    sku: String,
    qty: i64,
}
impl_record!(LineDto { sku, qty });

#[derive(Debug, Clone, Default, PartialEq)]
struct AddressDto {
    city: String,
}
impl_record!(AddressDto { city });

#[derive(Debug, Clone, Default, PartialEq)]
struct OrderDto {
    id: String,
    lines: VecDeque<LineDto>,
    tags: HashMap<String, String>,
    shipping: Option<AddressDto>,
    billing: AddressDto,
    archived: bool,
}
impl_record!(OrderDto { id, lines, tags, shipping, billing, archived });

fn order(lines: Vec<Line>) -> Order {
    Order {
        id: "o-1".into(),
        lines,
        tags: BTreeMap::from([("channel".to_string(), "web".to_string())]),
        shipping: Some(Address {
            city: "Oslo".into(),
            zip: Some("0150".into()),
        }),
        billing: Address {
            city: "Bergen".into(),
            zip: None,
        },
        total: 12.5,
    }
}

// =============================================================================
// Collection Tests
// =============================================================================

/// An empty source collection yields an empty, non-null target collection.
#[test]
fn test_empty_collection_changes_type() {
    let dto: OrderDto = Mapper::transfer(&order(Vec::new()).to_value()).unwrap();
    assert!(dto.lines.is_empty());
    assert_eq!(dto.id, "o-1");
}

/// Elements are rebuilt as target element records.
#[test]
fn test_collection_elements_are_converted() {
    let lines = vec![
        Line { sku: "A".into(), qty: 1 },
        Line { sku: "B".into(), qty: 2 },
        Line { sku: "C".into(), qty: 3 },
    ];
    let dto: OrderDto = Mapper::transfer(&order(lines).to_value()).unwrap();
    assert_eq!(dto.lines.len(), 3);
    assert_eq!(
        dto.lines.back(),
        Some(&LineDto {
            sku: "C".into(),
            qty: 3
        })
    );
}

/// Map entries land in the target's map type.
#[test]
fn test_map_changes_type() {
    let dto: OrderDto = Mapper::transfer(&order(Vec::new()).to_value()).unwrap();
    assert_eq!(dto.tags.get("channel").map(String::as_str), Some("web"));
}

// =============================================================================
// Nested Record Tests
// =============================================================================

/// Nested records become fresh target instances.
#[test]
fn test_nested_records() {
    let dto: OrderDto = Mapper::transfer(&order(Vec::new()).to_value()).unwrap();
    assert_eq!(dto.billing.city, "Bergen");
    assert_eq!(
        dto.shipping,
        Some(AddressDto {
            city: "Oslo".into()
        })
    );
    assert!(!dto.archived);
}

/// A plain map source fills a record target.
#[test]
fn test_map_source() {
    let source = Value::from(json!({
        "id": "o-2",
        "lines": [{"sku": "Z", "qty": 9, "color": "red"}],
        "billing": {"city": "Trondheim"},
        "shipping": null
    }));
    let dto: OrderDto = Mapper::transfer(&source).unwrap();
    assert_eq!(dto.id, "o-2");
    assert_eq!(dto.lines.len(), 1);
    assert_eq!(dto.lines[0].qty, 9);
    assert_eq!(dto.billing.city, "Trondheim");
    assert_eq!(dto.shipping, None);
}

/// Narrowing inside collection elements is rejected.
#[test]
fn test_narrowing_element_is_rejected() {
    let dto = OrderDto {
        id: "o-3".into(),
        lines: VecDeque::from([LineDto {
            sku: "Q".into(),
            qty: 4,
        }]),
        ..OrderDto::default()
    };
    let err = Mapper::transfer::<Order>(&dto.to_value()).unwrap_err();
    assert!(matches!(err, MapperError::IncompatibleAssignment { .. }));
}

// =============================================================================
// Failure Tests
// =============================================================================

/// Incompatible scalars name the property and target type.
#[test]
fn test_incompatible_assignment() {
    let source = Value::from(json!({"id": 5}));
    match Mapper::transfer::<OrderDto>(&source).unwrap_err() {
        MapperError::IncompatibleAssignment {
            source_property,
            target_type,
            ..
        } => {
            assert_eq!(source_property, "id");
            assert_eq!(target_type, "OrderDto");
        }
        other => panic!("unexpected error: {other}"),
    }
}
