//! Type-only skeletons for structural comparison

use crate::value::ValueKind;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Marker rendered for an empty sequence
pub const EMPTY_LIST_MARKER: &str = "<empty_list>";

/// Skeleton of a tree: leaf kinds, sorted keys, and one representative per
/// sequence.
///
/// Equality compares kinds, key sets and empty/non-empty status. The element
/// count kept on [`Shape::Sequence`] is for display only.
#[derive(Debug, Clone)]
pub enum Shape {
    Leaf(ValueKind),
    Mapping(BTreeMap<String, Shape>),
    Sequence { first: Box<Shape>, len: usize },
    EmptySequence,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::Leaf(a), Shape::Leaf(b)) => a == b,
            (Shape::Mapping(a), Shape::Mapping(b)) => a == b,
            (Shape::Sequence { first: a, .. }, Shape::Sequence { first: b, .. }) => a == b,
            (Shape::EmptySequence, Shape::EmptySequence) => true,
            _ => false,
        }
    }
}

impl Eq for Shape {}

impl Shape {
    /// Render the skeleton as a JSON tree, e.g. `{"a": "integer", "b": ["text", "...(3 items)"]}`
    pub fn to_value(&self) -> Value {
        match self {
            Shape::Leaf(kind) => Value::String(kind.as_str().to_string()),
            Shape::Mapping(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, shape)| (key.clone(), shape.to_value()))
                    .collect::<Map<_, _>>(),
            ),
            Shape::Sequence { first, len } => {
                json!([first.to_value(), format!("...({} items)", len)])
            }
            Shape::EmptySequence => json!([EMPTY_LIST_MARKER]),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Collapse a tree to its [`Shape`]
pub fn structural_shape(value: &Value) -> Shape {
    match value {
        Value::Object(map) => Shape::Mapping(
            map.iter()
                .map(|(key, child)| (key.clone(), structural_shape(child)))
                .collect(),
        ),
        Value::Array(items) => match items.first() {
            Some(first) => Shape::Sequence {
                first: Box::new(structural_shape(first)),
                len: items.len(),
            },
            None => Shape::EmptySequence,
        },
        scalar => Shape::Leaf(ValueKind::of(scalar)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        let tree = json!({"a": [1, 2], "b": {"c": null}, "d": []});
        assert_eq!(structural_shape(&tree), structural_shape(&tree));
    }

    #[test]
    fn test_value_insensitive_kind_sensitive() {
        assert_eq!(
            structural_shape(&json!({"a": 1})),
            structural_shape(&json!({"a": 2}))
        );
        assert_ne!(
            structural_shape(&json!({"a": 1})),
            structural_shape(&json!({"a": "1"}))
        );
        assert_ne!(
            structural_shape(&json!({"a": 1})),
            structural_shape(&json!({"a": 1.0}))
        );
    }

    #[test]
    fn test_key_sets_matter() {
        assert_ne!(
            structural_shape(&json!({"a": 1})),
            structural_shape(&json!({"a": 1, "b": 1}))
        );
        assert_ne!(
            structural_shape(&json!({"a": 1})),
            structural_shape(&json!({"b": 1}))
        );
    }

    #[test]
    fn test_sequence_length_ignored_emptiness_not() {
        assert_eq!(
            structural_shape(&json!([1, 2, 3])),
            structural_shape(&json!([9]))
        );
        assert_ne!(structural_shape(&json!([1])), structural_shape(&json!([])));
        assert_eq!(structural_shape(&json!([])), structural_shape(&json!([])));
    }

    #[test]
    fn test_only_first_element_counts() {
        assert_eq!(
            structural_shape(&json!([1, "x"])),
            structural_shape(&json!([2, {"y": 1}]))
        );
        assert_ne!(
            structural_shape(&json!(["x", 1])),
            structural_shape(&json!([1, "x"]))
        );
    }

    #[test]
    fn test_render() {
        let shape = structural_shape(&json!({"b": [{"x": true}, {"x": false}], "a": [], "c": "s"}));
        assert_eq!(
            shape.to_value(),
            json!({
                "a": ["<empty_list>"],
                "b": [{"x": "boolean"}, "...(2 items)"],
                "c": "text"
            })
        );
    }

    #[test]
    fn test_empty_marker_differs_from_text_sequence() {
        // A one-element text list renders close to the empty marker but is a different shape
        assert_ne!(
            structural_shape(&json!(["<empty_list>"])),
            structural_shape(&json!([]))
        );
    }
}
