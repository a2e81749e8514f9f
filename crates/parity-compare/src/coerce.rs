//! Type coercion for stringly-typed responses
//!
//! The legacy service serializes most fields as text; this restores native
//! numbers and booleans so both sides compare at the type level.

use crate::value::Scalar;
use serde_json::Value;

/// Reinterpret every text leaf through [`Scalar::parse`]. Idempotent.
pub fn coerce_types(value: &Value) -> Value {
    match value {
        Value::String(text) => Scalar::parse(text).into(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), coerce_types(child)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(coerce_types).collect()),
        _ => value.clone(),
    }
}
