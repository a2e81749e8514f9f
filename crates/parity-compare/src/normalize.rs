//! Key normalization between field vocabularies

use crate::mapping::{Direction, FieldMappingTable};
use serde_json::{Map, Value};

/// Rewrite every mapping key found in `table`, at any depth.
///
/// Keys the table does not know pass through unchanged. If two keys of one
/// mapping translate to the same name, the later one in iteration order wins.
pub fn normalize_keys(value: &Value, table: &FieldMappingTable, direction: Direction) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let key = table
                    .translate(key, direction)
                    .map(str::to_string)
                    .unwrap_or_else(|| key.clone());
                out.insert(key, normalize_keys(child, table, direction));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize_keys(item, table, direction))
                .collect(),
        ),
        _ => value.clone(),
    }
}
