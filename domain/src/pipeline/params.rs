//! Flat parameter view of a serialized pipeline state.
//!
//! Parameter stores only accept scalar string values, so nested values are
//! flattened with `_`-joined keys:
//!
//! | Value | Keys |
//! |-------|------|
//! | scalar | `key` |
//! | mapping | `key_subkey` |
//! | list of mappings | `key_i_subkey` |
//! | anything else | `key` (JSON text) |
//!
//! Null values and empty lists produce no entries.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flatten the top-level fields of a JSON object into string parameters.
///
/// Non-object values yield an empty map.
pub fn flatten_params(value: &Value) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    let Value::Object(fields) = value else {
        return params;
    };

    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (subkey, subval) in map {
                    params.insert(format!("{key}_{subkey}"), scalar_text(subval));
                }
            }
            Value::Array(items) if items.iter().all(Value::is_object) => {
                for (i, item) in items.iter().enumerate() {
                    if let Value::Object(map) = item {
                        for (subkey, subval) in map {
                            params.insert(format!("{key}_{i}_{subkey}"), scalar_text(subval));
                        }
                    }
                }
            }
            other => {
                params.insert(key.clone(), scalar_text(other));
            }
        }
    }

    params
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
