//! Conversion between JSON variables and CEL values
//!
//! Integers stay integers where they fit, object keys become CEL string
//! keys, and CEL-only kinds (bytes, timestamps, durations) come back as
//! strings.

use base64::Engine as _;
use cel_interpreter::objects::{Key, Map, Value as CelValue};
use serde_json::{Number, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;

/// JSON variable value as seen by a CEL program
pub fn json_to_cel(value: &JsonValue) -> CelValue {
    match value {
        JsonValue::Null => CelValue::Null,
        JsonValue::Bool(b) => CelValue::Bool(*b),
        JsonValue::Number(n) => number_to_cel(n),
        JsonValue::String(s) => CelValue::String(Arc::new(s.clone())),
        JsonValue::Array(items) => CelValue::List(Arc::new(items.iter().map(json_to_cel).collect())),
        JsonValue::Object(fields) => {
            let entries: HashMap<Key, CelValue> = fields
                .iter()
                .map(|(name, field)| (Key::from(name.clone()), json_to_cel(field)))
                .collect();
            CelValue::Map(Map { map: Arc::new(entries) })
        }
    }
}

fn number_to_cel(n: &Number) -> CelValue {
    n.as_i64()
        .map(CelValue::Int)
        .or_else(|| n.as_u64().map(CelValue::UInt))
        .or_else(|| n.as_f64().map(CelValue::Float))
        .unwrap_or(CelValue::Null)
}

/// CEL result as a JSON value
///
/// Non-finite floats have no JSON form and become `null`.
pub fn cel_to_json(value: &CelValue) -> JsonValue {
    match value {
        CelValue::Null => JsonValue::Null,
        CelValue::Bool(b) => JsonValue::Bool(*b),
        CelValue::Int(i) => JsonValue::from(*i),
        CelValue::UInt(u) => JsonValue::from(*u),
        CelValue::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        CelValue::String(s) => JsonValue::String(s.to_string()),
        CelValue::Bytes(bytes) => {
            JsonValue::String(base64::engine::general_purpose::STANDARD.encode(bytes.as_slice()))
        }
        CelValue::List(items) => items.iter().map(cel_to_json).collect(),
        CelValue::Map(map) => JsonValue::Object(
            map.map
                .iter()
                .map(|(key, entry)| (key_to_string(key), cel_to_json(entry)))
                .collect(),
        ),
        CelValue::Timestamp(ts) => JsonValue::String(ts.to_rfc3339()),
        CelValue::Duration(_) | CelValue::Function(_, _) => JsonValue::String(format!("{:?}", value)),
    }
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::String(s) => s.to_string(),
        Key::Int(i) => i.to_string(),
        Key::Uint(u) => u.to_string(),
        Key::Bool(b) => b.to_string(),
    }
}
