//! JSON → [`Value`] conversion for the CLI input path.
//!
//! Objects become keyed mappings (preserving key order), arrays become
//! sequences. JSON has no set or record syntax, so those shapes are only
//! reachable through the builder API.

use crate::value::Value;

/// Converts a parsed JSON document into a renderable value.
pub fn from_json(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(from_json)),
        serde_json::Value::Object(entries) => {
            Value::map(entries.iter().map(|(k, v)| (k.clone(), from_json(v))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Composite, Shape};

    #[test]
    fn objects_become_ordered_mappings() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let value = from_json(&json);

        assert_eq!(value.shape(), Shape::Mapping);
        let composite = value.composite().unwrap();
        let Composite::Map(entries) = &*composite else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"], "key order must be preserved");
    }

    #[test]
    fn arrays_become_sequences_in_order() {
        let json: serde_json::Value = serde_json::from_str("[3, 1, 2]").unwrap();
        let value = from_json(&json);

        assert_eq!(value.shape(), Shape::Sequence);
        assert_eq!(value.to_string(), "[3, 1, 2]");
    }

    #[test]
    fn scalars_map_to_atoms() {
        assert!(from_json(&serde_json::Value::Null).is_null());
        assert_eq!(from_json(&serde_json::json!(2.5)).repr(), "2.5");
        assert_eq!(from_json(&serde_json::json!("x")).repr(), "'x'");
    }
}
