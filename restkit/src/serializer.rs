// restkit/src/serializer.rs
use serde_json::Value;

use crate::error::Result;

/// Body codec bound to a registry at construction time, never re-bound per
/// call. Works over `serde_json::Value` so it stays object-safe; callers use
/// serde to move between `Value` and their own types.
pub trait Serializer: Send + Sync {
    /// MIME type written for serialized payloads.
    fn emits(&self) -> &'static str;

    /// MIME types this codec claims when negotiating response content.
    fn handles(&self) -> &'static [&'static str];

    /// Serialize a structured payload.
    fn serialize(&self, value: &Value) -> Result<String>;

    /// Serialize a single parameter value that forms the entire request
    /// body. A bare string goes out raw, not quoted as a JSON document.
    fn serialize_parameter(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => self.serialize(other),
        }
    }

    /// Deserialize a response body.
    fn deserialize(&self, body: &str) -> Result<Value>;
}

/// serde_json-backed codec; the registry default.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

const JSON_CONTENT_TYPES: &[&str] = &["application/json", "text/json", "text/x-json"];

impl Serializer for JsonSerializer {
    fn emits(&self) -> &'static str {
        "application/json"
    }

    fn handles(&self) -> &'static [&'static str] {
        JSON_CONTENT_TYPES
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, body: &str) -> Result<Value> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emits_json() {
        assert_eq!(JsonSerializer.emits(), "application/json");
        assert!(JsonSerializer.handles().contains(&"application/json"));
    }

    #[test]
    fn test_serialize_structured_payload() {
        let out = JsonSerializer.serialize(&json!({"a": 1})).unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[test]
    fn test_parameter_string_goes_raw() {
        let out = JsonSerializer
            .serialize_parameter(&json!("hello world"))
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn test_parameter_structured_falls_back_to_payload_form() {
        let out = JsonSerializer.serialize_parameter(&json!([1, 2])).unwrap();
        assert_eq!(out, "[1,2]");
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let value = JsonSerializer.deserialize(r#"{"ok":true}"#).unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        assert!(JsonSerializer.deserialize("{").is_err());
    }
}
