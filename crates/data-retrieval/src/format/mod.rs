//! Text reports for upstream payloads
//!
//! Each formatter is a pure function of its payload. Payload records are typed
//! structs whose fields are all optional; placeholders for missing fields are
//! chosen per field at render time.

pub mod a_share;
pub mod box_office;
pub mod us_stock;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder for a missing numeric or text field
pub const NOT_AVAILABLE: &str = "N/A";

/// A scalar-ish field as sent by an upstream API.
///
/// JSON `null` never becomes a `FieldValue`; it is treated as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    /// Arrays and objects, rendered as compact JSON
    Other(Value),
}

impl FieldValue {
    /// Convert a raw JSON value; `null` yields `None`
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            other => Some(FieldValue::Other(other.clone())),
        }
    }

    /// Empty strings, zero, `false` and empty containers are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            FieldValue::Bool(b) => *b,
            FieldValue::Other(v) => is_truthy(v),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Render `value`, or `default` when absent
pub(crate) fn or_default(value: Option<&FieldValue>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Render `value`, or [`NOT_AVAILABLE`] when absent
pub(crate) fn or_na(value: Option<&FieldValue>) -> String {
    or_default(value, NOT_AVAILABLE)
}

/// Top-level payload field as a [`FieldValue`]
pub(crate) fn field(payload: &Map<String, Value>, key: &str) -> Option<FieldValue> {
    payload.get(key).and_then(FieldValue::from_json)
}

/// Decode a payload record. Records only hold optional fields, so anything
/// that is not an object decodes to the all-missing record.
pub(crate) fn record<T: DeserializeOwned + Default>(value: &Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    T::deserialize(value).unwrap_or_default()
}

/// JSON truthiness: `null`, `false`, zero and empty strings/containers are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
