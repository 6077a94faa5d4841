//! Structured payload values and conversion to the host's native shape

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::error::ConvertError;

/// A node in a structured payload: nested maps and ordered sequences over
/// scalar leaves.
///
/// This is the shape plugins build results from. It is richer than the host's
/// native representation in one way - a [`PayloadValue::Binary`] leaf - which
/// conversion flattens to base64 text.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Opaque bytes; crosses the bridge as standard base64 text
    Binary(Vec<u8>),
    Array(Vec<PayloadValue>),
    /// Ordered key/value pairs; key order survives conversion
    Object(Vec<(String, PayloadValue)>),
}

impl PayloadValue {
    /// Convert into the host runtime's native nested-value representation.
    ///
    /// Element and key order are preserved. The one value the host cannot
    /// express is a non-finite float, which is reported as a
    /// [`ConvertError`] rather than silently dropped - dispatch turns that
    /// into an error-channel diagnostic.
    pub fn to_native(&self) -> Result<Value, ConvertError> {
        match self {
            PayloadValue::Null => Ok(Value::Null),
            PayloadValue::Bool(b) => Ok(Value::Bool(*b)),
            PayloadValue::Int(n) => Ok(Value::Number((*n).into())),
            PayloadValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .ok_or(ConvertError::NonFiniteNumber(*n)),
            PayloadValue::Text(text) => Ok(Value::String(text.clone())),
            PayloadValue::Binary(bytes) => Ok(Value::String(STANDARD.encode(bytes))),
            PayloadValue::Array(items) => items
                .iter()
                .map(PayloadValue::to_native)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            PayloadValue::Object(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key.clone(), value.to_native()?);
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(text: &str) -> Self {
        PayloadValue::Text(text.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(text: String) -> Self {
        PayloadValue::Text(text)
    }
}

impl From<i64> for PayloadValue {
    fn from(n: i64) -> Self {
        PayloadValue::Int(n)
    }
}

impl From<f64> for PayloadValue {
    fn from(n: f64) -> Self {
        PayloadValue::Float(n)
    }
}

impl From<bool> for PayloadValue {
    fn from(b: bool) -> Self {
        PayloadValue::Bool(b)
    }
}
