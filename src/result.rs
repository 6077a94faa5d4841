//! Plugin result values: outcome status plus a typed payload

use serde::{Deserialize, Serialize};

use crate::value::PayloadValue;

/// Outcome classification for a plugin call.
///
/// Statuses other than [`Status::Ok`] and [`Status::NoResult`] are error
/// outcomes chosen by the plugin author; the bridge only carries them, it
/// never raises them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The call produced no result
    NoResult,
    /// The call succeeded
    Ok,
    /// A named implementation could not be found
    ClassNotFound,
    /// The implementation was found but may not be used
    IllegalAccess,
    /// The implementation could not be instantiated
    InstantiationError,
    /// A URL argument did not parse
    MalformedUrl,
    /// An I/O operation failed
    IoError,
    /// The requested action is not one the plugin provides
    InvalidAction,
    /// A structured value could not be read or written
    JsonError,
    /// Generic failure
    Error,
}

impl Status {
    /// Default human-readable message for this status.
    ///
    /// Every status maps to exactly one message; keeping the mapping in a
    /// single `match` means adding or reordering variants cannot leave a
    /// status without one.
    pub fn default_message(self) -> &'static str {
        match self {
            Status::NoResult => "No result",
            Status::Ok => "OK",
            Status::ClassNotFound => "Class not found",
            Status::IllegalAccess => "Illegal access",
            Status::InstantiationError => "Instantiation error",
            Status::MalformedUrl => "Malformed url",
            Status::IoError => "IO error",
            Status::InvalidAction => "Invalid action",
            Status::JsonError => "JSON error",
            Status::Error => "Error",
        }
    }
}

/// Tag identifying which shape of value a result carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    String,
    JsonObject,
    JsonArray,
    Number,
    Boolean,
    Null,
}

/// A result's payload, one variant per [`PayloadKind`].
///
/// Text is stored verbatim; nothing is escaped at this layer. Numbers and
/// booleans are stored as their canonical text rendering - the typing is
/// nominal, and the wire value handed to a channel is text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Free-form text
    Text(String),
    /// Structured object, key order preserved
    Object(Vec<(String, PayloadValue)>),
    /// Ordered list of values
    Array(Vec<PayloadValue>),
    /// Decimal text rendering of an integer or float
    Number(String),
    /// The literal text `"true"` or `"false"`
    Boolean(String),
    /// No explicit payload; carries the status's default message so dispatch
    /// still has a human-readable argument to deliver
    Null(String),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::String,
            Payload::Object(_) => PayloadKind::JsonObject,
            Payload::Array(_) => PayloadKind::JsonArray,
            Payload::Number(_) => PayloadKind::Number,
            Payload::Boolean(_) => PayloadKind::Boolean,
            Payload::Null(_) => PayloadKind::Null,
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Vec<(String, PayloadValue)>> for Payload {
    fn from(fields: Vec<(String, PayloadValue)>) -> Self {
        Payload::Object(fields)
    }
}

impl From<Vec<PayloadValue>> for Payload {
    fn from(items: Vec<PayloadValue>) -> Self {
        Payload::Array(items)
    }
}

impl From<i32> for Payload {
    fn from(n: i32) -> Self {
        Payload::Number(n.to_string())
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Payload::Number(n.to_string())
    }
}

impl From<f32> for Payload {
    fn from(n: f32) -> Self {
        Payload::Number(n.to_string())
    }
}

impl From<f64> for Payload {
    fn from(n: f64) -> Self {
        Payload::Number(n.to_string())
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Boolean(b.to_string())
    }
}

/// An immutable plugin outcome: a [`Status`] plus a typed [`Payload`].
///
/// Built once per plugin-call outcome and consumed by a single dispatch
/// through a [`CallbackContext`](crate::CallbackContext). Structured payloads
/// are not inspected at construction; a payload the host representation
/// cannot express surfaces as a conversion fault during dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginResult {
    status: Status,
    payload: Payload,
}

impl PluginResult {
    /// Build a result from a status and any supported payload shape.
    ///
    /// Empty text collapses to the [`PayloadKind::Null`] kind carrying the
    /// status's default message, so dispatch never delivers an empty value.
    pub fn new(status: Status, payload: impl Into<Payload>) -> Self {
        let payload = match payload.into() {
            Payload::Text(text) if text.is_empty() => {
                Payload::Null(status.default_message().to_string())
            }
            other => other,
        };
        Self { status, payload }
    }

    /// Build a status-only result carrying the status's default message
    pub fn from_status(status: Status) -> Self {
        Self::new(status, status.default_message())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn kind(&self) -> PayloadKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
