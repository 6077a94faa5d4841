//! CallbackContext - routes plugin results onto the host's callback pair

use std::sync::Arc;

use crate::error::ConvertError;
use crate::result::{Payload, PluginResult, Status};

/// Marker prefixed to the diagnostic sent when a payload cannot be converted
const CONVERT_ERROR_MARKER: &str = "Internal error converting results:";

/// The single argument a channel invocation carries: either plain text or a
/// value in the host's native structured representation.
///
/// Number and boolean results travel as text; interpreting them is the
/// receiving side's job.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    Text(String),
    Structured(serde_json::Value),
}

/// One of the two callback destinations the host runtime supplies.
///
/// Handles are opaque to this crate: a channel just accepts a single value.
/// The host is assumed to enqueue delivery on its own event loop; invocation
/// here is synchronous and performs no I/O. Any `Fn(ChannelValue)` closure
/// qualifies.
pub trait Channel: Send + Sync {
    fn invoke(&self, value: ChannelValue);
}

impl<F> Channel for F
where
    F: Fn(ChannelValue) + Send + Sync,
{
    fn invoke(&self, value: ChannelValue) {
        self(value)
    }
}

/// A plugin call's route back to its caller: a success channel and an error
/// channel.
///
/// The context selects a channel by result status, converts the payload into
/// the shape the host expects, and invokes the channel. It does not own the
/// channels' lifetime and does not track how many times it is used;
/// at-most-once delivery is the host runtime's contract. Typically one
/// context is constructed per plugin invocation and dropped after its single
/// dispatch.
pub struct CallbackContext {
    success: Arc<dyn Channel>,
    error: Arc<dyn Channel>,
}

impl CallbackContext {
    pub fn new(success: Arc<dyn Channel>, error: Arc<dyn Channel>) -> Self {
        Self { success, error }
    }

    /// Dispatch a result: convert its payload and invoke one channel.
    ///
    /// Channel selection is a pure function of status - `Ok` goes to the
    /// success channel, everything else to the error channel. A payload that
    /// cannot be converted never panics and never goes unreported: the error
    /// channel receives a diagnostic instead, regardless of status. Exactly
    /// one channel invocation happens per call.
    pub fn send_result(&self, result: PluginResult) {
        let channel = if result.status() == Status::Ok {
            &self.success
        } else {
            &self.error
        };
        match convert(result.into_payload()) {
            Ok(value) => channel.invoke(value),
            Err(err) => {
                tracing::warn!(error = %err, "plugin result payload failed to convert");
                self.error
                    .invoke(ChannelValue::Text(format!("{CONVERT_ERROR_MARKER}{err}")));
            }
        }
    }

    /// Report success with the default `OK` message
    pub fn ok(&self) {
        self.send_result(PluginResult::from_status(Status::Ok));
    }

    /// Report success with a payload (text, object, array, number or boolean)
    pub fn success(&self, message: impl Into<Payload>) {
        self.send_result(PluginResult::new(Status::Ok, message));
    }

    /// Report failure with a payload (text, object, array, number or boolean)
    pub fn error(&self, message: impl Into<Payload>) {
        self.send_result(PluginResult::new(Status::Error, message));
    }
}

/// Convert a payload into the value shape a channel accepts.
///
/// Structured payloads become native nested values; every other kind passes
/// its stored text through unchanged, including the `Null` kind, which
/// carries the status's default message rather than an empty value.
fn convert(payload: Payload) -> Result<ChannelValue, ConvertError> {
    match payload {
        Payload::Object(fields) => crate::value::PayloadValue::Object(fields)
            .to_native()
            .map(ChannelValue::Structured),
        Payload::Array(items) => crate::value::PayloadValue::Array(items)
            .to_native()
            .map(ChannelValue::Structured),
        Payload::Text(text)
        | Payload::Number(text)
        | Payload::Boolean(text)
        | Payload::Null(text) => Ok(ChannelValue::Text(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PayloadValue;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every invocation it receives
    #[derive(Default)]
    struct RecordingChannel {
        received: Mutex<Vec<ChannelValue>>,
    }

    impl Channel for RecordingChannel {
        fn invoke(&self, value: ChannelValue) {
            self.received.lock().unwrap().push(value);
        }
    }

    impl RecordingChannel {
        fn take(&self) -> Vec<ChannelValue> {
            std::mem::take(&mut self.received.lock().unwrap())
        }
    }

    fn test_context() -> (Arc<RecordingChannel>, Arc<RecordingChannel>, CallbackContext) {
        let success = Arc::new(RecordingChannel::default());
        let error = Arc::new(RecordingChannel::default());
        let ctx = CallbackContext::new(success.clone(), error.clone());
        (success, error, ctx)
    }

    #[test]
    fn test_ok_text_goes_to_success_channel() {
        let (success, error, ctx) = test_context();
        ctx.send_result(PluginResult::new(Status::Ok, "42"));

        assert_eq!(success.take(), vec![ChannelValue::Text("42".to_string())]);
        assert!(error.take().is_empty());
    }

    #[test]
    fn test_error_object_goes_to_error_channel_as_native_map() {
        let (success, error, ctx) = test_context();
        ctx.send_result(PluginResult::new(
            Status::Error,
            vec![("msg".to_string(), PayloadValue::from("bad input"))],
        ));

        assert!(success.take().is_empty());
        assert_eq!(
            error.take(),
            vec![ChannelValue::Structured(json!({"msg": "bad input"}))]
        );
    }

    #[test]
    fn test_status_only_ok_delivers_default_message() {
        let (success, _error, ctx) = test_context();
        ctx.send_result(PluginResult::from_status(Status::Ok));

        assert_eq!(success.take(), vec![ChannelValue::Text("OK".to_string())]);
    }

    #[test]
    fn test_every_non_ok_status_selects_error_channel() {
        let statuses = [
            Status::NoResult,
            Status::ClassNotFound,
            Status::IllegalAccess,
            Status::InstantiationError,
            Status::MalformedUrl,
            Status::IoError,
            Status::InvalidAction,
            Status::JsonError,
            Status::Error,
        ];
        for status in statuses {
            let (success, error, ctx) = test_context();
            ctx.send_result(PluginResult::from_status(status));

            assert!(success.take().is_empty(), "{status:?} reached success");
            assert_eq!(
                error.take(),
                vec![ChannelValue::Text(status.default_message().to_string())]
            );
        }
    }

    #[test]
    fn test_empty_ok_text_delivers_default_message_not_empty_value() {
        let (success, _error, ctx) = test_context();
        ctx.send_result(PluginResult::new(Status::Ok, ""));

        assert_eq!(success.take(), vec![ChannelValue::Text("OK".to_string())]);
    }

    #[test]
    fn test_conversion_fault_reroutes_to_error_channel() {
        let (success, error, ctx) = test_context();
        ctx.send_result(PluginResult::new(
            Status::Ok,
            vec![("ratio".to_string(), PayloadValue::Float(f64::NAN))],
        ));

        assert!(success.take().is_empty());
        let received = error.take();
        assert_eq!(received.len(), 1);
        let ChannelValue::Text(text) = &received[0] else {
            panic!("expected a text diagnostic");
        };
        assert!(text.starts_with("Internal error converting results:"));
    }

    #[test]
    fn test_number_and_boolean_travel_as_text() {
        let (success, _error, ctx) = test_context();
        ctx.send_result(PluginResult::new(Status::Ok, 7_i64));
        ctx.send_result(PluginResult::new(Status::Ok, true));

        assert_eq!(
            success.take(),
            vec![
                ChannelValue::Text("7".to_string()),
                ChannelValue::Text("true".to_string()),
            ]
        );
    }

    #[test]
    fn test_array_payload_preserves_element_order() {
        let (success, _error, ctx) = test_context();
        ctx.send_result(PluginResult::new(
            Status::Ok,
            vec![
                PayloadValue::from("first"),
                PayloadValue::Int(2),
                PayloadValue::Null,
            ],
        ));

        assert_eq!(
            success.take(),
            vec![ChannelValue::Structured(json!(["first", 2, null]))]
        );
    }

    #[test]
    fn test_convenience_methods_wrap_default_statuses() {
        let (success, error, ctx) = test_context();
        ctx.ok();
        ctx.success("done");
        ctx.success(3_i64);
        ctx.error("boom");
        ctx.error(vec![("code".to_string(), PayloadValue::Int(500))]);

        assert_eq!(
            success.take(),
            vec![
                ChannelValue::Text("OK".to_string()),
                ChannelValue::Text("done".to_string()),
                ChannelValue::Text("3".to_string()),
            ]
        );
        assert_eq!(
            error.take(),
            vec![
                ChannelValue::Text("boom".to_string()),
                ChannelValue::Structured(json!({"code": 500})),
            ]
        );
    }

    #[test]
    fn test_closures_can_serve_as_channels() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let success: Arc<dyn Channel> = Arc::new(move |value: ChannelValue| {
            sink.lock().unwrap().push(value);
        });
        let error: Arc<dyn Channel> = Arc::new(|_value: ChannelValue| {
            panic!("error channel must not fire");
        });

        CallbackContext::new(success, error).success("hello");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ChannelValue::Text("hello".to_string())]
        );
    }
}
