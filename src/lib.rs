//! plugin-bridge - deliver rich plugin results over a two-callback host bridge
//!
//! Plugins written against a status-plus-payload reporting convention can use
//! this crate to talk to a host runtime that only understands a pair of
//! success/error callbacks. A [`PluginResult`] tags an outcome [`Status`] with
//! one of several payload shapes (text, structured object, ordered list,
//! number, boolean, empty), and a [`CallbackContext`] converts the payload
//! into the host's native value shape and invokes the right channel.
//!
//! How the two callback handles are obtained, and how the host carries the
//! invocation back to its caller, are the host runtime's business - the
//! context only needs two [`Channel`] handles at construction.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plugin_bridge::{CallbackContext, Channel, ChannelValue, PayloadValue};
//!
//! let success: Arc<dyn Channel> = Arc::new(|value: ChannelValue| {
//!     println!("plugin succeeded: {value:?}");
//! });
//! let error: Arc<dyn Channel> = Arc::new(|value: ChannelValue| {
//!     eprintln!("plugin failed: {value:?}");
//! });
//!
//! let ctx = CallbackContext::new(success, error);
//! ctx.success(vec![
//!     ("path".to_string(), PayloadValue::from("/tmp/download")),
//!     ("bytes".to_string(), PayloadValue::from(1024_i64)),
//! ]);
//! ```

pub mod context;
pub mod error;
pub mod result;
pub mod value;

pub use context::{CallbackContext, Channel, ChannelValue};
pub use error::ConvertError;
pub use result::{Payload, PayloadKind, PluginResult, Status};
pub use value::PayloadValue;
