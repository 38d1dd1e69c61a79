//! Wire frame type.
//!
//! Defines the outbound message format sent to the remote service.
//!
//! # Format
//!
//! ```json
//! {
//!   "command": "ping",
//!   "data": {"n": 1}
//! }
//! ```
//!
//! Exactly two keys, `command` first. `data` is any JSON value; no schema
//! constraints are imposed beyond valid JSON.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Frame
// ============================================================================

/// A structured `{command, data}` pair sent over the wire.
///
/// Produced by [`encode`](crate::protocol::encode) from one line of raw
/// operator text and consumed immediately by the transport send; not
/// retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Command tag: the text before the first delimiter.
    pub command: String,

    /// Payload: whatever JSON value followed the delimiter.
    pub data: Value,
}

impl Frame {
    /// Creates a new frame.
    #[inline]
    #[must_use]
    pub fn new(command: impl Into<String>, data: Value) -> Self {
        Self {
            command: command.into(),
            data,
        }
    }

    /// Serializes the frame to the exact wire text sent to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails,
    /// which cannot happen for values that came out of a successful parse.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_serialize_object_payload() {
        let frame = Frame::new("ping", json!({"n": 1}));
        let wire = frame.serialize().expect("serialize");
        assert_eq!(wire, r#"{"command":"ping","data":{"n":1}}"#);
    }

    #[test]
    fn test_serialize_scalar_payload() {
        let frame = Frame::new("echo", json!(42));
        let wire = frame.serialize().expect("serialize");
        assert_eq!(wire, r#"{"command":"echo","data":42}"#);
    }

    #[test]
    fn test_serialize_null_payload() {
        let frame = Frame::new("status", Value::Null);
        let wire = frame.serialize().expect("serialize");
        assert_eq!(wire, r#"{"command":"status","data":null}"#);
    }

    #[test]
    fn test_wire_text_round_trips() {
        let frame = Frame::new("cfg", json!({"nested": ["a", 1, null]}));
        let wire = frame.serialize().expect("serialize");
        let back: Frame = serde_json::from_str(&wire).expect("parse");
        assert_eq!(back, frame);
    }
}
