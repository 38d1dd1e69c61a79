//! Operator line encoding.
//!
//! Turns one line of raw operator text into a [`Frame`].
//!
//! # Line Format
//!
//! ```text
//! command:<json payload>
//! ```
//!
//! The line is split at the first `:`. Text before it becomes the command
//! tag, text after it is parsed as JSON. Neither part is trimmed; callers
//! pre-trim the whole line before encoding.
//!
//! A line with no delimiter leaves an empty payload substring, which is not
//! valid JSON, so such lines always fail to encode. This mirrors the
//! counterpart service's existing client and is kept intact.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::trace;

use crate::error::{Error, Result};

use super::Frame;

// ============================================================================
// Constants
// ============================================================================

/// Delimiter separating the command tag from the JSON payload.
pub const DELIMITER: char = ':';

// ============================================================================
// Encoding
// ============================================================================

/// Encodes one operator line into a [`Frame`].
///
/// # Errors
///
/// Returns [`Error::Parse`] carrying the original line when the payload
/// substring is not valid JSON. The failure is non-fatal; the operator may
/// retype and resend.
///
/// # Example
///
/// ```
/// use ws_console::protocol::encode;
///
/// let frame = encode(r#"ping:{"n":1}"#).expect("valid line");
/// assert_eq!(frame.command, "ping");
/// ```
pub fn encode(line: &str) -> Result<Frame> {
    let (command, payload) = match line.find(DELIMITER) {
        Some(at) => (&line[..at], &line[at + 1..]),
        None => (line, ""),
    };

    let data: Value = serde_json::from_str(payload).map_err(|_| Error::parse(line))?;

    trace!(command, "line encoded");

    Ok(Frame::new(command, data))
}

// ============================================================================
// Tests
// ============================================================================
