//! Command-frame protocol.
//!
//! This module defines the wire format exchanged with the remote service
//! and the codec that turns operator-typed lines into frames.
//!
//! # Protocol Overview
//!
//! | Direction | Format |
//! |-----------|--------|
//! | Outbound | JSON object `{"command": "...", "data": <any JSON>}` |
//! | Inbound | Unconstrained text, captured verbatim |
//!
//! The protocol is deliberately asymmetric: outbound traffic is structured,
//! inbound traffic is displayed raw. No inbound decode step exists.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `codec` | Operator line → [`Frame`] encoding |
//! | `frame` | Wire frame type and serialization |

// ============================================================================
// Submodules
// ============================================================================

/// Operator line encoding.
pub mod codec;

/// Wire frame type.
pub mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::{DELIMITER, encode};
pub use frame::Frame;
