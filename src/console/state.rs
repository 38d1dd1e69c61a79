//! Connection lifecycle states.
//!
//! The explicit state enum guards every transition, removing the ambiguity
//! between "no socket handle" and "handle present but closed" that a bare
//! reference check leaves open.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of the single owned socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No connection has been attempted yet.
    Idle,
    /// Handshake in flight.
    Connecting,
    /// Handshake completed; sends are allowed.
    Open,
    /// Operator requested disconnect; waiting for the close event.
    Closing,
    /// The socket is gone; a new connect is allowed.
    Closed,
}

impl ConnectionState {
    /// Returns `true` while a socket is owned (handshaking or open).
    ///
    /// A connect request in a live state is a no-op.
    #[inline]
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }

    /// Returns `true` if a new connect request is allowed.
    #[inline]
    #[must_use]
    pub const fn can_connect(self) -> bool {
        matches!(self, Self::Idle | Self::Closed)
    }

    /// Returns `true` if sends are allowed.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Tests
// ============================================================================
