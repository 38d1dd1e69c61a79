//! Error types for the WebSocket console.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use ws_console::{Result, protocol};
//!
//! fn example(line: &str) -> Result<String> {
//!     let frame = protocol::encode(line)?;
//!     frame.serialize()
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Frame encoding | [`Error::Parse`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`] |
//! | Durable history | [`Error::Storage`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |
//!
//! No variant is fatal to the process: parse failures surface as transcript
//! entries, transport failures force the session to `Closed`, and storage
//! failures degrade to an empty history log.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Frame Encoding Errors
    // ========================================================================
    /// Operator line could not be encoded into a frame.
    ///
    /// Returned when the payload after the delimiter is not valid JSON,
    /// including the delimiter-less case where the payload is empty.
    /// Recovered locally; the operator may retype and resend.
    #[error("Cannot parse: {line}")]
    Parse {
        /// The original line, kept for diagnostic display.
        line: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the handshake or a runtime socket operation fails.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// WebSocket connection closed unexpectedly.
    ///
    /// Returned when a send is attempted without a live transport.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// Durable history store failure.
    ///
    /// Returned when stored history cannot be read or decoded. Callers
    /// degrade to an empty history log and continue.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a parse error carrying the offending line.
    #[inline]
    pub fn parse(line: impl Into<String>) -> Self {
        Self::Parse { line: line.into() }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    #[inline]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a frame encoding error.
    #[inline]
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable within the session.
    ///
    /// Recoverable errors leave the session usable: the operator retries
    /// with corrected input or reconnects manually.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Connection { .. } | Self::ConnectionClosed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
