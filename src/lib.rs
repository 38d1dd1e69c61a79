//! Interactive WebSocket console core.
//!
//! This library is the engine of an interactive client for WebSocket-based
//! services: the operator supplies connection parameters, types command
//! lines, and watches exchanged frames streamed to an append-only
//! transcript. Rendering is deliberately left out — any UI surface (TUI,
//! GUI, web) drives the core through commands and subscribes to its events.
//!
//! # Architecture
//!
//! The core follows a command/event model:
//!
//! - **Commands in**: connect, disconnect, submit line, recall history
//! - **Events out**: transcript appends, state changes, recalled text
//! - One [`Session`] state machine owns at most one live socket at a time
//! - Operator lines become `{"command": ..., "data": ...}` JSON frames;
//!   inbound traffic is captured verbatim
//!
//! # Quick Start
//!
//! ```no_run
//! use ws_console::{Console, ConsoleConfig, ConnectionTarget, ConsoleEvent};
//!
//! #[tokio::main]
//! async fn main() -> ws_console::Result<()> {
//!     let (console, mut events) = Console::spawn(ConsoleConfig::new());
//!
//!     console.connect(ConnectionTarget::new("localhost", 8080, false))?;
//!     console.submit(r#"ping:{"n":1}"#)?;
//!
//!     while let Some(event) = events.recv().await {
//!         if let ConsoleEvent::TranscriptAppend(entry) = event {
//!             println!("[{}] {}", entry.kind, entry.text);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`console`] | Session core: state machine, transcript, handle |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`history`] | Command history with linear recall |
//! | [`protocol`] | Command-frame codec (internal format) |
//! | [`storage`] | Durable history persistence |
//! | [`transport`] | WebSocket transport layer (internal) |
//!
//! # Failure Model
//!
//! Nothing here is fatal: malformed lines surface as `error` transcript
//! entries, transport failures close the session and leave reconnecting to
//! the operator, and unreadable history stores degrade to an empty log.

// ============================================================================
// Modules
// ============================================================================

/// Console core: state machine, transcript, handle.
///
/// This module contains the session state machine and its async driver:
///
/// - [`Session`] - pure lifecycle/transcript/history core
/// - [`Console`] - cloneable handle plus spawned event loop
/// - [`ConsoleEvent`] - the stream a UI renders
pub mod console;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Command history with linear recall.
///
/// Append-only recall list with a `[0, len]` cursor; survives sessions via
/// [`storage`].
pub mod history;

/// Command-frame protocol.
///
/// Internal module defining the wire frame and the operator-line codec.
pub mod protocol;

/// Durable history persistence.
///
/// File-backed and in-memory stores behind one trait.
pub mod storage;

/// WebSocket transport layer.
///
/// Internal module handling the socket task and URL building.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Console types
pub use console::{
    Console, ConsoleConfig, ConsoleEvent, ConnectionState, EntryKind, Session, Transcript,
    TranscriptEntry,
};

// Error types
pub use error::{Error, Result};

// History types
pub use history::{HistoryDirection, HistoryLog};

// Protocol types
pub use protocol::Frame;

// Storage types
pub use storage::{FileStore, HistoryStore, MemoryStore};

// Transport types
pub use transport::ConnectionTarget;
