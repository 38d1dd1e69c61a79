//! Console core: lifecycle state machine, transcript, and UI contract.
//!
//! This module contains the heart of the crate. The [`Session`] state
//! machine is pure and synchronous; the [`Console`] handle wraps it in a
//! tokio event loop wired to the transport. The presentation layer is an
//! external collaborator: it sends commands through the handle and renders
//! the [`ConsoleEvent`] stream.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | UI-facing event types |
//! | `handle` | Console handle and event loop |
//! | `session` | Session state machine |
//! | `state` | Connection lifecycle states |
//! | `transcript` | Append-only session transcript |

// ============================================================================
// Submodules
// ============================================================================

/// UI-facing event types.
pub mod event;

/// Console handle and event loop.
pub mod handle;

/// Session state machine.
pub mod session;

/// Connection lifecycle states.
pub mod state;

/// Append-only session transcript.
pub mod transcript;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::ConsoleEvent;
pub use handle::{Console, ConsoleConfig};
pub use session::{Effect, Session};
pub use state::ConnectionState;
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
