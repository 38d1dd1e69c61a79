//! Events emitted to the presentation layer.
//!
//! The core has no rendering dependency: whatever draws the console
//! subscribes to this stream and mirrors it however it likes. Events are
//! delivered over an unbounded channel in the exact order the core produced
//! them.

// ============================================================================
// Imports
// ============================================================================

use super::state::ConnectionState;
use super::transcript::TranscriptEntry;

// ============================================================================
// ConsoleEvent
// ============================================================================

/// One UI-facing notification from the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A transcript entry was appended.
    TranscriptAppend(TranscriptEntry),

    /// The connection state changed.
    StateChange(ConnectionState),

    /// History recall selected text for the input field.
    HistoryNavigate(String),
}
