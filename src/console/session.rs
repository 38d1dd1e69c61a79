//! Session state machine.
//!
//! `Session` is the single-threaded core of the console: it owns the
//! connection lifecycle, the transcript, and the history log. It performs no
//! I/O itself — operator commands and socket events go in, UI events come
//! out over the event channel, and requested I/O comes back to the caller as
//! an [`Effect`] to execute.
//!
//! # Side Effect Contract
//!
//! Every state transition emits exactly one
//! [`ConsoleEvent::StateChange`]; every transition and every inbound
//! message appends exactly one transcript entry (abnormal closure adds one
//! extra `Error` entry before the `Status` entry). No event is silently
//! dropped, and no-op commands (connect while live, disconnect while idle)
//! produce nothing at all.

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;

use crate::history::{HistoryDirection, HistoryLog};
use crate::protocol;
use crate::storage::HistoryStore;
use crate::transport::{ConnectionTarget, SocketEvent};

use super::event::ConsoleEvent;
use super::state::ConnectionState;
use super::transcript::{Transcript, TranscriptEntry};

// ============================================================================
// Constants
// ============================================================================

/// Status entry text on successful handshake.
const CONNECTED: &str = "Connected!";

/// Status entry text when the socket is gone.
const DISCONNECTED: &str = "Disconnected!";

/// Error entry text for a submit without an open connection.
const NOT_CONNECTED: &str = "Not connected";

// ============================================================================
// Effect
// ============================================================================

/// I/O requested by the session, executed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a socket to the URL.
    Open(Url),

    /// Send wire text over the live socket.
    Send(String),

    /// Request closure of the live socket.
    Close,
}

// ============================================================================
// Session
// ============================================================================

/// The console core: lifecycle state machine, transcript, and history.
pub struct Session {
    /// Lifecycle state of the single owned socket.
    state: ConnectionState,
    /// Append-only transcript.
    transcript: Transcript,
    /// Command recall log.
    history: HistoryLog,
    /// Durable backing for the history log.
    store: Box<dyn HistoryStore>,
    /// Diagnostic query string forwarded onto the transport URL.
    query: Option<String>,
    /// UI-facing event channel.
    events: mpsc::UnboundedSender<ConsoleEvent>,
}

impl Session {
    /// Creates a session, loading history from the store.
    ///
    /// An unreadable or corrupt store degrades to an empty history log;
    /// startup never fails on storage.
    pub fn new(
        store: Box<dyn HistoryStore>,
        query: Option<String>,
        events: mpsc::UnboundedSender<ConsoleEvent>,
    ) -> Self {
        let entries = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "history store unreadable, starting empty");
            Vec::new()
        });

        Self {
            state: ConnectionState::Idle,
            transcript: Transcript::new(),
            history: HistoryLog::from_entries(entries),
            store,
            query,
            events,
        }
    }

    // ========================================================================
    // Operator Commands
    // ========================================================================

    /// Handles a connect request.
    ///
    /// While `Connecting` or `Open` this is a no-op producing zero events
    /// and zero transcript entries. A malformed target appends an `Error`
    /// entry and leaves the state unchanged.
    pub fn request_connect(&mut self, target: &ConnectionTarget) -> Option<Effect> {
        if !self.state.can_connect() {
            debug!(state = %self.state, "connect request ignored");
            return None;
        }

        let url = match target.url(self.query.as_deref()) {
            Ok(url) => url,
            Err(e) => {
                self.append(TranscriptEntry::error(e.to_string()));
                return None;
            }
        };

        debug!(url = %url, "connecting");
        self.set_state(ConnectionState::Connecting);

        Some(Effect::Open(url))
    }

    /// Handles a disconnect request.
    ///
    /// Requests closure of a `Connecting` or `Open` socket; the eventual
    /// close event is handled like any other. Otherwise a no-op.
    pub fn request_disconnect(&mut self) -> Option<Effect> {
        if !self.state.is_live() {
            debug!(state = %self.state, "disconnect request ignored");
            return None;
        }

        self.set_state(ConnectionState::Closing);

        Some(Effect::Close)
    }

    /// Handles one submitted line.
    ///
    /// The line is pre-trimmed as a whole; an empty line is a no-op. Every
    /// non-empty line is recorded into history (parseable or not) before
    /// encoding. On successful encoding the wire text is appended as a
    /// `Written` entry and returned as a send effect; a parse failure
    /// appends an `Error` entry and sends nothing.
    pub fn submit_line(&mut self, raw: &str) -> Option<Effect> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }

        if self.history.record(line) {
            self.persist_history();
        }

        if !self.state.is_open() {
            self.append(TranscriptEntry::error(NOT_CONNECTED));
            return None;
        }

        let frame = match protocol::encode(line) {
            Ok(frame) => frame,
            Err(e) => {
                self.append(TranscriptEntry::error(e.to_string()));
                return None;
            }
        };

        let wire = match frame.serialize() {
            Ok(wire) => wire,
            Err(e) => {
                self.append(TranscriptEntry::error(e.to_string()));
                return None;
            }
        };

        self.append(TranscriptEntry::written(wire.clone()));

        Some(Effect::Send(wire))
    }

    /// Handles a history recall keystroke, emitting the recalled text.
    pub fn navigate_history(&mut self, direction: HistoryDirection) {
        let recalled = self.history.recall(direction).map(str::to_owned);
        if let Some(text) = recalled {
            self.emit(ConsoleEvent::HistoryNavigate(text));
        }
    }

    // ========================================================================
    // Socket Events
    // ========================================================================

    /// Handles one transport lifecycle event.
    pub fn handle_socket_event(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => {
                // An open landing while Closing is superseded by the pending
                // close; the Closed event settles it.
                if self.state == ConnectionState::Connecting {
                    self.set_state(ConnectionState::Open);
                    self.append(TranscriptEntry::status(CONNECTED));
                } else {
                    debug!(state = %self.state, "open event ignored");
                }
            }

            SocketEvent::Message(text) => {
                self.append(TranscriptEntry::read(text));
            }

            SocketEvent::Error(message) => {
                self.append(TranscriptEntry::error(format!("Error: {message}")));
            }

            SocketEvent::Closed => {
                if self.state.is_live() || self.state == ConnectionState::Closing {
                    self.set_state(ConnectionState::Closed);
                    self.append(TranscriptEntry::status(DISCONNECTED));
                } else {
                    debug!(state = %self.state, "close event ignored");
                }
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the current connection state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns the transcript.
    #[inline]
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the history log.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Appends a transcript entry and mirrors it to the event channel.
    fn append(&mut self, entry: TranscriptEntry) {
        self.emit(ConsoleEvent::TranscriptAppend(entry.clone()));
        self.transcript.append(entry);
    }

    /// Transitions the state, emitting the change.
    fn set_state(&mut self, next: ConnectionState) {
        if self.state == next {
            return;
        }
        debug!(from = %self.state, to = %next, "state change");
        self.state = next;
        self.emit(ConsoleEvent::StateChange(next));
    }

    /// Sends an event to the UI; a gone subscriber is not an error.
    #[inline]
    fn emit(&self, event: ConsoleEvent) {
        let _ = self.events.send(event);
    }

    /// Writes the history log back to the store; failures are logged and
    /// never interrupt the session.
    fn persist_history(&self) {
        if let Err(e) = self.store.save(self.history.entries()) {
            warn!(error = %e, "failed to persist history");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
