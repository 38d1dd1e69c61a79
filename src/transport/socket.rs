//! Socket task and lifecycle events.
//!
//! At most one socket is live at a time; the session's state machine, not
//! resource contention, enforces that. The socket task owns the tungstenite
//! stream and translates its lifecycle into [`SocketEvent`]s delivered in
//! arrival order over an mpsc channel.
//!
//! # Event Loop
//!
//! The task handshakes asynchronously, then handles:
//!
//! - Incoming text messages from the remote service
//! - Outgoing wire text and close requests from the session
//!
//! There is no handshake timeout: a stalled remote leaves the session
//! `Connecting` until the operator disconnects or the transport errors out.

// ============================================================================
// Imports
// ============================================================================

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// SocketEvent
// ============================================================================

/// Transport lifecycle event delivered to the session loop.
///
/// Every event yields exactly one session reaction; none are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Handshake completed.
    Opened,

    /// Text message received, verbatim.
    Message(String),

    /// Handshake or runtime socket failure.
    Error(String),

    /// Socket is gone: remote close, local close, or after an error.
    Closed,
}

// ============================================================================
// SocketCommand
// ============================================================================

/// Internal commands for the socket task.
enum SocketCommand {
    /// Send wire text to the remote service.
    Send(String),

    /// Request closure.
    Close,
}

// ============================================================================
// Socket
// ============================================================================

/// Handle to the single live socket task.
///
/// Dropping the handle closes the command channel, which ends the task
/// after the stream drains.
pub struct Socket {
    /// Channel for sending commands to the socket task.
    command_tx: mpsc::UnboundedSender<SocketCommand>,
}

impl Socket {
    /// Opens a socket to `url`, spawning the socket task.
    ///
    /// The handshake happens inside the task; its outcome arrives as
    /// [`SocketEvent::Opened`] or [`SocketEvent::Error`] followed by
    /// [`SocketEvent::Closed`].
    #[must_use]
    pub fn open(url: Url, events: mpsc::UnboundedSender<SocketEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::run(url, command_rx, events));

        Self { command_tx }
    }

    /// Sends wire text to the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the socket task is gone.
    pub fn send(&self, text: String) -> Result<()> {
        self.command_tx
            .send(SocketCommand::Send(text))
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Requests closure.
    ///
    /// The eventual [`SocketEvent::Closed`] is handled like any other event.
    pub fn close(&self) {
        let _ = self.command_tx.send(SocketCommand::Close);
    }

    /// Socket task: handshake, then pump messages both ways.
    async fn run(
        url: Url,
        mut command_rx: mpsc::UnboundedReceiver<SocketCommand>,
        events: mpsc::UnboundedSender<SocketEvent>,
    ) {
        let ws_stream = match connect_async(url.as_str()).await {
            Ok((stream, _response)) => stream,
            Err(e) => {
                warn!(url = %url, error = %e, "WebSocket handshake failed");
                let _ = events.send(SocketEvent::Error(e.to_string()));
                let _ = events.send(SocketEvent::Closed);
                return;
            }
        };

        debug!(url = %url, "WebSocket connection established");
        let _ = events.send(SocketEvent::Opened);

        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Incoming messages from the remote service
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            trace!(len = text.len(), "message received");
                            let _ = events.send(SocketEvent::Message(text.to_string()));
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            let _ = events.send(SocketEvent::Error(e.to_string()));
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from the session loop
                command = command_rx.recv() => {
                    match command {
                        Some(SocketCommand::Send(text)) => {
                            trace!(len = text.len(), "sending wire text");
                            if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                                error!(error = %e, "WebSocket send failed");
                                let _ = events.send(SocketEvent::Error(e.to_string()));
                                break;
                            }
                        }

                        Some(SocketCommand::Close) => {
                            debug!("Close requested");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        let _ = events.send(SocketEvent::Closed);
        debug!("Socket task terminated");
    }
}

// ============================================================================
// Tests
// ============================================================================
