//! Console handle and event loop.
//!
//! `Console` is the embedder-facing surface: a cheap, cloneable handle whose
//! methods enqueue operator commands, plus a spawned tokio task that drives
//! the [`Session`] core and executes its I/O effects against the live
//! socket.
//!
//! # Event Loop
//!
//! The loop `select!`s over two channels:
//!
//! - Operator commands from the handle (connect, disconnect, submit, recall)
//! - Socket lifecycle events from the transport task
//!
//! Reactions are discrete and non-overlapping, so transcript order equals
//! delivery order.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::history::HistoryDirection;
use crate::storage::{FileStore, HistoryStore, MemoryStore};
use crate::transport::{ConnectionTarget, Socket, SocketEvent};

use super::event::ConsoleEvent;
use super::session::{Effect, Session};
use super::state::ConnectionState;

// ============================================================================
// ConsoleConfig
// ============================================================================

/// Console configuration.
///
/// # Example
///
/// ```ignore
/// use ws_console::ConsoleConfig;
///
/// let config = ConsoleConfig::new().with_query("?debug=1");
/// let (console, events) = ws_console::Console::spawn(config);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Diagnostic query string appended verbatim to the transport URL,
    /// leading `?` included.
    pub query: Option<String>,

    /// Override for the history store file location.
    pub history_path: Option<std::path::PathBuf>,
}

impl ConsoleConfig {
    /// Creates a default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic query string.
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the history store file location.
    #[inline]
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }
}

// ============================================================================
// ConsoleCommand
// ============================================================================

/// Operator commands accepted by the event loop.
enum ConsoleCommand {
    /// Connect to a target.
    Connect(ConnectionTarget),
    /// Disconnect the live socket.
    Disconnect,
    /// Submit one raw line.
    Submit(String),
    /// Recall history in a direction.
    Navigate(HistoryDirection),
    /// Tear the console down.
    Shutdown,
}

// ============================================================================
// Console
// ============================================================================

/// Handle to a running console session.
///
/// # Thread Safety
///
/// `Console` is `Send + Sync` and can be shared across tasks. All methods
/// are non-blocking; they enqueue work for the event loop.
pub struct Console {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConsoleCommand>,
    /// State mirror updated by the event loop.
    state: Arc<Mutex<ConnectionState>>,
}

impl Clone for Console {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl Console {
    /// Spawns a console with the default durable history store.
    ///
    /// The store lives at [`ConsoleConfig::history_path`], falling back to
    /// the platform data directory; with neither available the history is
    /// kept in memory for the session only. Returns the handle and the
    /// UI-facing event stream.
    #[must_use]
    pub fn spawn(config: ConsoleConfig) -> (Self, mpsc::UnboundedReceiver<ConsoleEvent>) {
        let store: Box<dyn HistoryStore> = match config
            .history_path
            .clone()
            .or_else(FileStore::default_path)
        {
            Some(path) => Box::new(FileStore::new(path)),
            None => {
                warn!("no data directory, history will not survive this session");
                Box::new(MemoryStore::new())
            }
        };

        Self::spawn_with_store(config, store)
    }

    /// Spawns a console backed by an explicit history store.
    #[must_use]
    pub fn spawn_with_store(
        config: ConsoleConfig,
        store: Box<dyn HistoryStore>,
    ) -> (Self, mpsc::UnboundedReceiver<ConsoleEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(ConnectionState::Idle));

        let session = Session::new(store, config.query, event_tx);

        tokio::spawn(Self::run_event_loop(session, command_rx, Arc::clone(&state)));

        (Self { command_tx, state }, event_rx)
    }

    /// Requests a connection to `target`.
    ///
    /// A no-op while a socket is already live.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the console was shut down.
    pub fn connect(&self, target: ConnectionTarget) -> Result<()> {
        self.send_command(ConsoleCommand::Connect(target))
    }

    /// Requests disconnection of the live socket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the console was shut down.
    pub fn disconnect(&self) -> Result<()> {
        self.send_command(ConsoleCommand::Disconnect)
    }

    /// Submits one raw operator line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the console was shut down.
    pub fn submit(&self, line: impl Into<String>) -> Result<()> {
        self.send_command(ConsoleCommand::Submit(line.into()))
    }

    /// Recalls history in `direction`; the selected text arrives as a
    /// [`ConsoleEvent::HistoryNavigate`] event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the console was shut down.
    pub fn navigate(&self, direction: HistoryDirection) -> Result<()> {
        self.send_command(ConsoleCommand::Navigate(direction))
    }

    /// Shuts the console down, closing any live socket.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConsoleCommand::Shutdown);
    }

    /// Returns the last connection state published by the event loop.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Enqueues a command for the event loop.
    fn send_command(&self, command: ConsoleCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Event loop driving the session core.
    async fn run_event_loop(
        mut session: Session,
        mut command_rx: mpsc::UnboundedReceiver<ConsoleCommand>,
        state: Arc<Mutex<ConnectionState>>,
    ) {
        let (socket_tx, mut socket_rx) = mpsc::unbounded_channel();
        let mut socket: Option<Socket> = None;

        loop {
            tokio::select! {
                // Operator commands from the handle
                command = command_rx.recv() => {
                    match command {
                        Some(ConsoleCommand::Connect(target)) => {
                            if let Some(Effect::Open(url)) = session.request_connect(&target) {
                                socket = Some(Socket::open(url, socket_tx.clone()));
                            }
                        }

                        Some(ConsoleCommand::Disconnect) => {
                            if session.request_disconnect() == Some(Effect::Close)
                                && let Some(live) = &socket
                            {
                                live.close();
                            }
                        }

                        Some(ConsoleCommand::Submit(line)) => {
                            if let Some(Effect::Send(wire)) = session.submit_line(&line)
                                && let Some(live) = &socket
                                && live.send(wire).is_err()
                            {
                                // The socket task is gone; its Closed event
                                // is already queued behind this command.
                                warn!("send raced socket teardown");
                            }
                        }

                        Some(ConsoleCommand::Navigate(direction)) => {
                            session.navigate_history(direction);
                        }

                        Some(ConsoleCommand::Shutdown) | None => {
                            debug!("console shutting down");
                            if let Some(live) = &socket {
                                live.close();
                            }
                            break;
                        }
                    }
                }

                // Lifecycle events from the socket task
                event = socket_rx.recv() => {
                    // recv cannot yield None while socket_tx is held above.
                    if let Some(event) = event {
                        let closed = event == SocketEvent::Closed;
                        session.handle_socket_event(event);
                        if closed {
                            socket = None;
                        }
                    }
                }
            }

            *state.lock() = session.state();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::tungstenite::Message;

    use crate::console::transcript::{EntryKind, TranscriptEntry};

    /// One-connection echo server; forwards every received text frame to
    /// the returned channel and echoes it back.
    async fn spawn_echo_server() -> (u16, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(stream).await.expect("upgrade");
            while let Some(Ok(message)) = ws.next().await {
                match message {
                    Message::Text(text) => {
                        let _ = seen_tx.send(text.to_string());
                        if ws.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        });

        (port, seen_rx)
    }

    async fn next_event(events: &mut mpsc::UnboundedReceiver<ConsoleEvent>) -> ConsoleEvent {
        timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event within timeout")
            .expect("event stream alive")
    }

    fn spawn_console() -> (Console, mpsc::UnboundedReceiver<ConsoleEvent>) {
        Console::spawn_with_store(ConsoleConfig::new(), Box::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_connect_open_submit_roundtrip() {
        let (port, mut seen_rx) = spawn_echo_server().await;
        let (console, mut events) = spawn_console();

        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");

        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Connecting)
        );
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Open)
        );
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Connected!"))
        );
        assert_eq!(console.state(), ConnectionState::Open);

        console.submit(r#"ping:{"n":1}"#).expect("submit");

        let wire = r#"{"command":"ping","data":{"n":1}}"#;
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::written(wire))
        );

        // The exact wire text reaches the service and echoes back verbatim.
        let received = timeout(Duration::from_secs(5), seen_rx.recv())
            .await
            .expect("server sees frame")
            .expect("server alive");
        assert_eq!(received, wire);

        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::read(wire))
        );

        console.shutdown();
    }

    #[tokio::test]
    async fn test_disconnect_emits_closing_then_closed() {
        let (port, _seen_rx) = spawn_echo_server().await;
        let (console, mut events) = spawn_console();

        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");

        // Drain through the open handshake.
        loop {
            if next_event(&mut events).await
                == ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Connected!"))
            {
                break;
            }
        }

        console.disconnect().expect("disconnect");

        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Closing)
        );
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Closed)
        );
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Disconnected!"))
        );
        assert_eq!(console.state(), ConnectionState::Closed);

        console.shutdown();
    }

    #[tokio::test]
    async fn test_handshake_failure_surfaces_error_and_status() {
        // Bind and drop a listener so the port refuses connections.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let (console, mut events) = spawn_console();
        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");

        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Connecting)
        );
        match next_event(&mut events).await {
            ConsoleEvent::TranscriptAppend(entry) => assert_eq!(entry.kind, EntryKind::Error),
            other => panic!("expected error entry, got {other:?}"),
        }
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::StateChange(ConnectionState::Closed)
        );
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Disconnected!"))
        );

        console.shutdown();
    }

    #[tokio::test]
    async fn test_parse_failure_never_reaches_the_wire() {
        let (port, mut seen_rx) = spawn_echo_server().await;
        let (console, mut events) = spawn_console();

        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");
        loop {
            if next_event(&mut events).await
                == ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Connected!"))
            {
                break;
            }
        }

        console.submit("ping").expect("submit");
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::TranscriptAppend(TranscriptEntry::error("Cannot parse: ping"))
        );

        // A valid frame afterwards is the first thing the server sees.
        console.submit("ok:1").expect("submit");
        let received = timeout(Duration::from_secs(5), seen_rx.recv())
            .await
            .expect("server sees frame")
            .expect("server alive");
        assert_eq!(received, r#"{"command":"ok","data":1}"#);

        console.shutdown();
    }

    #[tokio::test]
    async fn test_navigate_round_trips_history() {
        let (console, mut events) = spawn_console();

        console.submit("a:1").expect("submit");
        // Not connected: the line still lands in history.
        match next_event(&mut events).await {
            ConsoleEvent::TranscriptAppend(entry) => assert_eq!(entry.kind, EntryKind::Error),
            other => panic!("expected error entry, got {other:?}"),
        }

        console.navigate(HistoryDirection::Previous).expect("navigate");
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::HistoryNavigate("a:1".to_string())
        );

        console.navigate(HistoryDirection::Next).expect("navigate");
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::HistoryNavigate(String::new())
        );

        console.shutdown();
    }

    #[tokio::test]
    async fn test_history_survives_console_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        let (console, mut events) =
            Console::spawn_with_store(ConsoleConfig::new(), Box::new(FileStore::new(&path)));
        console.submit("persisted:1").expect("submit");
        let _ = next_event(&mut events).await;
        console.shutdown();

        let (console, mut events) =
            Console::spawn_with_store(ConsoleConfig::new(), Box::new(FileStore::new(&path)));
        console.navigate(HistoryDirection::Previous).expect("navigate");
        assert_eq!(
            next_event(&mut events).await,
            ConsoleEvent::HistoryNavigate("persisted:1".to_string())
        );

        console.shutdown();
    }

    #[tokio::test]
    async fn test_connect_while_open_spawns_nothing() {
        let (port, _seen_rx) = spawn_echo_server().await;
        let (console, mut events) = spawn_console();

        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");
        loop {
            if next_event(&mut events).await
                == ConsoleEvent::TranscriptAppend(TranscriptEntry::status("Connected!"))
            {
                break;
            }
        }

        console
            .connect(ConnectionTarget::new("127.0.0.1", port, false))
            .expect("connect");
        console.submit("still:1").expect("submit");

        // The duplicate connect produced no events; the next one is the
        // submit's written entry.
        match next_event(&mut events).await {
            ConsoleEvent::TranscriptAppend(entry) => {
                assert_eq!(entry.kind, EntryKind::Written);
            }
            other => panic!("expected written entry, got {other:?}"),
        }
        assert_eq!(console.state(), ConnectionState::Open);

        console.shutdown();
    }
}
