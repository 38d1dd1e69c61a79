//! WebSocket transport layer.
//!
//! This module owns the client side of the wire: building the transport URL
//! from operator-supplied settings and running the single live socket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Console loop   │    SocketEvent channel       │  Socket task    │
//! │                 │◄─────────────────────────────│                 │
//! │  Session core   │    send / close commands     │  tungstenite    │
//! │                 │─────────────────────────────►│  client stream  │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. [`ConnectionTarget::url`] - Build `{ws|wss}://host:port/websocket{query}`
//! 2. [`Socket::open`] - Spawn the socket task, handshake asynchronously
//! 3. [`SocketEvent::Opened`] / [`SocketEvent::Message`] flow back
//! 4. [`Socket::close`] - Request closure; [`SocketEvent::Closed`] follows
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `socket` | Socket task and lifecycle events |
//! | `target` | Connection target and URL building |

// ============================================================================
// Submodules
// ============================================================================

/// Socket task and lifecycle events.
pub mod socket;

/// Connection target and URL building.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

pub use socket::{Socket, SocketEvent};
pub use target::ConnectionTarget;
