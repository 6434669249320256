//! Reversi client library - session and protocol engine for a two-player room service
//!
//! The client connects to a room server over a WebSocket, registers under a
//! display name, browses and joins rooms, and plays reversi. The server owns
//! all game rules; the client only mirrors state and gates commands.
//!
//! # Architecture
//!
//! - **Connection**: one logical socket, generation-stamped events
//! - **Router**: decodes frames and drives every state change
//! - **Session**: `Unregistered → Registering → Registered ⇄ InRoom ⇄ InGame`
//! - **Rooms**: insertion-ordered mirror of the server's room list
//! - **Projector**: snapshot → render-ready board with selectable cells
//! - **Commands**: precondition-checked outbound commands
//! - **Presenter**: the only way state reaches a UI
//!
//! # Example
//!
//! ```no_run
//! use reversi_client::{Client, ConnectionManager, TracingPresenter, WebSocketTransport};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (transport, mut events) = WebSocketTransport::channel();
//! let connection = ConnectionManager::new("ws://localhost:8080/ws", transport);
//! let mut client = Client::new(connection, TracingPresenter::new());
//!
//! client.connect("Alice")?;
//! while let Some(event) = events.recv().await {
//!     client.handle_event(event);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod commands;
mod config;
mod connection;
mod context;
mod error;
mod presenter;
mod projector;
mod rooms;
mod router;
mod session;

// Crate-level exports - Client facade
pub use client::{Client, UserIntent};

// Crate-level exports - Connection
pub use connection::{
    ConnectionEvent, ConnectionManager, ConnectionState, Generation, Transport, WebSocketTransport,
};

// Crate-level exports - Errors
pub use error::{ClientError, ServerReportedError, StateError, TransportError};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Session and state
pub use context::ClientContext;
pub use rooms::RoomRegistry;
pub use session::{RoomMembership, Session, SessionState, TransitionRejected};

// Crate-level exports - Routing and presentation
pub use presenter::{Presenter, TracingPresenter};
pub use router::{DRAW_TEXT, LOSE_TEXT, Router, WIN_TEXT};

// Crate-level exports - Projection and commands
pub use commands::{CommandBuilder, DEFAULT_ROOM_NAME};
pub use projector::{CellView, GameView, PlayerPanel, Side, project};
