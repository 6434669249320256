//! Error taxonomy for the client engine.
//!
//! None of these terminate the process. Protocol errors are dropped with a
//! log line, state errors stop a command before it reaches the transport,
//! server-reported errors are forwarded verbatim, and transport errors block
//! sends until the next `connect`.

use derive_more::{Display, From};
use reversi_protocol::{ClientAction, Point, ProtocolError, RoomId};

use crate::session::SessionState;

/// Failure at the connection boundary.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TransportError {
    /// A send was attempted without an open connection.
    #[display("Not connected to the server")]
    NotConnected,

    /// `connect` was called while a connection is open or opening.
    #[display("Already connected to the server")]
    AlreadyConnected,

    /// The configured server address cannot carry a handshake.
    #[display("Invalid server address {:?}: {}", address, reason)]
    InvalidAddress {
        /// Address as configured.
        address: String,
        /// Parser message.
        reason: String,
    },
}

impl std::error::Error for TransportError {}

/// A command attempted from a session state that forbids it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StateError {
    /// The session is not in the state the command requires.
    #[display("Cannot send {} while {}", command, state)]
    WrongState {
        /// Rejected command.
        command: ClientAction,
        /// State the session was in.
        state: SessionState,
    },

    /// A move was attempted while the other player is to move.
    #[display("It is not your turn")]
    NotYourTurn,

    /// The cell is not in the local player's legal moves.
    #[display("{} is not a playable cell", _0)]
    MoveNotSelectable(Point),

    /// The room is not in the local room list.
    #[display("Room {} is not listed", _0)]
    UnknownRoom(RoomId),

    /// The room already seats two players.
    #[display("Room {:?} is full", _0)]
    RoomFull(String),
}

impl std::error::Error for StateError {}

/// Explicit `GAME_ERROR` text from the server.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Server error: {}", _0)]
pub struct ServerReportedError(pub String);

impl std::error::Error for ServerReportedError {}

/// Any error surfaced by the client facade.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ClientError {
    /// Connection problem.
    #[display("{}", _0)]
    Transport(TransportError),

    /// Undecodable frame.
    #[display("{}", _0)]
    Protocol(ProtocolError),

    /// Command rejected locally.
    #[display("{}", _0)]
    State(StateError),

    /// Command rejected by the server.
    #[display("{}", _0)]
    ServerReported(ServerReportedError),
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Protocol(e) => Some(e),
            ClientError::State(e) => Some(e),
            ClientError::ServerReported(e) => Some(e),
        }
    }
}
