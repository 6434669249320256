//! Wire protocol for the Reversi room service.
//!
//! This crate defines the envelope, the typed payloads, and the codec used by
//! the client engine. It performs no I/O and has no async runtime dependency.
//!
//! # Coordinates
//!
//! [`Point`] uses `x` for the column and `y` for the row on the wire and in
//! every view derived from it. Board cells are addressed `board[y][x]`.
//!
//! # Example
//!
//! ```
//! use reversi_protocol::{ServerMessage, decode_server_message};
//!
//! let frame = r#"{"action":"SEND_MESSAGE","message":"Alice join the room"}"#;
//! let message = decode_server_message(frame).unwrap();
//! assert_eq!(message, ServerMessage::SendMessage("Alice join the room".into()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod message;
mod types;

// Crate-level exports - Codec
pub use codec::{
    decode_client_message, decode_server_message, encode_client_message, encode_server_message,
};

// Crate-level exports - Errors
pub use error::ProtocolError;

// Crate-level exports - Messages
pub use message::{
    ClientAction, ClientMessage, JoinRoomRequest, JoinRoomResponse, LeaveRoomResponse,
    MakeMoveRequest, Registration, RoomAction, RoomRequest, RoomUpdate, ServerAction,
    ServerMessage,
};

// Crate-level exports - Data model
pub use types::{
    BOARD_SIZE, Board, GameSnapshot, GameStatePlayer, Player, PlayerId, Point, ROOM_CAPACITY,
    Room, RoomId, Token,
};
