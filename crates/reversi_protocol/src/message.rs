//! Envelope vocabulary for client-server communication.
//!
//! Every frame is a JSON object `{ "action": <discriminator>, "message": <payload> }`.
//! Two closed enums cover the whole protocol:
//! - [`ClientMessage`]: commands sent by this client.
//! - [`ServerMessage`]: pushes and responses sent by the server.
//!
//! [`ClientAction`] and [`ServerAction`] are the bare discriminators, used by
//! the codec to tell an unknown action apart from a malformed payload.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::{GameSnapshot, Point, Room, RoomId, null_as_empty};

/// Discriminators of outbound commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientAction {
    /// Join an existing room or create a new one.
    JoinRoom,
    /// Leave the current room.
    LeaveRoom,
    /// Start a match in the current room.
    StartGame,
    /// Place a token.
    MakeMove,
}

/// Discriminators of inbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerAction {
    /// Free-form text for the message log.
    SendMessage,
    /// A room was added, updated, or deleted.
    RoomUpdated,
    /// Answer to the implicit registration in the handshake.
    RegisterResponse,
    /// Answer to a join-room command.
    JoinRoomResponse,
    /// Answer to a leave-room command.
    LeaveRoomResponse,
    /// Server-side rejection of a command.
    GameError,
    /// Authoritative game snapshot.
    GameState,
    /// End of a match.
    GameResult,
}

// ─────────────────────────────────────────────────────────────
//  Outbound
// ─────────────────────────────────────────────────────────────

/// Payload of `JOIN_ROOM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    /// Room to join; `None` asks the server to create a room named `name`.
    #[serde(rename = "roomUUID")]
    pub room_uuid: Option<RoomId>,
    /// Room name.
    pub name: String,
}

/// Payload of `LEAVE_ROOM` and `START_GAME`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    /// Target room.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
}

/// Payload of `MAKE_MOVE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// Room the game runs in.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
    /// Cell to play, `x` = column and `y` = row.
    pub point: Point,
}

/// Commands sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// `JOIN_ROOM`
    JoinRoom(JoinRoomRequest),
    /// `LEAVE_ROOM`
    LeaveRoom(RoomRequest),
    /// `START_GAME`
    StartGame(RoomRequest),
    /// `MAKE_MOVE`
    MakeMove(MakeMoveRequest),
}

impl ClientMessage {
    /// Discriminator of this command.
    pub fn action(&self) -> ClientAction {
        match self {
            ClientMessage::JoinRoom(_) => ClientAction::JoinRoom,
            ClientMessage::LeaveRoom(_) => ClientAction::LeaveRoom,
            ClientMessage::StartGame(_) => ClientAction::StartGame,
            ClientMessage::MakeMove(_) => ClientAction::MakeMove,
        }
    }

    /// Room the command targets, if it names one.
    pub fn room_uuid(&self) -> Option<&str> {
        match self {
            ClientMessage::JoinRoom(req) => req.room_uuid.as_deref(),
            ClientMessage::LeaveRoom(req) | ClientMessage::StartGame(req) => Some(&req.room_uuid),
            ClientMessage::MakeMove(req) => Some(&req.room_uuid),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Inbound
// ─────────────────────────────────────────────────────────────

/// Kind of change carried by `ROOM_UPDATED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomAction {
    /// New room.
    Added,
    /// Existing room changed (usually its count).
    Updated,
    /// Room removed.
    Deleted,
}

/// Payload of `ROOM_UPDATED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUpdate {
    /// Room key.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
    /// Change kind.
    pub action: RoomAction,
    /// Room name; may be absent on deletion.
    #[serde(default)]
    pub name: String,
    /// Seated players; may be absent on deletion.
    #[serde(default)]
    pub count: u8,
}

impl RoomUpdate {
    /// The room entry this update describes.
    pub fn room(&self) -> Room {
        Room {
            room_uuid: self.room_uuid.clone(),
            name: self.name.clone(),
            count: self.count,
        }
    }
}

/// Payload of `REGISTER_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Assigned player id.
    pub id: String,
    /// Name the server registered.
    #[serde(default)]
    pub name: String,
    /// Rooms that exist at registration time.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rooms: Vec<Room>,
}

fn default_success() -> bool {
    true
}

/// Payload of `JOIN_ROOM_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    /// Whether the join succeeded; absent means success.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Joined room.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
    /// Joined room's name.
    #[serde(default)]
    pub name: String,
}

/// Payload of `LEAVE_ROOM_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRoomResponse {
    /// Whether the leave succeeded; absent means success.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Room that was left.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
}

/// Messages sent by the server.
///
/// Only `Serialize` is derived; decoding goes through
/// [`decode_server_message`](crate::decode_server_message) so unknown and
/// malformed frames are reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// `SEND_MESSAGE`
    SendMessage(String),
    /// `ROOM_UPDATED`
    RoomUpdated(RoomUpdate),
    /// `REGISTER_RESPONSE`
    RegisterResponse(Registration),
    /// `JOIN_ROOM_RESPONSE`
    JoinRoomResponse(JoinRoomResponse),
    /// `LEAVE_ROOM_RESPONSE`
    LeaveRoomResponse(LeaveRoomResponse),
    /// `GAME_ERROR`
    GameError(String),
    /// `GAME_STATE`
    GameState(GameSnapshot),
    /// `GAME_RESULT`: the winner's id, or `None` for a draw.
    GameResult(Option<String>),
}

impl ServerMessage {
    /// Discriminator of this message.
    pub fn action(&self) -> ServerAction {
        match self {
            ServerMessage::SendMessage(_) => ServerAction::SendMessage,
            ServerMessage::RoomUpdated(_) => ServerAction::RoomUpdated,
            ServerMessage::RegisterResponse(_) => ServerAction::RegisterResponse,
            ServerMessage::JoinRoomResponse(_) => ServerAction::JoinRoomResponse,
            ServerMessage::LeaveRoomResponse(_) => ServerAction::LeaveRoomResponse,
            ServerMessage::GameError(_) => ServerAction::GameError,
            ServerMessage::GameState(_) => ServerAction::GameState,
            ServerMessage::GameResult(_) => ServerAction::GameResult,
        }
    }
}
