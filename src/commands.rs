//! Command builder.
//!
//! Every outbound command is checked against the session before it is
//! built. A command that fails its precondition never produces a
//! [`ClientMessage`], so it can never reach the connection.
//!
//! | Command     | Required state | Extra checks                         |
//! |-------------|----------------|--------------------------------------|
//! | create room | `Registered`   | blank name becomes [`DEFAULT_ROOM_NAME`] |
//! | join room   | `Registered`   | room listed and not full             |
//! | leave room  | `InRoom`       |                                      |
//! | start game  | `InRoom`       |                                      |
//! | make move   | `InGame`       | local turn, cell selectable          |

use reversi_protocol::{
    ClientAction, ClientMessage, JoinRoomRequest, MakeMoveRequest, Point, RoomRequest,
};
use tracing::{debug, instrument};

use crate::context::ClientContext;
use crate::error::StateError;
use crate::session::{RoomMembership, SessionState};

/// Name used when a room is created with a blank name.
pub const DEFAULT_ROOM_NAME: &str = "Untitled Room";

/// Builds outbound commands from the current [`ClientContext`].
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    context: &'a ClientContext,
}

impl<'a> CommandBuilder<'a> {
    /// Creates a builder over a context.
    pub fn new(context: &'a ClientContext) -> Self {
        Self { context }
    }

    fn require(&self, command: ClientAction, state: SessionState) -> Result<(), StateError> {
        let current = self.context.session().state();
        if current != state {
            return Err(StateError::WrongState {
                command,
                state: current,
            });
        }
        Ok(())
    }

    fn seated_room(&self, command: ClientAction) -> Result<&'a RoomMembership, StateError> {
        self.context
            .session()
            .room()
            .ok_or(StateError::WrongState {
                command,
                state: self.context.session().state(),
            })
    }

    /// `JOIN_ROOM` with no room id: asks the server to create a room.
    #[instrument(skip(self))]
    pub fn create_room(&self, name: &str) -> Result<ClientMessage, StateError> {
        self.require(ClientAction::JoinRoom, SessionState::Registered)?;
        let name = match name.trim() {
            "" => DEFAULT_ROOM_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        debug!(%name, "Create room command built");
        Ok(ClientMessage::JoinRoom(JoinRoomRequest {
            room_uuid: None,
            name,
        }))
    }

    /// `JOIN_ROOM` for a listed room with a free seat.
    #[instrument(skip(self))]
    pub fn join_room(&self, room_uuid: &str) -> Result<ClientMessage, StateError> {
        self.require(ClientAction::JoinRoom, SessionState::Registered)?;
        let room = self
            .context
            .rooms()
            .get(room_uuid)
            .ok_or_else(|| StateError::UnknownRoom(room_uuid.to_string()))?;
        if room.is_full() {
            return Err(StateError::RoomFull(room.name.clone()));
        }
        Ok(ClientMessage::JoinRoom(JoinRoomRequest {
            room_uuid: Some(room.room_uuid.clone()),
            name: room.name.clone(),
        }))
    }

    /// `LEAVE_ROOM` for the current room.
    #[instrument(skip(self))]
    pub fn leave_room(&self) -> Result<ClientMessage, StateError> {
        self.require(ClientAction::LeaveRoom, SessionState::InRoom)?;
        let room = self.seated_room(ClientAction::LeaveRoom)?;
        Ok(ClientMessage::LeaveRoom(RoomRequest {
            room_uuid: room.room_uuid.clone(),
        }))
    }

    /// `START_GAME` for the current room.
    ///
    /// Whether the room has two players is left to the server, which
    /// answers with `GAME_ERROR` otherwise.
    #[instrument(skip(self))]
    pub fn start_game(&self) -> Result<ClientMessage, StateError> {
        self.require(ClientAction::StartGame, SessionState::InRoom)?;
        let room = self.seated_room(ClientAction::StartGame)?;
        Ok(ClientMessage::StartGame(RoomRequest {
            room_uuid: room.room_uuid.clone(),
        }))
    }

    /// `MAKE_MOVE` for a cell the local player may play now.
    #[instrument(skip(self, point), fields(point = %point))]
    pub fn make_move(&self, point: Point) -> Result<ClientMessage, StateError> {
        self.require(ClientAction::MakeMove, SessionState::InGame)?;
        let room = self.seated_room(ClientAction::MakeMove)?;
        let view = self.context.view().ok_or(StateError::NotYourTurn)?;
        if !*view.is_local_turn() {
            return Err(StateError::NotYourTurn);
        }
        if !view.is_selectable(point) {
            return Err(StateError::MoveNotSelectable(point));
        }
        Ok(ClientMessage::MakeMove(MakeMoveRequest {
            room_uuid: room.room_uuid.clone(),
            point,
        }))
    }
}
