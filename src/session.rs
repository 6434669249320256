//! Session state machine.
//!
//! ```text
//! Unregistered ──connect──▶ Registering ──REGISTER_RESPONSE──▶ Registered
//!                                         ▲                      │
//!                                         │            JOIN_ROOM_RESPONSE
//!                              LEAVE_ROOM_RESPONSE               ▼
//!                                         └────────────────── InRoom
//!                                                              │   ▲
//!                                                   GAME_STATE │   │ GAME_RESULT
//!                                                              ▼   │
//!                                                              InGame
//! ```
//!
//! The player identity exists from `Registered` onwards and the room
//! membership exists exactly in `InRoom` and `InGame`; both are carried by
//! the variants so neither can be observed in the wrong state.

use derive_more::Display;
use reversi_protocol::{Player, PlayerId, RoomId};
use tracing::{debug, instrument};

/// Discriminant of [`Session`], cheap to copy into logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SessionState {
    /// No connection has been requested.
    Unregistered,
    /// Handshake sent, waiting for `REGISTER_RESPONSE`.
    Registering,
    /// Registered and browsing rooms.
    Registered,
    /// Seated in a room, no game running.
    InRoom,
    /// Seated in a room with a game running.
    InGame,
}

/// The room the local player sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMembership {
    /// Room key.
    pub room_uuid: RoomId,
    /// Room name as confirmed by the server.
    pub name: String,
}

/// Client session with its state-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// Initial state.
    #[default]
    Unregistered,
    /// Waiting for the server to register `name`.
    Registering {
        /// Requested display name.
        name: String,
    },
    /// Registered player without a room.
    Registered {
        /// Local player.
        player: Player,
    },
    /// Seated in a room.
    InRoom {
        /// Local player.
        player: Player,
        /// Current room.
        room: RoomMembership,
    },
    /// Playing in a room.
    InGame {
        /// Local player.
        player: Player,
        /// Current room.
        room: RoomMembership,
    },
}

/// A trigger that does not apply in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{} ignored while {}", trigger, state)]
pub struct TransitionRejected {
    /// Name of the trigger.
    pub trigger: &'static str,
    /// State the session stayed in.
    pub state: SessionState,
}

impl std::error::Error for TransitionRejected {}

impl Session {
    /// Current state.
    pub fn state(&self) -> SessionState {
        match self {
            Session::Unregistered => SessionState::Unregistered,
            Session::Registering { .. } => SessionState::Registering,
            Session::Registered { .. } => SessionState::Registered,
            Session::InRoom { .. } => SessionState::InRoom,
            Session::InGame { .. } => SessionState::InGame,
        }
    }

    /// The local player, once registered.
    pub fn player(&self) -> Option<&Player> {
        match self {
            Session::Registered { player }
            | Session::InRoom { player, .. }
            | Session::InGame { player, .. } => Some(player),
            Session::Unregistered | Session::Registering { .. } => None,
        }
    }

    /// The local player's id, once registered.
    pub fn player_id(&self) -> Option<&PlayerId> {
        self.player().map(|p| &p.id)
    }

    /// The current room, while seated.
    pub fn room(&self) -> Option<&RoomMembership> {
        match self {
            Session::InRoom { room, .. } | Session::InGame { room, .. } => Some(room),
            _ => None,
        }
    }

    fn reject(&self, trigger: &'static str) -> TransitionRejected {
        TransitionRejected {
            trigger,
            state: self.state(),
        }
    }

    /// Starts a fresh session for a new connection.
    ///
    /// Whatever the previous state, the result is `Registering`; a new
    /// connection always means a new registration.
    #[instrument(skip(self, name), fields(from = %self.state()))]
    pub fn begin_registration(&mut self, name: impl Into<String>) -> SessionState {
        *self = Session::Registering { name: name.into() };
        debug!("Session reset for registration");
        self.state()
    }

    /// `Registering → Registered`.
    ///
    /// A player with a blank name takes the name sent in the handshake.
    #[instrument(skip(self), fields(from = %self.state()))]
    pub fn complete_registration(
        &mut self,
        mut player: Player,
    ) -> Result<SessionState, TransitionRejected> {
        match self {
            Session::Registering { name } => {
                if player.name.is_empty() {
                    player.name = std::mem::take(name);
                }
                *self = Session::Registered { player };
                Ok(self.state())
            }
            _ => Err(self.reject("REGISTER_RESPONSE")),
        }
    }

    /// `Registered → InRoom`.
    #[instrument(skip(self), fields(from = %self.state()))]
    pub fn enter_room(&mut self, room: RoomMembership) -> Result<SessionState, TransitionRejected> {
        match std::mem::take(self) {
            Session::Registered { player } => {
                *self = Session::InRoom { player, room };
                Ok(self.state())
            }
            other => {
                *self = other;
                Err(self.reject("JOIN_ROOM_RESPONSE"))
            }
        }
    }

    /// `InRoom → Registered`, only for the room the player sits in.
    #[instrument(skip(self), fields(from = %self.state()))]
    pub fn leave_room(&mut self, room_uuid: &str) -> Result<SessionState, TransitionRejected> {
        match std::mem::take(self) {
            Session::InRoom { player, room } if room.room_uuid == room_uuid => {
                *self = Session::Registered { player };
                Ok(self.state())
            }
            other => {
                *self = other;
                Err(self.reject("LEAVE_ROOM_RESPONSE"))
            }
        }
    }

    /// `InRoom → InGame` on the first snapshot; `InGame` stays put.
    ///
    /// Returns true when the state changed.
    #[instrument(skip(self), fields(from = %self.state()))]
    pub fn observe_game_state(&mut self) -> Result<bool, TransitionRejected> {
        match std::mem::take(self) {
            Session::InRoom { player, room } => {
                *self = Session::InGame { player, room };
                Ok(true)
            }
            other @ Session::InGame { .. } => {
                *self = other;
                Ok(false)
            }
            other => {
                *self = other;
                Err(self.reject("GAME_STATE"))
            }
        }
    }

    /// `InGame → InRoom`.
    #[instrument(skip(self), fields(from = %self.state()))]
    pub fn finish_game(&mut self) -> Result<SessionState, TransitionRejected> {
        match std::mem::take(self) {
            Session::InGame { player, room } => {
                *self = Session::InRoom { player, room };
                Ok(self.state())
            }
            other => {
                *self = other;
                Err(self.reject("GAME_RESULT"))
            }
        }
    }
}
