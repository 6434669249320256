//! Client-side state shared by the router and the command builder.

use derive_getters::Getters;
use reversi_protocol::GameSnapshot;

use crate::commands::CommandBuilder;
use crate::error::ServerReportedError;
use crate::projector::{GameView, project};
use crate::rooms::RoomRegistry;
use crate::session::Session;

/// Everything the client knows about its session.
///
/// Only the router mutates it; presentation reads it.
#[derive(Debug, Clone, Default, Getters)]
pub struct ClientContext {
    /// Session state machine.
    session: Session,
    /// Mirror of the server's room list.
    rooms: RoomRegistry,
    /// Latest game snapshot, present only while a game runs.
    snapshot: Option<GameSnapshot>,
    /// Last `GAME_ERROR` since the most recent session transition.
    server_error: Option<ServerReportedError>,
}

impl ClientContext {
    /// Creates an unregistered context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Command builder gated by this context.
    pub fn commands(&self) -> CommandBuilder<'_> {
        CommandBuilder::new(self)
    }

    /// Projection of the latest snapshot for the local player.
    pub fn view(&self) -> Option<GameView> {
        let snapshot = self.snapshot.as_ref()?;
        let local_id = self.session.player_id()?;
        Some(project(snapshot, local_id))
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut RoomRegistry {
        &mut self.rooms
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Option<GameSnapshot>) {
        self.snapshot = snapshot;
    }

    pub(crate) fn set_server_error(&mut self, error: Option<ServerReportedError>) {
        self.server_error = error;
    }
}
