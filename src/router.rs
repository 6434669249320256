//! Message router.
//!
//! Decodes each inbound frame and hands it to exactly one handler. Handlers
//! are the only code that mutates the [`ClientContext`]; every mutation is
//! reported to the [`Presenter`] before the next frame is processed.

use reversi_protocol::{
    GameSnapshot, JoinRoomResponse, LeaveRoomResponse, Player, ProtocolError, Registration,
    RoomUpdate, ServerAction, ServerMessage, decode_server_message,
};
use tracing::{debug, info, instrument, warn};

use crate::context::ClientContext;
use crate::error::ServerReportedError;
use crate::presenter::Presenter;
use crate::session::{RoomMembership, SessionState, TransitionRejected};

/// Result line shown when the local player wins.
pub const WIN_TEXT: &str = "You win!";
/// Result line shown when the local player loses.
pub const LOSE_TEXT: &str = "You lose!";
/// Result line shown on a draw.
pub const DRAW_TEXT: &str = "Draw game!";

fn dropped_frame_text(error: &ProtocolError) -> String {
    match error {
        ProtocolError::UnknownAction(action) => format!("Dropped unknown message {}", action),
        ProtocolError::MalformedMessage { context, .. } => {
            format!("Dropped malformed {} message", context)
        }
        ProtocolError::Encode { action, .. } => format!("Dropped {} message", action),
    }
}

/// Routes server messages into the client context.
#[derive(Debug)]
pub struct Router<P> {
    context: ClientContext,
    presenter: P,
}

impl<P: Presenter> Router<P> {
    /// Creates a router with an unregistered context.
    pub fn new(presenter: P) -> Self {
        Self {
            context: ClientContext::new(),
            presenter,
        }
    }

    /// Client state.
    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Forwards a line to the message log.
    pub fn log(&mut self, text: &str) {
        self.presenter.on_log(text);
    }

    /// Starts a fresh session for a new connection as `name`.
    ///
    /// Clears the room list and any snapshot so nothing from an earlier
    /// connection leaks into the new one.
    #[instrument(skip(self))]
    pub fn begin_session(&mut self, name: &str) {
        let state = self.context.session_mut().begin_registration(name);
        self.context.rooms_mut().clear();
        self.context.set_snapshot(None);
        self.presenter.on_rooms_changed(self.context.rooms().list());
        self.notify_transition(state);
    }

    /// Decodes and dispatches one frame.
    ///
    /// Undecodable frames are logged, reported to the message log, and
    /// dropped; the context is untouched.
    /// The error is returned for the caller's information only.
    #[instrument(skip_all, fields(len = frame.len()))]
    pub fn dispatch_frame(&mut self, frame: &str) -> Result<ServerAction, ProtocolError> {
        match decode_server_message(frame) {
            Ok(message) => {
                let action = message.action();
                self.dispatch(message);
                Ok(action)
            }
            Err(e) => {
                warn!(error = %e, "Dropping undecodable frame");
                self.presenter.on_log(&dropped_frame_text(&e));
                Err(e)
            }
        }
    }

    /// Dispatches one decoded message to its handler.
    #[instrument(skip_all, fields(action = %message.action(), state = %self.context.session().state()))]
    pub fn dispatch(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::SendMessage(text) => self.on_send_message(&text),
            ServerMessage::RoomUpdated(update) => self.on_room_updated(&update),
            ServerMessage::RegisterResponse(registration) => self.on_register(registration),
            ServerMessage::JoinRoomResponse(response) => self.on_join_room(response),
            ServerMessage::LeaveRoomResponse(response) => self.on_leave_room(&response),
            ServerMessage::GameError(text) => self.on_game_error(&text),
            ServerMessage::GameState(snapshot) => self.on_game_state(snapshot),
            ServerMessage::GameResult(winner) => self.on_game_result(winner.as_deref()),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Handlers
    // ─────────────────────────────────────────────────────────────

    fn on_send_message(&mut self, text: &str) {
        debug!(text, "Server text");
        self.presenter.on_log(text);
    }

    fn on_room_updated(&mut self, update: &RoomUpdate) {
        self.context.rooms_mut().apply(update);
        self.presenter.on_rooms_changed(self.context.rooms().list());
    }

    fn on_register(&mut self, registration: Registration) {
        let player = Player {
            id: registration.id,
            name: registration.name,
        };
        match self.context.session_mut().complete_registration(player) {
            Ok(state) => {
                info!(player = ?self.context.session().player_id(), "Registered");
                self.context.rooms_mut().seed(registration.rooms);
                self.presenter.on_rooms_changed(self.context.rooms().list());
                self.notify_transition(state);
            }
            Err(rejected) => Self::ignore(&rejected),
        }
    }

    fn on_join_room(&mut self, response: JoinRoomResponse) {
        if !response.success {
            warn!(room = %response.room_uuid, "Join refused");
            return;
        }
        let room = RoomMembership {
            room_uuid: response.room_uuid,
            name: response.name,
        };
        match self.context.session_mut().enter_room(room) {
            Ok(state) => {
                self.context.set_snapshot(None);
                self.notify_transition(state);
            }
            Err(rejected) => Self::ignore(&rejected),
        }
    }

    fn on_leave_room(&mut self, response: &LeaveRoomResponse) {
        if !response.success {
            warn!(room = %response.room_uuid, "Leave refused");
            return;
        }
        match self.context.session_mut().leave_room(&response.room_uuid) {
            Ok(state) => {
                self.context.set_snapshot(None);
                self.notify_transition(state);
            }
            Err(rejected) => Self::ignore(&rejected),
        }
    }

    fn on_game_error(&mut self, text: &str) {
        let error = ServerReportedError(text.to_string());
        warn!(%error, "Command rejected by server");
        self.context.set_server_error(Some(error));
        self.presenter.on_log(text);
    }

    fn on_game_state(&mut self, snapshot: GameSnapshot) {
        let entered = match self.context.session_mut().observe_game_state() {
            Ok(entered) => entered,
            Err(rejected) => return Self::ignore(&rejected),
        };
        debug!(turn = snapshot.turn, current = %snapshot.current_player_id, "Snapshot stored");
        self.context.set_snapshot(Some(snapshot));
        if entered {
            self.notify_transition(SessionState::InGame);
        }
        if let Some(view) = self.context.view() {
            self.presenter.on_game_snapshot(&view);
        }
    }

    fn on_game_result(&mut self, winner: Option<&str>) {
        let state = match self.context.session_mut().finish_game() {
            Ok(state) => state,
            Err(rejected) => return Self::ignore(&rejected),
        };
        let text = match winner {
            None => DRAW_TEXT,
            Some(id) if Some(id) == self.context.session().player_id().map(String::as_str) => {
                WIN_TEXT
            }
            Some(_) => LOSE_TEXT,
        };
        info!(winner, result = text, "Game finished");
        self.context.set_snapshot(None);
        self.presenter.on_log(text);
        self.notify_transition(state);
    }

    fn notify_transition(&mut self, state: SessionState) {
        info!(%state, "Session transition");
        self.context.set_server_error(None);
        self.presenter
            .on_session_transition(state, self.context.session());
    }

    fn ignore(rejected: &TransitionRejected) {
        warn!(%rejected, "Message does not apply in this state");
    }
}
