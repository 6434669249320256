//! Presentation boundary.
//!
//! The engine never draws anything. It reports changes through a
//! [`Presenter`], which a terminal UI, a headless logger, or a test
//! recorder can implement.

use reversi_protocol::Room;
use tracing::{debug, info, instrument};

use crate::projector::GameView;
use crate::session::{Session, SessionState};

/// Receives every observable change of the client.
pub trait Presenter {
    /// The room list changed; `rooms` is the full list in listing order.
    fn on_rooms_changed(&mut self, rooms: &[Room]);

    /// A new game snapshot was projected.
    fn on_game_snapshot(&mut self, view: &GameView);

    /// The session entered `state`.
    fn on_session_transition(&mut self, state: SessionState, session: &Session);

    /// A line for the message log.
    fn on_log(&mut self, text: &str);
}

/// Presenter that writes everything to the tracing subscriber.
///
/// Used by the headless commands. Keeps the last room list so callers can
/// print it after the session ends.
#[derive(Debug, Default)]
pub struct TracingPresenter {
    rooms: Vec<Room>,
    state: Option<SessionState>,
}

impl TracingPresenter {
    /// Creates a presenter with no observed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last room list reported.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Last session state reported.
    pub fn state(&self) -> Option<SessionState> {
        self.state
    }
}

impl Presenter for TracingPresenter {
    #[instrument(skip_all, fields(count = rooms.len()))]
    fn on_rooms_changed(&mut self, rooms: &[Room]) {
        debug!("Room list changed");
        self.rooms = rooms.to_vec();
    }

    #[instrument(skip_all, fields(turn = view.turn(), highlighted = %view.highlighted()))]
    fn on_game_snapshot(&mut self, view: &GameView) {
        info!(
            p1_score = view.p1().score,
            p2_score = view.p2().score,
            selectable = view.selectable_cells().len(),
            "Game snapshot"
        );
    }

    fn on_session_transition(&mut self, state: SessionState, session: &Session) {
        info!(
            %state,
            player = session.player_id().map(String::as_str),
            room = session.room().map(|r| r.name.as_str()),
            "Session transition"
        );
        self.state = Some(state);
    }

    fn on_log(&mut self, text: &str) {
        info!(text, "Message log");
    }
}
