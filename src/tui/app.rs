//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reversi_client::{GameView, Presenter, RoomMembership, Session, SessionState, UserIntent};
use reversi_protocol::{Player, Point, ROOM_CAPACITY, Room};
use std::collections::VecDeque;
use tracing::debug;

use super::input::move_cursor;

const LOG_CAPACITY: usize = 200;

/// What the main loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Run a client command.
    Intent(UserIntent),
    /// Open a new connection.
    Reconnect,
    /// Leave the program.
    Quit,
}

/// Whether keys edit the room-name prompt or drive the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Normal,
    /// Typing a room name.
    NamingRoom(String),
}

/// Everything the terminal shows, kept up to date by the client.
#[derive(Debug)]
pub struct App {
    state: SessionState,
    player: Option<Player>,
    room: Option<RoomMembership>,
    rooms: Vec<Room>,
    view: Option<GameView>,
    log: VecDeque<String>,
    cursor: Point,
    mode: InputMode,
}

impl App {
    /// Creates an empty application state.
    pub fn new() -> Self {
        Self {
            state: SessionState::Unregistered,
            player: None,
            room: None,
            rooms: Vec::new(),
            view: None,
            log: VecDeque::new(),
            cursor: Point::new(3, 3),
            mode: InputMode::Normal,
        }
    }

    /// Session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Local player, once registered.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Current room, while seated.
    pub fn room(&self) -> Option<&RoomMembership> {
        self.room.as_ref()
    }

    /// Listed rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Latest game projection.
    pub fn view(&self) -> Option<&GameView> {
        self.view.as_ref()
    }

    /// Message log, oldest first.
    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    /// Board cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Input mode.
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    /// Seats taken in the current room, from the room list.
    pub fn room_count(&self) -> Option<u8> {
        let room = self.room.as_ref()?;
        self.rooms
            .iter()
            .find(|r| r.room_uuid == room.room_uuid)
            .map(|r| r.count)
    }

    /// Start is offered only in a full room with no game running.
    pub fn can_start(&self) -> bool {
        self.state == SessionState::InRoom && self.room_count() == Some(ROOM_CAPACITY)
    }

    /// Translates a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyAction::Quit);
        }

        if let InputMode::NamingRoom(name) = &mut self.mode {
            return match key.code {
                KeyCode::Char(c) => {
                    name.push(c);
                    None
                }
                KeyCode::Backspace => {
                    name.pop();
                    None
                }
                KeyCode::Enter => {
                    let name = std::mem::take(name);
                    self.mode = InputMode::Normal;
                    Some(KeyAction::Intent(UserIntent::CreateRoom(name)))
                }
                KeyCode::Esc => {
                    self.mode = InputMode::Normal;
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                None
            }
            KeyCode::Enter => Some(KeyAction::Intent(UserIntent::MakeMove(self.cursor))),
            KeyCode::Char('c') => {
                self.mode = InputMode::NamingRoom(String::new());
                None
            }
            KeyCode::Char('s') => Some(KeyAction::Intent(UserIntent::StartGame)),
            KeyCode::Char('l') => Some(KeyAction::Intent(UserIntent::LeaveRoom)),
            KeyCode::Char('r') if self.state == SessionState::Unregistered => {
                Some(KeyAction::Reconnect)
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                match self.rooms.get(index) {
                    Some(room) => Some(KeyAction::Intent(UserIntent::JoinRoom(
                        room.room_uuid.clone(),
                    ))),
                    None => {
                        self.push_log(format!("No room listed at {}", c));
                        None
                    }
                }
            }
            _ => None,
        }
    }

    /// Marks the connection as gone so `r` reconnects.
    pub fn disconnected(&mut self) {
        self.state = SessionState::Unregistered;
        self.push_log("Press r to reconnect".to_string());
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for App {
    fn on_rooms_changed(&mut self, rooms: &[Room]) {
        debug!(count = rooms.len(), "Room list redrawn");
        self.rooms = rooms.to_vec();
    }

    fn on_game_snapshot(&mut self, view: &GameView) {
        if !view.is_selectable(self.cursor) {
            if let Some(first) = view.selectable_cells().first() {
                self.cursor = *first;
            }
        }
        self.view = Some(view.clone());
    }

    fn on_session_transition(&mut self, state: SessionState, session: &Session) {
        self.state = state;
        self.player = session.player().cloned();
        self.room = session.room().cloned();
        if matches!(state, SessionState::Registering | SessionState::Registered) {
            self.view = None;
        }
    }

    fn on_log(&mut self, text: &str) {
        self.push_log(text.to_string());
    }
}
