//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use reversi_client::{
    Client, ConnectionEvent, ConnectionManager, GameView, Generation, Presenter, Session,
    SessionState, Transport, TransportError,
};
use reversi_protocol::Room;
use serde_json::{Value, json};
use url::Url;

pub const SERVER: &str = "ws://localhost:8080/ws";

// ─────────────────────────────────────────────────────────────
//  Recording presenter
// ─────────────────────────────────────────────────────────────

/// One presenter callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Rooms(Vec<Room>),
    Snapshot(GameView),
    Transition(SessionState),
    Log(String),
}

/// Presenter that records every callback in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Recorded>,
}

impl RecordingPresenter {
    pub fn transitions(&self) -> Vec<SessionState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Recorded::Transition(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Recorded::Log(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_snapshot(&self) -> Option<&GameView> {
        self.events.iter().rev().find_map(|e| match e {
            Recorded::Snapshot(view) => Some(view),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn on_rooms_changed(&mut self, rooms: &[Room]) {
        self.events.push(Recorded::Rooms(rooms.to_vec()));
    }

    fn on_game_snapshot(&mut self, view: &GameView) {
        self.events.push(Recorded::Snapshot(view.clone()));
    }

    fn on_session_transition(&mut self, state: SessionState, _session: &Session) {
        self.events.push(Recorded::Transition(state));
    }

    fn on_log(&mut self, text: &str) {
        self.events.push(Recorded::Log(text.to_string()));
    }
}

// ─────────────────────────────────────────────────────────────
//  Recording transport
// ─────────────────────────────────────────────────────────────

/// Transport that records what it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub opened: Vec<(Url, Generation)>,
    pub sent: Vec<String>,
    pub closed: usize,
}

impl RecordingTransport {
    /// Sent envelopes parsed back into JSON.
    pub fn sent_json(&self) -> Vec<Value> {
        self.sent
            .iter()
            .map(|s| serde_json::from_str(s).expect("sent frame is JSON"))
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self, url: &Url, generation: Generation) -> Result<(), TransportError> {
        self.opened.push((url.clone(), generation));
        Ok(())
    }

    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.sent.push(text);
        Ok(())
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

pub type TestClient = Client<RecordingTransport, RecordingPresenter>;

pub fn new_client() -> TestClient {
    Client::new(
        ConnectionManager::new(SERVER, RecordingTransport::default()),
        RecordingPresenter::default(),
    )
}

pub fn sent(client: &TestClient) -> Vec<Value> {
    client.connection().transport().sent_json()
}

/// Feeds one server frame on the current connection.
pub fn deliver(client: &mut TestClient, frame: Value) {
    let generation = client.connection().generation();
    client.handle_event(ConnectionEvent::Frame {
        generation,
        text: frame.to_string(),
    });
}

/// Feeds a raw text frame on the current connection.
pub fn deliver_raw(client: &mut TestClient, text: &str) {
    let generation = client.connection().generation();
    client.handle_event(ConnectionEvent::Frame {
        generation,
        text: text.to_string(),
    });
}

/// Connects, opens, and registers `name` as `id`.
pub fn registered_client(id: &str, name: &str, rooms: Value) -> TestClient {
    let mut client = new_client();
    client.connect(name).expect("connect");
    let generation = client.connection().generation();
    client.handle_event(ConnectionEvent::Opened { generation });
    deliver(&mut client, register(id, name, rooms));
    assert_eq!(client.session_state(), SessionState::Registered);
    client
}

/// Registered client seated in room `r1`.
pub fn client_in_room(id: &str) -> TestClient {
    let mut client = registered_client(id, "Alice", json!([room("r1", "Room1", 1)]));
    deliver(&mut client, join_response("r1", "Room1"));
    assert_eq!(client.session_state(), SessionState::InRoom);
    client
}

/// Client `p1` playing in room `r1` with p1 to move.
pub fn client_in_game() -> TestClient {
    let mut client = client_in_room("p1");
    deliver(
        &mut client,
        game_state("p1", json!([{"x": 2, "y": 3}]), json!([{"x": 5, "y": 4}])),
    );
    assert_eq!(client.session_state(), SessionState::InGame);
    client
}

// ─────────────────────────────────────────────────────────────
//  Frame builders
// ─────────────────────────────────────────────────────────────

pub fn room(uuid: &str, name: &str, count: u8) -> Value {
    json!({"roomUUID": uuid, "name": name, "count": count})
}

pub fn register(id: &str, name: &str, rooms: Value) -> Value {
    json!({"action": "REGISTER_RESPONSE", "message": {"id": id, "name": name, "rooms": rooms}})
}

pub fn room_updated(uuid: &str, action: &str, name: &str, count: u8) -> Value {
    json!({
        "action": "ROOM_UPDATED",
        "message": {"roomUUID": uuid, "action": action, "name": name, "count": count}
    })
}

pub fn join_response(uuid: &str, name: &str) -> Value {
    json!({"action": "JOIN_ROOM_RESPONSE", "message": {"roomUUID": uuid, "name": name}})
}

pub fn leave_response(uuid: &str, success: bool) -> Value {
    json!({"action": "LEAVE_ROOM_RESPONSE", "message": {"success": success, "roomUUID": uuid}})
}

pub fn zero_board() -> Value {
    json!(vec![vec![0; 8]; 8])
}

/// Snapshot between p1 (Alice, black) and p2 (Bob, white).
pub fn game_state(current: &str, p1_moves: Value, p2_moves: Value) -> Value {
    json!({
        "action": "GAME_STATE",
        "message": {
            "p1": {"id": "p1", "name": "Alice", "token": 1, "score": 2, "possibleMoves": p1_moves},
            "p2": {"id": "p2", "name": "Bob", "token": 2, "score": 2, "possibleMoves": p2_moves},
            "round": 1,
            "turn": 1,
            "currentPlayer": current,
            "board": zero_board(),
        }
    })
}

pub fn game_result(winner: Value) -> Value {
    json!({"action": "GAME_RESULT", "message": winner})
}

pub fn game_error(text: &str) -> Value {
    json!({"action": "GAME_ERROR", "message": text})
}

pub fn send_message(text: &str) -> Value {
    json!({"action": "SEND_MESSAGE", "message": text})
}
