//! Tests for envelope decoding and encoding.

use reversi_protocol::{
    ClientMessage, JoinRoomRequest, MakeMoveRequest, Point, ProtocolError, RoomAction,
    RoomRequest, ServerMessage, Token, decode_client_message, decode_server_message,
    encode_client_message, encode_server_message,
};
use serde_json::{Value, json};

fn zero_board() -> Value {
    json!(vec![vec![0; 8]; 8])
}

fn game_state(current: &str) -> Value {
    json!({
        "action": "GAME_STATE",
        "message": {
            "p1": {"id": "p1", "name": "Alice", "token": 1, "score": 2,
                   "possibleMoves": [{"x": 2, "y": 3}, {"x": 3, "y": 2}]},
            "p2": {"id": "p2", "name": "Bob", "token": 2, "score": 2, "possibleMoves": null},
            "round": 1,
            "turn": 4,
            "currentPlayer": current,
            "board": zero_board(),
        }
    })
}

// ─────────────────────────────────────────────────────────────
//  Inbound
// ─────────────────────────────────────────────────────────────

#[test]
fn test_decode_send_message_ignores_target() {
    let frame = r#"{"action":"SEND_MESSAGE","message":"Bob join the room","target":"r1"}"#;
    let message = decode_server_message(frame).expect("decode");
    assert_eq!(message, ServerMessage::SendMessage("Bob join the room".into()));
}

#[test]
fn test_decode_room_updated() {
    let frame = json!({
        "action": "ROOM_UPDATED",
        "message": {"roomUUID": "r1", "action": "ADDED", "name": "Room1", "count": 1}
    })
    .to_string();
    let ServerMessage::RoomUpdated(update) = decode_server_message(&frame).expect("decode") else {
        panic!("expected RoomUpdated");
    };
    assert_eq!(update.room_uuid, "r1");
    assert_eq!(update.action, RoomAction::Added);
    assert_eq!(update.name, "Room1");
    assert_eq!(update.count, 1);
}

#[test]
fn test_decode_room_deleted_without_name_or_count() {
    let frame = r#"{"action":"ROOM_UPDATED","message":{"roomUUID":"r1","action":"DELETED"}}"#;
    let ServerMessage::RoomUpdated(update) = decode_server_message(frame).expect("decode") else {
        panic!("expected RoomUpdated");
    };
    assert_eq!(update.action, RoomAction::Deleted);
    assert_eq!(update.count, 0);
}

#[test]
fn test_decode_room_over_capacity_is_malformed() {
    let frame = r#"{"action":"ROOM_UPDATED","message":{"roomUUID":"r1","action":"UPDATED","name":"x","count":3}}"#;
    let err = decode_server_message(frame).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage { .. }));
}

#[test]
fn test_decode_register_response_with_null_rooms() {
    let frame = r#"{"action":"REGISTER_RESPONSE","message":{"id":"p1","name":"Alice","rooms":null}}"#;
    let ServerMessage::RegisterResponse(reg) = decode_server_message(frame).expect("decode") else {
        panic!("expected RegisterResponse");
    };
    assert_eq!(reg.id, "p1");
    assert_eq!(reg.name, "Alice");
    assert!(reg.rooms.is_empty());
}

#[test]
fn test_decode_join_response_defaults_success() {
    let frame = r#"{"action":"JOIN_ROOM_RESPONSE","message":{"roomUUID":"r1","name":"Room1"}}"#;
    let ServerMessage::JoinRoomResponse(resp) = decode_server_message(frame).expect("decode")
    else {
        panic!("expected JoinRoomResponse");
    };
    assert!(resp.success);
    assert_eq!(resp.room_uuid, "r1");
}

#[test]
fn test_decode_leave_response_failure() {
    let frame = r#"{"action":"LEAVE_ROOM_RESPONSE","message":{"success":false,"roomUUID":"r1"}}"#;
    let ServerMessage::LeaveRoomResponse(resp) = decode_server_message(frame).expect("decode")
    else {
        panic!("expected LeaveRoomResponse");
    };
    assert!(!resp.success);
}

#[test]
fn test_decode_game_error_text() {
    let frame = r#"{"action":"GAME_ERROR","message":"2 people are required to start the game."}"#;
    assert_eq!(
        decode_server_message(frame).expect("decode"),
        ServerMessage::GameError("2 people are required to start the game.".into())
    );
}

#[test]
fn test_decode_game_state() {
    let frame = game_state("p1").to_string();
    let ServerMessage::GameState(snapshot) = decode_server_message(&frame).expect("decode") else {
        panic!("expected GameState");
    };
    assert_eq!(snapshot.current_player_id, "p1");
    assert_eq!(snapshot.p1.token, Token::Black);
    assert_eq!(snapshot.p1.legal_moves, vec![Point::new(2, 3), Point::new(3, 2)]);
    assert!(snapshot.p2.legal_moves.is_empty());
    assert_eq!(snapshot.turn, 4);
    assert!(snapshot.is_p1_turn());
}

#[test]
fn test_decode_game_state_accepts_legal_moves_alias() {
    let frame = json!({
        "action": "GAME_STATE",
        "message": {
            "p1": {"id": "p1", "legalMoves": [{"x": 0, "y": 7}]},
            "p2": {"id": "p2"},
            "currentPlayer": "p1",
            "board": zero_board(),
        }
    })
    .to_string();
    let ServerMessage::GameState(snapshot) = decode_server_message(&frame).expect("decode") else {
        panic!("expected GameState");
    };
    assert_eq!(snapshot.p1.legal_moves, vec![Point::new(0, 7)]);
    assert_eq!(snapshot.round, 0);
}

#[test]
fn test_decode_game_state_rejects_stranger_as_current_player() {
    let frame = game_state("p3").to_string();
    let err = decode_server_message(&frame).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage { .. }));
}

#[test]
fn test_decode_game_state_rejects_short_board() {
    let mut frame = game_state("p1");
    frame["message"]["board"] = json!([]);
    let err = decode_server_message(&frame.to_string()).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage { .. }));
}

#[test]
fn test_decode_game_state_rejects_off_board_move() {
    let mut frame = game_state("p1");
    frame["message"]["p1"]["possibleMoves"] = json!([{"x": 8, "y": 0}]);
    let err = decode_server_message(&frame.to_string()).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage { .. }));
}

#[test]
fn test_decode_game_result_winner_and_draws() {
    let winner = r#"{"action":"GAME_RESULT","message":"p1"}"#;
    assert_eq!(
        decode_server_message(winner).expect("decode"),
        ServerMessage::GameResult(Some("p1".into()))
    );

    for draw in [
        r#"{"action":"GAME_RESULT","message":""}"#,
        r#"{"action":"GAME_RESULT","message":null}"#,
        r#"{"action":"GAME_RESULT"}"#,
    ] {
        assert_eq!(
            decode_server_message(draw).expect("decode"),
            ServerMessage::GameResult(None),
            "frame {draw}"
        );
    }
}

#[test]
fn test_decode_unknown_action() {
    let err = decode_server_message(r#"{"action":"SURRENDER","message":{}}"#).unwrap_err();
    assert_eq!(err, ProtocolError::UnknownAction("SURRENDER".into()));
}

#[test]
fn test_decode_garbage_is_malformed() {
    for frame in ["", "not json", "[1,2,3]", r#"{"message":"no action"}"#, r#"{"action":7}"#] {
        let err = decode_server_message(frame).unwrap_err();
        assert!(
            matches!(err, ProtocolError::MalformedMessage { .. }),
            "frame {frame:?} gave {err:?}"
        );
    }
}

#[test]
fn test_decode_wrong_payload_type_is_malformed() {
    let err = decode_server_message(r#"{"action":"SEND_MESSAGE","message":{"text":"hi"}}"#)
        .unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage { .. }));
}

#[test]
fn test_server_message_encodes_to_decodable_frame() {
    let original = ServerMessage::GameResult(Some("p2".into()));
    let frame = encode_server_message(&original).expect("encode");
    assert_eq!(decode_server_message(&frame).expect("decode"), original);
}

// ─────────────────────────────────────────────────────────────
//  Outbound
// ─────────────────────────────────────────────────────────────

#[test]
fn test_outbound_shapes_survive_decode_then_encode() {
    let frames = [
        json!({"action": "JOIN_ROOM", "message": {"roomUUID": "r1", "name": "Room1"}}),
        json!({"action": "JOIN_ROOM", "message": {"roomUUID": null, "name": "Untitled Room"}}),
        json!({"action": "LEAVE_ROOM", "message": {"roomUUID": "r1"}}),
        json!({"action": "START_GAME", "message": {"roomUUID": "r1"}}),
        json!({"action": "MAKE_MOVE", "message": {"roomUUID": "r1", "point": {"x": 2, "y": 3}}}),
    ];

    for frame in frames {
        let decoded = decode_client_message(&frame.to_string()).expect("decode");
        let encoded = encode_client_message(&decoded).expect("encode");
        let reparsed: Value = serde_json::from_str(&encoded).expect("json");
        assert_eq!(reparsed, frame);
    }
}

#[test]
fn test_encode_create_room_sends_null_room_uuid() {
    let command = ClientMessage::JoinRoom(JoinRoomRequest {
        room_uuid: None,
        name: "Lobby".into(),
    });
    let encoded: Value =
        serde_json::from_str(&encode_client_message(&command).expect("encode")).expect("json");
    assert_eq!(
        encoded,
        json!({"action": "JOIN_ROOM", "message": {"roomUUID": null, "name": "Lobby"}})
    );
}

#[test]
fn test_encode_make_move_keeps_column_as_x() {
    let command = ClientMessage::MakeMove(MakeMoveRequest {
        room_uuid: "r1".into(),
        point: Point::at(3, 2).expect("on board"),
    });
    let encoded: Value =
        serde_json::from_str(&encode_client_message(&command).expect("encode")).expect("json");
    assert_eq!(encoded["message"]["point"], json!({"x": 2, "y": 3}));
}

#[test]
fn test_room_uuid_accessor() {
    let start = ClientMessage::StartGame(RoomRequest {
        room_uuid: "r9".into(),
    });
    assert_eq!(start.room_uuid(), Some("r9"));
}

#[test]
fn test_decode_client_unknown_action() {
    let err = decode_client_message(r#"{"action":"CHAT","message":"hi"}"#).unwrap_err();
    assert_eq!(err, ProtocolError::UnknownAction("CHAT".into()));
}
