//! Envelope codec.
//!
//! Decoding is total: every frame yields either a typed message or a
//! [`ProtocolError`], never a panic. The envelope is parsed first so that an
//! unrecognized `action` ([`ProtocolError::UnknownAction`]) is reported
//! separately from a recognized action with a bad payload
//! ([`ProtocolError::MalformedMessage`]).

use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, trace};

use crate::error::ProtocolError;
use crate::message::{
    ClientAction, ClientMessage, JoinRoomResponse, LeaveRoomResponse, Registration, RoomUpdate,
    ServerAction, ServerMessage,
};
use crate::types::GameSnapshot;

const ENVELOPE: &str = "envelope";

/// Raw envelope; `message` stays untyped until the action is known.
#[derive(Debug, Deserialize)]
struct Envelope {
    action: String,
    #[serde(default)]
    message: Value,
}

fn parse_envelope(frame: &str) -> Result<Envelope, ProtocolError> {
    serde_json::from_str(frame).map_err(|e| ProtocolError::malformed(ENVELOPE, e))
}

fn payload<T: DeserializeOwned>(action: ServerAction, message: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(message).map_err(|e| ProtocolError::malformed(action.to_string(), e))
}

fn text_payload(action: ServerAction, message: Value) -> Result<String, ProtocolError> {
    match message {
        Value::String(text) => Ok(text),
        other => Err(ProtocolError::malformed(
            action.to_string(),
            format!("expected a string, found {}", kind_of(&other)),
        )),
    }
}

/// `GAME_RESULT` carries the winner's id; absent, `null`, or empty is a draw.
fn winner_payload(message: Value) -> Result<Option<String>, ProtocolError> {
    match message {
        Value::Null => Ok(None),
        Value::String(id) if id.is_empty() => Ok(None),
        Value::String(id) => Ok(Some(id)),
        other => Err(ProtocolError::malformed(
            ServerAction::GameResult.to_string(),
            format!("expected a player id, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes one inbound frame.
#[instrument(level = "trace", skip_all, fields(len = frame.len()))]
pub fn decode_server_message(frame: &str) -> Result<ServerMessage, ProtocolError> {
    let Envelope { action, message } = parse_envelope(frame)?;
    let action = ServerAction::from_str(&action).map_err(|_| ProtocolError::UnknownAction(action))?;
    trace!(%action, "Decoding server message");

    let decoded = match action {
        ServerAction::SendMessage => ServerMessage::SendMessage(text_payload(action, message)?),
        ServerAction::RoomUpdated => {
            let update: RoomUpdate = payload(action, message)?;
            update
                .room()
                .validate()
                .map_err(|reason| ProtocolError::malformed(action.to_string(), reason))?;
            ServerMessage::RoomUpdated(update)
        }
        ServerAction::RegisterResponse => {
            let registration: Registration = payload(action, message)?;
            for room in &registration.rooms {
                room.validate()
                    .map_err(|reason| ProtocolError::malformed(action.to_string(), reason))?;
            }
            ServerMessage::RegisterResponse(registration)
        }
        ServerAction::JoinRoomResponse => {
            ServerMessage::JoinRoomResponse(payload::<JoinRoomResponse>(action, message)?)
        }
        ServerAction::LeaveRoomResponse => {
            ServerMessage::LeaveRoomResponse(payload::<LeaveRoomResponse>(action, message)?)
        }
        ServerAction::GameError => ServerMessage::GameError(text_payload(action, message)?),
        ServerAction::GameState => {
            let snapshot: GameSnapshot = payload(action, message)?;
            snapshot
                .validate()
                .map_err(|reason| ProtocolError::malformed(action.to_string(), reason))?;
            ServerMessage::GameState(snapshot)
        }
        ServerAction::GameResult => ServerMessage::GameResult(winner_payload(message)?),
    };
    Ok(decoded)
}

/// Serializes an outbound command into its wire envelope.
#[instrument(level = "trace", skip_all, fields(action = %command.action()))]
pub fn encode_client_message(command: &ClientMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(command).map_err(|e| ProtocolError::Encode {
        action: command.action().to_string(),
        reason: e.to_string(),
    })
}

/// Decodes an outbound command envelope.
///
/// The client never receives these; it exists so outbound shapes can be
/// checked against the wire format.
#[instrument(level = "trace", skip_all, fields(len = frame.len()))]
pub fn decode_client_message(frame: &str) -> Result<ClientMessage, ProtocolError> {
    let Envelope { action, .. } = parse_envelope(frame)?;
    let action = ClientAction::from_str(&action).map_err(|_| ProtocolError::UnknownAction(action))?;
    serde_json::from_str(frame).map_err(|e| ProtocolError::malformed(action.to_string(), e))
}

/// Serializes an inbound message. Used by test servers and fixtures.
pub fn encode_server_message(message: &ServerMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(|e| ProtocolError::Encode {
        action: message.action().to_string(),
        reason: e.to_string(),
    })
}
