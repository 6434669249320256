//! Tests for the connection manager lifecycle.

mod common;

use common::*;
use reversi_client::{ConnectionEvent, ConnectionManager, ConnectionState, TransportError};

fn manager() -> ConnectionManager<RecordingTransport> {
    ConnectionManager::new(SERVER, RecordingTransport::default())
}

#[test]
fn test_connect_then_open() {
    let mut connection = manager();
    let generation = connection.connect("Alice").expect("connect");

    assert_eq!(connection.state(), ConnectionState::Connecting);
    assert!(connection.accept(&ConnectionEvent::Opened { generation }));
    assert!(connection.is_open());
}

#[test]
fn test_connect_twice_is_already_connected() {
    let mut connection = manager();
    connection.connect("Alice").expect("connect");

    assert_eq!(
        connection.connect("Alice"),
        Err(TransportError::AlreadyConnected)
    );
    assert_eq!(connection.transport().opened.len(), 1);
}

#[test]
fn test_send_requires_open() {
    let mut connection = manager();
    assert_eq!(
        connection.send("{}".into()),
        Err(TransportError::NotConnected)
    );

    let generation = connection.connect("Alice").expect("connect");
    assert_eq!(
        connection.send("{}".into()),
        Err(TransportError::NotConnected)
    );

    connection.accept(&ConnectionEvent::Opened { generation });
    connection.send("{\"a\":1}".into()).expect("send");
    assert_eq!(connection.transport().sent, vec!["{\"a\":1}".to_string()]);
}

#[test]
fn test_send_after_close_fails() {
    let mut connection = manager();
    let generation = connection.connect("Alice").expect("connect");
    connection.accept(&ConnectionEvent::Opened { generation });

    connection.close();
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert_eq!(connection.transport().closed, 1);
    assert_eq!(
        connection.send("{}".into()),
        Err(TransportError::NotConnected)
    );

    // A second close is a no-op
    connection.close();
    assert_eq!(connection.transport().closed, 1);
}

#[test]
fn test_peer_close_ends_connection() {
    let mut connection = manager();
    let generation = connection.connect("Alice").expect("connect");
    connection.accept(&ConnectionEvent::Opened { generation });

    assert!(connection.accept(&ConnectionEvent::Closed {
        generation,
        reason: Some("bye".into()),
    }));
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert!(connection.connect("Alice").is_ok());
}

#[test]
fn test_error_event_does_not_close() {
    let mut connection = manager();
    let generation = connection.connect("Alice").expect("connect");
    connection.accept(&ConnectionEvent::Opened { generation });

    assert!(connection.accept(&ConnectionEvent::Error {
        generation,
        message: "hiccup".into(),
    }));
    assert!(connection.is_open());
}

#[test]
fn test_stale_generation_is_ignored() {
    let mut connection = manager();
    let first = connection.connect("Alice").expect("connect");
    connection.accept(&ConnectionEvent::Opened { generation: first });
    connection.close();

    let second = connection.connect("Alice").expect("reconnect");
    assert_eq!(second, first + 1);
    connection.accept(&ConnectionEvent::Opened { generation: second });

    // The old socket's close arrives late
    assert!(!connection.accept(&ConnectionEvent::Closed {
        generation: first,
        reason: None,
    }));
    assert!(!connection.accept(&ConnectionEvent::Frame {
        generation: first,
        text: "{}".into(),
    }));
    assert!(connection.is_open());
}

#[test]
fn test_invalid_address_is_reported() {
    let mut connection = ConnectionManager::new("not a url", RecordingTransport::default());
    assert!(matches!(
        connection.connect("Alice"),
        Err(TransportError::InvalidAddress { .. })
    ));
    assert_eq!(connection.state(), ConnectionState::Closed);

    let mut connection = ConnectionManager::new("http://localhost/ws", RecordingTransport::default());
    assert!(matches!(
        connection.connect("Alice"),
        Err(TransportError::InvalidAddress { .. })
    ));
    assert!(connection.transport().opened.is_empty());
}

#[test]
fn test_client_logs_disconnect() {
    let mut client = registered_client("p1", "Alice", serde_json::json!([]));
    let generation = client.connection().generation();
    client.handle_event(ConnectionEvent::Closed {
        generation,
        reason: Some("server shutdown".into()),
    });

    assert!(!client.is_connected());
    assert_eq!(
        client.presenter().logs().last().copied(),
        Some("Disconnected from server: server shutdown")
    );
}
