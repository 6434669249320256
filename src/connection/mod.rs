//! Connection manager.
//!
//! Owns the single logical connection to the server. The socket itself sits
//! behind a [`Transport`]; the manager tracks open/closed state, builds the
//! handshake address, and stamps every connection with a generation number
//! so events from a superseded socket are recognized and dropped.

mod websocket;

pub use websocket::WebSocketTransport;

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::TransportError;

/// Connection counter; increases by one on every `connect`.
pub type Generation = u64;

/// Something that happened on a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The handshake completed.
    Opened {
        /// Connection this event belongs to.
        generation: Generation,
    },
    /// A text frame arrived.
    Frame {
        /// Connection this event belongs to.
        generation: Generation,
        /// Frame contents.
        text: String,
    },
    /// A transport error; usually followed by `Closed`.
    Error {
        /// Connection this event belongs to.
        generation: Generation,
        /// Error description.
        message: String,
    },
    /// The connection ended.
    Closed {
        /// Connection this event belongs to.
        generation: Generation,
        /// Close reason, if the peer gave one.
        reason: Option<String>,
    },
}

impl ConnectionEvent {
    /// Connection this event belongs to.
    pub fn generation(&self) -> Generation {
        match self {
            ConnectionEvent::Opened { generation }
            | ConnectionEvent::Frame { generation, .. }
            | ConnectionEvent::Error { generation, .. }
            | ConnectionEvent::Closed { generation, .. } => *generation,
        }
    }
}

/// A bidirectional text-frame channel.
///
/// `open` starts connecting and returns at once; progress is reported as
/// [`ConnectionEvent`]s carrying the given generation.
pub trait Transport {
    /// Starts connecting to `url`.
    fn open(&mut self, url: &Url, generation: Generation) -> Result<(), TransportError>;

    /// Queues one text frame.
    fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Tears down the current socket, if any.
    fn close(&mut self);
}

/// Lifecycle of the logical connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ConnectionState {
    /// No socket.
    Closed,
    /// Handshake in progress.
    Connecting,
    /// Frames may be sent.
    Open,
}

/// Manages the single connection to the server.
#[derive(Debug)]
pub struct ConnectionManager<T> {
    address: String,
    transport: T,
    state: ConnectionState,
    generation: Generation,
}

impl<T: Transport> ConnectionManager<T> {
    /// Creates a closed manager for the server at `address`.
    pub fn new(address: impl Into<String>, transport: T) -> Self {
        Self {
            address: address.into(),
            transport,
            state: ConnectionState::Closed,
            generation: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns true when frames may be sent.
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Generation of the newest connection.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handshake address: the server address with `name` as a query
    /// parameter, percent-encoded.
    pub fn handshake_url(&self, name: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.address).map_err(|e| TransportError::InvalidAddress {
            address: self.address.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(TransportError::InvalidAddress {
                address: self.address.clone(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }

    /// Opens a connection that registers as `name`.
    ///
    /// Fails with [`TransportError::AlreadyConnected`] unless the
    /// connection is closed.
    #[instrument(skip(self), fields(address = %self.address))]
    pub fn connect(&mut self, name: &str) -> Result<Generation, TransportError> {
        if self.state != ConnectionState::Closed {
            return Err(TransportError::AlreadyConnected);
        }
        let url = self.handshake_url(name)?;
        let generation = self.generation + 1;
        self.transport.open(&url, generation)?;
        self.generation = generation;
        self.state = ConnectionState::Connecting;
        info!(generation, "Connecting");
        Ok(generation)
    }

    /// Sends one envelope.
    #[instrument(level = "debug", skip_all, fields(len = envelope.len()))]
    pub fn send(&mut self, envelope: String) -> Result<(), TransportError> {
        if self.state != ConnectionState::Open {
            debug!(state = %self.state, "Send refused");
            return Err(TransportError::NotConnected);
        }
        self.transport.send_text(envelope)
    }

    /// Closes the connection. A no-op when already closed.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.transport.close();
        self.state = ConnectionState::Closed;
        info!("Connection closed locally");
    }

    /// Applies a transport event to the lifecycle.
    ///
    /// Returns false when the event must be ignored: it belongs to an older
    /// connection, or it arrives for a connection already closed.
    #[instrument(level = "trace", skip_all, fields(generation = event.generation()))]
    pub fn accept(&mut self, event: &ConnectionEvent) -> bool {
        if event.generation() != self.generation {
            debug!(current = self.generation, "Dropping event from stale connection");
            return false;
        }
        match event {
            ConnectionEvent::Opened { .. } => {
                if self.state != ConnectionState::Connecting {
                    return false;
                }
                self.state = ConnectionState::Open;
                info!("Connection open");
                true
            }
            ConnectionEvent::Frame { .. } => self.state == ConnectionState::Open,
            ConnectionEvent::Error { message, .. } => {
                warn!(error = %message, "Transport error");
                self.state != ConnectionState::Closed
            }
            ConnectionEvent::Closed { reason, .. } => {
                if self.state == ConnectionState::Closed {
                    return false;
                }
                self.state = ConnectionState::Closed;
                info!(?reason, "Connection closed by peer");
                true
            }
        }
    }
}
