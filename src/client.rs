//! Client facade.
//!
//! Ties the connection manager, the router, and the command builder
//! together. User intents go in through the command methods; transport
//! events go in through [`Client::handle_event`].

use reversi_protocol::{ClientMessage, Point, RoomId, encode_client_message};
use tracing::{debug, info, instrument, warn};

use crate::connection::{ConnectionEvent, ConnectionManager, ConnectionState, Transport};
use crate::context::ClientContext;
use crate::error::{ClientError, StateError, TransportError};
use crate::presenter::Presenter;
use crate::router::Router;
use crate::session::SessionState;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// Create a room with this name.
    CreateRoom(String),
    /// Join a listed room.
    JoinRoom(RoomId),
    /// Leave the current room.
    LeaveRoom,
    /// Start a game in the current room.
    StartGame,
    /// Play a cell.
    MakeMove(Point),
}

/// A reversi room client.
#[derive(Debug)]
pub struct Client<T, P> {
    connection: ConnectionManager<T>,
    router: Router<P>,
    name: Option<String>,
}

impl<T: Transport, P: Presenter> Client<T, P> {
    /// Creates a disconnected client.
    pub fn new(connection: ConnectionManager<T>, presenter: P) -> Self {
        Self {
            connection,
            router: Router::new(presenter),
            name: None,
        }
    }

    /// Client state.
    pub fn context(&self) -> &ClientContext {
        self.router.context()
    }

    /// Presenter.
    pub fn presenter(&self) -> &P {
        self.router.presenter()
    }

    /// Presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        self.router.presenter_mut()
    }

    /// Connection manager.
    pub fn connection(&self) -> &ConnectionManager<T> {
        &self.connection
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.context().session().state()
    }

    /// Opens a connection registering as `name`.
    ///
    /// Every connection starts a fresh session, so a reconnect forgets the
    /// previous room list, room, and game.
    #[instrument(skip(self))]
    pub fn connect(&mut self, name: &str) -> Result<(), ClientError> {
        if let Err(e) = self.connection.connect(name) {
            warn!(error = %e, "Connect failed");
            self.router.log(&e.to_string());
            return Err(e.into());
        }
        self.name = Some(name.to_string());
        self.router.begin_session(name);
        Ok(())
    }

    /// Closes the connection.
    #[instrument(skip(self))]
    pub fn close(&mut self) {
        self.connection.close();
    }

    /// Feeds one transport event through the connection manager and, for
    /// frames, the router.
    #[instrument(level = "debug", skip_all, fields(generation = event.generation()))]
    pub fn handle_event(&mut self, event: ConnectionEvent) {
        if !self.connection.accept(&event) {
            return;
        }
        match event {
            ConnectionEvent::Opened { .. } => {
                let name = self.name.as_deref().unwrap_or_default();
                self.router.log(&format!("Connected as {}", name));
            }
            ConnectionEvent::Frame { text, .. } => {
                // Decode failures are already logged by the router.
                let _ = self.router.dispatch_frame(&text);
            }
            ConnectionEvent::Error { message, .. } => {
                self.router.log(&format!("Connection error: {}", message));
            }
            ConnectionEvent::Closed { reason, .. } => {
                let text = match reason {
                    Some(reason) if !reason.is_empty() => {
                        format!("Disconnected from server: {}", reason)
                    }
                    _ => "Disconnected from server".to_string(),
                };
                self.router.log(&text);
            }
        }
    }

    /// Asks the server to create a room; a blank name gets a default.
    pub fn create_room(&mut self, name: &str) -> Result<(), ClientError> {
        let command = self.context().commands().create_room(name);
        self.submit(command)
    }

    /// Asks to join a listed room.
    pub fn join_room(&mut self, room_uuid: &str) -> Result<(), ClientError> {
        let command = self.context().commands().join_room(room_uuid);
        self.submit(command)
    }

    /// Asks to leave the current room.
    pub fn leave_room(&mut self) -> Result<(), ClientError> {
        let command = self.context().commands().leave_room();
        self.submit(command)
    }

    /// Asks to start a game in the current room.
    pub fn start_game(&mut self) -> Result<(), ClientError> {
        let command = self.context().commands().start_game();
        self.submit(command)
    }

    /// Plays `point`.
    pub fn make_move(&mut self, point: Point) -> Result<(), ClientError> {
        let command = self.context().commands().make_move(point);
        self.submit(command)
    }

    /// Dispatches a user intent to the matching command.
    pub fn perform(&mut self, intent: UserIntent) -> Result<(), ClientError> {
        debug!(?intent, "Performing user intent");
        match intent {
            UserIntent::CreateRoom(name) => self.create_room(&name),
            UserIntent::JoinRoom(room_uuid) => self.join_room(&room_uuid),
            UserIntent::LeaveRoom => self.leave_room(),
            UserIntent::StartGame => self.start_game(),
            UserIntent::MakeMove(point) => self.make_move(point),
        }
    }

    /// Sends a gated command. Rejections are shown in the message log and
    /// returned; nothing is sent.
    ///
    /// A closed connection outranks any state precondition.
    #[instrument(skip_all)]
    fn submit(&mut self, command: Result<ClientMessage, StateError>) -> Result<(), ClientError> {
        if !self.connection.is_open() {
            let e = TransportError::NotConnected;
            info!(error = %e, "Command dropped while disconnected");
            self.router.log(&e.to_string());
            return Err(e.into());
        }
        let command = match command {
            Ok(command) => command,
            Err(e) => {
                info!(error = %e, "Command rejected locally");
                self.router.log(&e.to_string());
                return Err(e.into());
            }
        };
        let action = command.action();
        let envelope = encode_client_message(&command)?;
        if let Err(e) = self.connection.send(envelope) {
            warn!(%action, error = %e, "Command not sent");
            self.router.log(&e.to_string());
            return Err(e.into());
        }
        debug!(%action, "Command sent");
        Ok(())
    }

    /// Returns true while the connection is open or opening.
    pub fn is_connected(&self) -> bool {
        self.connection.state() != ConnectionState::Closed
    }
}
