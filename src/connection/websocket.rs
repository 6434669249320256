//! WebSocket transport on tokio-tungstenite.
//!
//! Each `open` spawns one socket task. Outbound frames reach the task over
//! an unbounded channel; everything the socket does comes back as
//! [`ConnectionEvent`]s on the event channel handed to
//! [`WebSocketTransport::new`].

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::{ConnectionEvent, Generation, Transport};
use crate::error::TransportError;

/// [`Transport`] backed by a real WebSocket.
#[derive(Debug)]
pub struct WebSocketTransport {
    events: mpsc::UnboundedSender<ConnectionEvent>,
    outbound: Option<mpsc::UnboundedSender<String>>,
}

impl WebSocketTransport {
    /// Creates a transport reporting to `events`.
    pub fn new(events: mpsc::UnboundedSender<ConnectionEvent>) -> Self {
        Self {
            events,
            outbound: None,
        }
    }

    /// Creates a transport together with the receiving end of its events.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Transport for WebSocketTransport {
    /// Must be called from within a tokio runtime.
    fn open(&mut self, url: &Url, generation: Generation) -> Result<(), TransportError> {
        self.close();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(socket_task(
            url.to_string(),
            generation,
            rx,
            self.events.clone(),
        ));
        self.outbound = Some(tx);
        Ok(())
    }

    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        let outbound = self.outbound.as_ref().ok_or(TransportError::NotConnected)?;
        outbound
            .send(text)
            .map_err(|_| TransportError::NotConnected)
    }

    fn close(&mut self) {
        // Dropping the sender ends the socket task with a close frame.
        if self.outbound.take().is_some() {
            debug!("Outbound channel dropped");
        }
    }
}

/// Drives one socket until either side closes it.
#[instrument(skip(url, outbound, events))]
async fn socket_task(
    url: String,
    generation: Generation,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
) {
    let emit = |event: ConnectionEvent| {
        if events.send(event).is_err() {
            debug!("Event receiver gone");
        }
    };

    let socket = match connect_async(url.as_str()).await {
        Ok((socket, response)) => {
            info!(status = %response.status(), "WebSocket handshake complete");
            socket
        }
        Err(e) => {
            error!(error = %e, "WebSocket connect failed");
            emit(ConnectionEvent::Error {
                generation,
                message: e.to_string(),
            });
            emit(ConnectionEvent::Closed {
                generation,
                reason: Some(e.to_string()),
            });
            return;
        }
    };
    emit(ConnectionEvent::Opened { generation });

    let (mut sink, mut stream) = socket.split();
    let reason = loop {
        tokio::select! {
            queued = outbound.recv() => match queued {
                Some(text) => {
                    if let Err(e) = sink.send(Message::Text(text.into())).await {
                        error!(error = %e, "WebSocket send failed");
                        emit(ConnectionEvent::Error { generation, message: e.to_string() });
                        break Some(e.to_string());
                    }
                }
                None => {
                    debug!("Closing socket on request");
                    if let Err(e) = sink.close().await {
                        debug!(error = %e, "Close handshake failed");
                    }
                    break None;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    emit(ConnectionEvent::Frame { generation, text: text.as_str().to_owned() });
                }
                Some(Ok(Message::Close(frame))) => {
                    break frame.map(|f| f.reason.as_str().to_owned());
                }
                Some(Ok(Message::Binary(data))) => {
                    warn!(len = data.len(), "Ignoring binary frame");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!(error = %e, "WebSocket receive failed");
                    emit(ConnectionEvent::Error { generation, message: e.to_string() });
                    break Some(e.to_string());
                }
                None => break None,
            },
        }
    };

    emit(ConnectionEvent::Closed { generation, reason });
    debug!("Socket task finished");
}
