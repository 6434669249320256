//! Keyboard input: cursor movement and the crossterm reader thread.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use reversi_protocol::{BOARD_SIZE, Point};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Moves the board cursor one cell, stopping at the edges.
pub fn move_cursor(cursor: Point, key: KeyCode) -> Point {
    let (row, col) = (cursor.row(), cursor.col());
    let last = BOARD_SIZE - 1;
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(last), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(last)),
        _ => (row, col),
    };
    Point::at(row, col).unwrap_or(cursor)
}

/// Reads key presses on a dedicated thread and forwards them.
///
/// The thread exits once the receiver is dropped.
pub fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        debug!("Key reader started");
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    error!(error = %e, "Polling terminal events failed");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Reading terminal event failed");
                    break;
                }
            }
        }
        debug!("Key reader stopped");
    });
    rx
}
