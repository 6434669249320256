//! Reversi client - unified CLI
//!
//! Interactive terminal client and headless room listing.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use reversi_client::{
    Client, ClientConfig, ConnectionManager, SessionState, TracingPresenter, WebSocketTransport,
};
use reversi_protocol::ROOM_CAPACITY;
use std::time::Duration;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

const REGISTRATION_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { server_url, name } => {
            let config = config.with_overrides(server_url, name);
            let name = config.require_player_name()?.to_string();
            tui::run_tui(config, name).await
        }
        Command::Rooms {
            server_url,
            name,
            wait_ms,
        } => {
            let config = config.with_overrides(server_url, name);
            run_rooms(config, Duration::from_millis(wait_ms)).await
        }
    }
}

/// Registers, collects room updates for `wait`, prints the list, and
/// disconnects.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
async fn run_rooms(config: ClientConfig, wait: Duration) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let name = config.require_player_name()?.to_string();
    let (transport, mut events) = WebSocketTransport::channel();
    let connection = ConnectionManager::new(config.server_url().clone(), transport);
    let mut client = Client::new(connection, TracingPresenter::new());
    client.connect(&name)?;

    // Wait for registration, then keep listening for late room updates
    let deadline = tokio::time::sleep(REGISTRATION_TIMEOUT);
    tokio::pin!(deadline);
    let mut registered = false;
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                client.handle_event(event);
                if !client.is_connected() {
                    warn!("Server closed the connection");
                    break;
                }
                if !registered && client.session_state() == SessionState::Registered {
                    registered = true;
                    deadline.as_mut().reset(tokio::time::Instant::now() + wait);
                }
            }
            _ = &mut deadline => break,
            else => break,
        }
    }
    client.close();

    if !registered {
        anyhow::bail!("Server did not register {}", name);
    }

    let rooms = client.presenter().rooms();
    info!(count = rooms.len(), "Room list received");
    if rooms.is_empty() {
        println!("No rooms");
    }
    for room in rooms {
        println!("{}\t{}\t{}/{}", room.room_uuid, room.name, room.count, ROOM_CAPACITY);
    }
    Ok(())
}
