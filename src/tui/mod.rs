//! Terminal UI for the reversi client

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reversi_client::{Client, ClientConfig, ConnectionManager, SessionState, WebSocketTransport};
use std::io;
use tracing::{error, info, instrument};

use app::{App, KeyAction};

/// Run the TUI client
pub async fn run_tui(config: ClientConfig, name: String) -> Result<()> {
    // Logs go to a file so they do not corrupt the terminal
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), %name, "Starting reversi TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config, &name).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Single application loop: draws, then waits for one socket event or key.
#[instrument(skip_all, fields(name = %name))]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
    name: &str,
) -> Result<()> {
    let (transport, mut events) = WebSocketTransport::channel();
    let mut keys = input::spawn_key_reader();
    let connection = ConnectionManager::new(config.server_url().clone(), transport);
    let mut client = Client::new(connection, App::new());

    // A failed connect is already in the message log
    let _ = client.connect(name);

    loop {
        terminal.draw(|frame| ui::draw(frame, client.presenter()))?;

        tokio::select! {
            Some(event) = events.recv() => {
                client.handle_event(event);
                if !client.is_connected() && client.presenter().state() != SessionState::Unregistered {
                    client.presenter_mut().disconnected();
                }
            }
            Some(key) = keys.recv() => {
                match client.presenter_mut().handle_key(key) {
                    Some(KeyAction::Quit) => break,
                    Some(KeyAction::Reconnect) => {
                        let _ = client.connect(name);
                    }
                    // Rejections are already in the message log
                    Some(KeyAction::Intent(intent)) => {
                        let _ = client.perform(intent);
                    }
                    None => {}
                }
            }
            else => break,
        }
    }

    info!("Quitting");
    client.close();
    Ok(())
}
