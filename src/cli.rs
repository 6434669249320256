//! Command-line interface for reversi_client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reversi client - play two-player reversi against other people on a room server
#[derive(Parser, Debug)]
#[command(name = "reversi_client")]
#[command(about = "Terminal client for a reversi room server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(long, global = true, default_value = "reversi_client.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive terminal client
    Play {
        /// WebSocket endpoint of the room server
        #[arg(long)]
        server_url: Option<String>,

        /// Name to register with
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Register, print the room list, and disconnect
    Rooms {
        /// WebSocket endpoint of the room server
        #[arg(long)]
        server_url: Option<String>,

        /// Name to register with
        #[arg(short, long)]
        name: Option<String>,

        /// Milliseconds to collect room updates after registering
        #[arg(long, default_value = "500")]
        wait_ms: u64,
    },
}
