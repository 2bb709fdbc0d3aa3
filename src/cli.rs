//! Command-line interface for tictactoe_api.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe HTTP backend
#[derive(Parser, Debug)]
#[command(name = "tictactoe_api")]
#[command(about = "Two-player tic-tac-toe HTTP backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config and environment)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and environment)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
