//! Tic-tac-toe HTTP backend entrypoint.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_api::{AppState, ServerConfig, serve};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
    }
}

/// Run the HTTP game server
async fn run_server(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load(config.as_deref(), host, port)?;
    info!(host = %config.host(), port = config.port(), "Starting tic-tac-toe server");
    info!("Press Ctrl+C to quit");

    serve(&config, AppState::default()).await
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tictactoe_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
