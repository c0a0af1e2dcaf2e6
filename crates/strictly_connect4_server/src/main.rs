//! Strictly Connect4 - Unified CLI
//!
//! Runs the game server, lists opponents, or plays automated matches.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_connect4::{OpponentId, Status, play_match};
use strictly_connect4_server::{AppConfig, SessionController, router};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_connect4=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Opponents { config } => list_opponents(config),
        Command::Match {
            first,
            second,
            config,
        } => run_match(config, first, second),
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(config: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = AppConfig::load(&config)?.with_overrides(host, port);
    let controller = SessionController::from_config(&config)?;
    let app = router(controller);

    let addr = (config.server().host().as_str(), *config.server().port());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Print the enabled opponents
fn list_opponents(config: PathBuf) -> Result<()> {
    let config = AppConfig::load(&config)?;
    let registry = config.registry();
    for descriptor in registry.list() {
        let marker = if *descriptor.id() == *config.default_opponent() {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<14} {}{}",
            descriptor.id().as_str(),
            descriptor.display_name(),
            marker
        );
    }
    Ok(())
}

/// Play one automated match and print the result
#[instrument]
fn run_match(config: PathBuf, first: OpponentId, second: OpponentId) -> Result<()> {
    let config = AppConfig::load(&config)?;
    let registry = config.registry();
    let report = play_match(&registry, first, second)?;

    println!("{}", report.board());
    let columns: Vec<String> = report.moves().iter().map(|c| c.to_string()).collect();
    println!("Moves: {}", columns.join(" "));
    match report.status() {
        Status::Won(side) => println!(
            "{} wins as {} after {} moves",
            report.winner().map(OpponentId::as_str).unwrap_or("?"),
            side,
            report.moves().len()
        ),
        Status::Drawn => println!("Draw after {} moves", report.moves().len()),
        Status::InProgress => warn!("Match ended without a result"),
    }
    Ok(())
}

/// Completes when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
