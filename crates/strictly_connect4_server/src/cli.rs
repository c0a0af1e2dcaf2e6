//! Command-line interface for the connect4 binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_connect4::OpponentId;

/// Strictly Connect4 - connect-four game server with automated opponents
#[derive(Parser, Debug)]
#[command(name = "connect4")]
#[command(about = "Connect-four game server with automated opponents", long_about = None)]
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
        /// Path to the TOML config (defaults apply if it does not exist)
        #[arg(short, long, default_value = "connect4.toml")]
        config: PathBuf,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the enabled opponents
    Opponents {
        /// Path to the TOML config
        #[arg(short, long, default_value = "connect4.toml")]
        config: PathBuf,
    },

    /// Play two automated opponents against each other
    Match {
        /// Opponent moving first (e.g. alphaBetaAI)
        #[arg(long, value_parser = parse_opponent)]
        first: OpponentId,

        /// Opponent moving second
        #[arg(long, value_parser = parse_opponent)]
        second: OpponentId,

        /// Path to the TOML config
        #[arg(short, long, default_value = "connect4.toml")]
        config: PathBuf,
    },
}

fn parse_opponent(value: &str) -> Result<OpponentId, String> {
    OpponentId::parse(value).map_err(|e| e.to_string())
}
