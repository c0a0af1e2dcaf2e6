//! Server configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_connect4::{EngineConfig, Mode, OpponentId, OpponentRegistry};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Deepest search the server accepts.
const MAX_DEPTH: u8 = 10;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,
    /// Port to bind.
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

/// Complete server configuration.
///
/// ```toml
/// opponents = ["alphaBetaAI", "randomAI"]
/// default_opponent = "alphaBetaAI"
///
/// [server]
/// host = "0.0.0.0"
/// port = 5001
///
/// [engine]
/// alpha_beta_depth = 6
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    server: ServerConfig,
    /// Strategy tuning.
    engine: EngineConfig,
    /// Opponents offered to clients.
    #[serde(default = "all_opponents")]
    opponents: Vec<OpponentId>,
    /// Opponent selected at startup and after a restart.
    default_opponent: OpponentId,
}

fn all_opponents() -> Vec<OpponentId> {
    OpponentId::iter().collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            opponents: all_opponents(),
            default_opponent: OpponentId::AlphaBeta,
        }
    }
}

impl AppConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            opponents = config.opponents.len(),
            default_opponent = %config.default_opponent,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges and opponent consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        for (name, depth) in [
            ("alpha_beta_depth", *engine.alpha_beta_depth()),
            ("minimax_depth", *engine.minimax_depth()),
        ] {
            if !(1..=MAX_DEPTH).contains(&depth) {
                return Err(ConfigError::new(format!(
                    "{name} must be between 1 and {MAX_DEPTH}, got {depth}"
                )));
            }
        }
        if *engine.monte_carlo_playouts() == 0 {
            return Err(ConfigError::new(
                "monte_carlo_playouts must be at least 1".to_string(),
            ));
        }
        if self.opponents.is_empty() {
            return Err(ConfigError::new("No opponents enabled".to_string()));
        }
        if !self.opponents.contains(&self.default_opponent) {
            return Err(ConfigError::new(format!(
                "Default opponent {} is not enabled",
                self.default_opponent
            )));
        }
        Ok(())
    }

    /// Applies command-line and environment overrides to the listener.
    ///
    /// The port comes from `port`, then the `PORT` variable, then the file.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        self.server.port = resolve_port(port, std::env::var("PORT").ok(), self.server.port);
        self
    }

    /// Builds the opponent registry for the enabled opponents.
    pub fn registry(&self) -> OpponentRegistry {
        OpponentRegistry::with_opponents(&self.engine, &self.opponents)
    }

    /// Mode a fresh server starts in.
    pub fn initial_mode(&self) -> Mode {
        Mode::HumanVsAutomated(self.default_opponent)
    }
}

/// Picks the listening port from the CLI flag, the environment or the file.
fn resolve_port(cli: Option<u16>, env: Option<String>, file: u16) -> u16 {
    if let Some(port) = cli {
        return port;
    }
    match env.map(|value| value.parse::<u16>()) {
        Some(Ok(port)) => port,
        Some(Err(e)) => {
            warn!(error = %e, "Ignoring invalid PORT variable");
            file
        }
        None => file,
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
