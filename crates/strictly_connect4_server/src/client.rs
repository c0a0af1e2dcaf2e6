//! Typed HTTP client for the session protocol.

use crate::protocol::{
    AutomatedMoveResponse, ErrorResponse, HealthResponse, MoveRequest, OpponentsResponse,
    ResetResponse, SetOpponentRequest, SetOpponentResponse, SnapshotResponse,
};
use derive_more::Display;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Failure talking to the server.
#[derive(Debug, Display)]
pub enum ClientError {
    /// The request never got a response.
    #[display("Cannot connect to {url}: {source}")]
    Connection {
        /// Requested URL.
        url: String,
        /// Transport error.
        source: reqwest::Error,
    },
    /// The server rejected the request.
    #[display("{message}")]
    Game {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error kind.
        kind: String,
        /// Server message.
        message: String,
    },
    /// The response did not have the expected shape.
    #[display("Unexpected response: {message}")]
    Protocol {
        /// What went wrong.
        message: String,
    },
}

impl ClientError {
    /// True if the server could not be reached.
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection { .. })
    }

    /// Error kind reported by the server, if it answered with one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ClientError::Game { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Connection { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Client for one game server.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:5001`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Drops a piece for the human side.
    #[instrument(skip(self))]
    pub async fn make_move(&self, column: i64) -> Result<SnapshotResponse, ClientError> {
        let url = self.url("/move");
        let request = self.client.post(&url).json(&MoveRequest { column });
        self.send(url, request).await
    }

    /// Asks the automated opponent to move.
    #[instrument(skip(self))]
    pub async fn automated_move(&self) -> Result<AutomatedMoveResponse, ClientError> {
        let url = self.url("/ai-move");
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<ResetResponse, ClientError> {
        let url = self.url("/reset");
        let request = self.client.post(&url);
        self.send(url, request).await
    }

    /// Lists the available opponents.
    #[instrument(skip(self))]
    pub async fn opponents(&self) -> Result<OpponentsResponse, ClientError> {
        let url = self.url("/get-opponents");
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    /// Selects an opponent by wire id, or `human` for two-player.
    #[instrument(skip(self))]
    pub async fn set_opponent(&self, id: &str) -> Result<SetOpponentResponse, ClientError> {
        let url = self.url("/set-opponent");
        let request = self.client.post(&url).json(&SetOpponentRequest {
            ai_type: id.to_string(),
        });
        self.send(url, request).await
    }

    /// Fetches the current state.
    #[instrument(skip(self))]
    pub async fn state(&self) -> Result<SnapshotResponse, ClientError> {
        let url = self.url("/state");
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    /// Checks that the server is up.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.url("/health");
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: String,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|source| {
            warn!(url = %url, error = %source, "Server unreachable");
            ClientError::Connection {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ClientError::Protocol {
            message: format!("Failed to read response body: {}", e),
        })?;
        debug!(url = %url, %status, bytes = body.len(), "Response received");

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| ClientError::Protocol {
                message: format!("Failed to decode response: {}", e),
            });
        }

        match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(err) => Err(ClientError::Game {
                status: status.as_u16(),
                kind: err.kind,
                message: err.error,
            }),
            Err(_) => Err(ClientError::Protocol {
                message: format!("HTTP {} without error body", status),
            }),
        }
    }
}
