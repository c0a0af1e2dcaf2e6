//! Strictly Connect4 server library
//!
//! Hosts one authoritative connect-four session behind a JSON
//! request/response protocol.
//!
//! # Architecture
//!
//! - **Controller**: serialized handle around the live session and registry
//! - **Protocol**: request and response bodies
//! - **Routes**: axum router binding the protocol to HTTP
//! - **Client**: typed reqwest client for the same protocol
//! - **Config**: TOML configuration with CLI and environment overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod config;
mod controller;
mod protocol;
mod routes;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, ServerConfig};

// Crate-level exports - Session controller
pub use controller::{SessionController, mode_id};

// Crate-level exports - Wire protocol
pub use protocol::{
    AutomatedMoveResponse, ErrorResponse, HealthResponse, MoveRequest, OpponentEntry,
    OpponentList, OpponentsResponse, ResetResponse, SetOpponentRequest, SetOpponentResponse,
    SnapshotResponse,
};

// Crate-level exports - HTTP routes
pub use routes::{ApiError, router, status_for};

// Crate-level exports - Client
pub use client::{ClientError, GameClient};
