//! HTTP bindings for the session protocol.

use crate::controller::{SessionController, mode_id};
use crate::protocol::{
    AutomatedMoveResponse, ErrorResponse, HealthResponse, MoveRequest, OpponentsResponse,
    ResetResponse, SetOpponentRequest, SetOpponentResponse, SnapshotResponse,
};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use strictly_connect4::GameError;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

/// Builds the router with open CORS for browser clients.
pub fn router(controller: SessionController) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/move", post(make_move))
        .route("/ai-move", get(automated_move))
        .route("/reset", post(reset))
        .route("/get-opponents", get(get_opponents))
        .route("/set-opponent", post(set_opponent))
        .route("/state", get(state))
        .route("/health", get(health))
        .layer(cors)
        .with_state(controller)
}

/// Error reply carrying an HTTP status and an [`ErrorResponse`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn malformed(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: message,
                kind: "malformed_request".to_string(),
            },
        }
    }
}

/// HTTP status for a rejected game operation.
pub fn status_for(err: &GameError) -> StatusCode {
    match err {
        GameError::ColumnOutOfRange { .. }
        | GameError::UnknownOpponent { .. }
        | GameError::InvalidBoard { .. } => StatusCode::BAD_REQUEST,
        GameError::OpponentNotFound { .. } => StatusCode::NOT_FOUND,
        GameError::ColumnFull { .. }
        | GameError::WrongTurn { .. }
        | GameError::GameOver
        | GameError::NotAutomatedTurn
        | GameError::GameAlreadyStarted => StatusCode::CONFLICT,
        GameError::NoLegalMove => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = status_for(&err);
        warn!(kind = err.kind(), %status, error = %err, "Request rejected");
        Self {
            status,
            body: ErrorResponse {
                error: err.to_string(),
                kind: err.kind().to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "Malformed request body");
        Self::malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[instrument(skip(controller, body))]
async fn make_move(
    State(controller): State<SessionController>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let Json(request) = body?;
    info!(column = request.column, "Human move requested");
    let snapshot = controller.apply_move(request.column)?;
    Ok(Json(SnapshotResponse::from(&snapshot)))
}

#[instrument(skip(controller))]
async fn automated_move(
    State(controller): State<SessionController>,
) -> Result<Json<AutomatedMoveResponse>, ApiError> {
    let (snapshot, column) = controller.request_automated_move().await?;
    Ok(Json(AutomatedMoveResponse {
        snapshot: SnapshotResponse::from(&snapshot),
        column,
    }))
}

#[instrument(skip(controller))]
async fn reset(State(controller): State<SessionController>) -> Json<ResetResponse> {
    let snapshot = controller.reset();
    Json(ResetResponse {
        is_human_vs_human: snapshot.mode.is_human_vs_human(),
        snapshot: SnapshotResponse::from(&snapshot),
    })
}

#[instrument(skip(controller))]
async fn get_opponents(State(controller): State<SessionController>) -> Json<OpponentsResponse> {
    Json(controller.describe_opponents())
}

#[instrument(skip(controller, body))]
async fn set_opponent(
    State(controller): State<SessionController>,
    body: Result<Json<SetOpponentRequest>, JsonRejection>,
) -> Result<Json<SetOpponentResponse>, ApiError> {
    let Json(request) = body?;
    let mode = controller.set_opponent(&request.ai_type)?;
    info!(current = mode_id(mode), "Opponent selected");
    Ok(Json(SetOpponentResponse {
        is_human_vs_human: mode.is_human_vs_human(),
        current: mode_id(mode).to_string(),
    }))
}

#[instrument(skip(controller))]
async fn state(State(controller): State<SessionController>) -> Json<SnapshotResponse> {
    Json(SnapshotResponse::from(&controller.snapshot()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_connect4::{OpponentId, Side};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&GameError::ColumnOutOfRange { column: 8 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&GameError::OpponentNotFound {
                id: OpponentId::Random
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&GameError::WrongTurn {
                active: Side::Second
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&GameError::NoLegalMove),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_body_carries_kind() {
        let err = ApiError::from(GameError::GameOver);
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.body.kind, "game_over");
        assert_eq!(err.body.error, "Game is already over");
    }
}
