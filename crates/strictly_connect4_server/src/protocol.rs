//! JSON request and response bodies shared by the router and the client.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strictly_connect4::{Coord, Grid, SessionSnapshot};

/// Body of `POST /move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Column to drop into. Signed so out-of-range values reach validation.
    pub column: i64,
}

/// Body of `POST /set-opponent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOpponentRequest {
    /// Opponent wire id, or `human` for local two-player.
    pub ai_type: String,
}

/// Full game state as seen by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    /// Rows top to bottom, 0 empty, 1/2 for a side.
    pub board: Grid,
    /// Side to move, 1 or 2.
    pub current_player: u8,
    /// True once the game has ended.
    pub game_over: bool,
    /// `None` in progress, 0 for a draw, 1/2 for the winner.
    pub winner: Option<u8>,
    /// The four `[row, col]` cells of the winning line.
    pub winning_line: Option<[[usize; 2]; 4]>,
}

impl From<&SessionSnapshot> for SnapshotResponse {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            board: snapshot.board.to_grid(),
            current_player: snapshot.active_side.to_wire(),
            game_over: snapshot.status.is_over(),
            winner: snapshot.status.winner_wire(),
            winning_line: snapshot
                .winning_line
                .map(|line| line.cells.map(Coord::to_pair)),
        }
    }
}

/// Body of `GET /ai-move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedMoveResponse {
    /// State after the move.
    #[serde(flatten)]
    pub snapshot: SnapshotResponse,
    /// Column the opponent played.
    #[serde(rename = "move")]
    pub column: usize,
}

/// Body of `POST /reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    /// True in local two-player mode.
    pub is_human_vs_human: bool,
    /// The fresh game.
    #[serde(flatten)]
    pub snapshot: SnapshotResponse,
}

/// One entry of the opponent picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentEntry {
    /// Wire id.
    pub id: String,
    /// Name shown to players.
    pub display_name: String,
}

/// Opponent picker entries, serialized as an id-to-name object in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpponentList(pub Vec<OpponentEntry>);

impl OpponentList {
    /// Display name registered for `id`.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.display_name.as_str())
    }

    /// Wire ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.id.as_str()).collect()
    }
}

impl Serialize for OpponentList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.id, &entry.display_name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OpponentList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = OpponentList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of opponent ids to display names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((id, display_name)) = map.next_entry::<String, String>()? {
                    entries.push(OpponentEntry { id, display_name });
                }
                Ok(OpponentList(entries))
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}

/// Body of `GET /get-opponents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentsResponse {
    /// Available opponents, ending with the human entry.
    pub opponents: OpponentList,
    /// Currently selected wire id.
    pub current: String,
    /// True in local two-player mode.
    pub is_human_vs_human: bool,
}

/// Body of `POST /set-opponent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOpponentResponse {
    /// True in local two-player mode.
    pub is_human_vs_human: bool,
    /// Selected wire id.
    pub current: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error kind.
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_connect4::{GameSession, Mode};

    #[test]
    fn test_opponent_list_keeps_order() {
        let list = OpponentList(vec![
            OpponentEntry {
                id: "stupidAI".to_string(),
                display_name: "Stupid".to_string(),
            },
            OpponentEntry {
                id: "alphaBetaAI".to_string(),
                display_name: "Alpha".to_string(),
            },
        ]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"stupidAI":"Stupid","alphaBetaAI":"Alpha"}"#);
        let back: OpponentList = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ids(), vec!["stupidAI", "alphaBetaAI"]);
        assert_eq!(back.display_name("alphaBetaAI"), Some("Alpha"));
    }

    #[test]
    fn test_fresh_snapshot_shape() {
        let session = GameSession::new(Mode::HumanVsHuman);
        let value = serde_json::to_value(SnapshotResponse::from(&session.snapshot())).unwrap();
        assert_eq!(value["current_player"], 1);
        assert_eq!(value["game_over"], false);
        assert!(value["winner"].is_null());
        assert!(value["winning_line"].is_null());
        assert_eq!(value["board"].as_array().unwrap().len(), 6);
        assert_eq!(value["board"][0].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_automated_move_flattens_snapshot() {
        let session = GameSession::new(Mode::HumanVsHuman);
        let response = AutomatedMoveResponse {
            snapshot: SnapshotResponse::from(&session.snapshot()),
            column: 3,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["move"], 3);
        assert_eq!(value["current_player"], 1);
        let back: AutomatedMoveResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back, response);
    }
}
