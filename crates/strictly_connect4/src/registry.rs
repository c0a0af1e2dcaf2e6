//! Catalogue of automated opponents.
//!
//! The registry is built once at startup from an [`EngineConfig`] and is
//! read-only afterwards. Listing order follows the declaration order of
//! [`OpponentId`].

use crate::board::Board;
use crate::engine::{
    AlphaBeta, EngineConfig, FixedOrder, Minimax, MonteCarlo, RandomMove, Strategy, select_move,
};
use crate::error::GameError;
use crate::types::Side;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Wire id that selects human-vs-human play. Not a registry entry.
pub const HUMAN_ID: &str = "human";

/// Display name of the human-vs-human entry.
pub const HUMAN_DISPLAY_NAME: &str = "Human (Local 2-Player)";

/// Identifier of an automated opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum OpponentId {
    /// Negamax with alpha-beta pruning.
    #[serde(rename = "alphaBetaAI")]
    #[strum(serialize = "alphaBetaAI")]
    AlphaBeta,
    /// Plain minimax.
    #[serde(rename = "minimaxAI")]
    #[strum(serialize = "minimaxAI")]
    Minimax,
    /// Random playouts.
    #[serde(rename = "monteCarloAI")]
    #[strum(serialize = "monteCarloAI")]
    MonteCarlo,
    /// Uniformly random column.
    #[serde(rename = "randomAI")]
    #[strum(serialize = "randomAI")]
    Random,
    /// Fixed column preference.
    #[serde(rename = "stupidAI")]
    #[strum(serialize = "stupidAI")]
    FixedOrder,
}

impl OpponentId {
    /// Wire id string.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Human-readable name shown in opponent pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            OpponentId::AlphaBeta => "Alpha-Beta AI (Hard)",
            OpponentId::Minimax => "Minimax AI (Medium)",
            OpponentId::MonteCarlo => "Monte Carlo AI (Medium)",
            OpponentId::Random => "Random AI (Easy)",
            OpponentId::FixedOrder => "Stupid AI (Very Easy)",
        }
    }

    /// Parses a wire id.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownOpponent`] if the string names no opponent.
    pub fn parse(id: &str) -> Result<Self, GameError> {
        Self::from_str(id).map_err(|_| GameError::UnknownOpponent { id: id.to_string() })
    }

    fn build(self, config: &EngineConfig) -> Arc<dyn Strategy> {
        match self {
            OpponentId::AlphaBeta => Arc::new(AlphaBeta::new(*config.alpha_beta_depth())),
            OpponentId::Minimax => Arc::new(Minimax::new(*config.minimax_depth())),
            OpponentId::MonteCarlo => {
                Arc::new(MonteCarlo::new(*config.monte_carlo_playouts(), *config.seed()))
            }
            OpponentId::Random => Arc::new(RandomMove::new(*config.seed())),
            OpponentId::FixedOrder => Arc::new(FixedOrder),
        }
    }
}

/// A registered opponent.
#[derive(Debug, Clone, Getters)]
pub struct OpponentDescriptor {
    /// Opponent id.
    id: OpponentId,
    #[getter(skip)]
    display_name: &'static str,
    /// Move-selection strategy.
    strategy: Arc<dyn Strategy>,
}

impl OpponentDescriptor {
    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }
}

/// Read-only set of enabled opponents.
#[derive(Debug, Clone)]
pub struct OpponentRegistry {
    opponents: Vec<OpponentDescriptor>,
}

impl OpponentRegistry {
    /// Registers every opponent.
    pub fn new(config: &EngineConfig) -> Self {
        let all: Vec<OpponentId> = OpponentId::iter().collect();
        Self::with_opponents(config, &all)
    }

    /// Registers only the listed opponents, kept in declaration order.
    #[instrument(skip(config))]
    pub fn with_opponents(config: &EngineConfig, enabled: &[OpponentId]) -> Self {
        let opponents: Vec<OpponentDescriptor> = OpponentId::iter()
            .filter(|id| enabled.contains(id))
            .map(|id| OpponentDescriptor {
                id,
                display_name: id.display_name(),
                strategy: id.build(config),
            })
            .collect();
        debug!(count = opponents.len(), "Opponent registry built");
        Self { opponents }
    }

    /// Descriptors in declaration order.
    pub fn list(&self) -> &[OpponentDescriptor] {
        &self.opponents
    }

    /// Returns the descriptor for `id`.
    ///
    /// # Errors
    ///
    /// [`GameError::OpponentNotFound`] if `id` is not enabled.
    pub fn get(&self, id: OpponentId) -> Result<&OpponentDescriptor, GameError> {
        self.opponents
            .iter()
            .find(|descriptor| descriptor.id == id)
            .ok_or(GameError::OpponentNotFound { id })
    }

    /// Parses a wire id and returns its descriptor.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownOpponent`] for an unrecognised string,
    /// [`GameError::OpponentNotFound`] for a disabled opponent.
    pub fn lookup(&self, id: &str) -> Result<&OpponentDescriptor, GameError> {
        self.get(OpponentId::parse(id)?)
    }

    /// Asks opponent `id` for a move through the shared dispatcher.
    pub fn select_move(
        &self,
        id: OpponentId,
        board: &Board,
        side: Side,
    ) -> Result<usize, GameError> {
        let descriptor = self.get(id)?;
        select_move(board, side, descriptor.strategy.as_ref())
    }

    /// True if `id` is enabled.
    pub fn contains(&self, id: OpponentId) -> bool {
        self.opponents.iter().any(|descriptor| descriptor.id == id)
    }

    /// Number of enabled opponents.
    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    /// True if no opponent is enabled.
    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }
}

impl Default for OpponentRegistry {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids_round_trip() {
        for id in OpponentId::iter() {
            assert_eq!(OpponentId::parse(id.as_str()), Ok(id));
            assert_eq!(id.to_string(), id.as_str());
        }
        assert_eq!(OpponentId::AlphaBeta.as_str(), "alphaBetaAI");
        assert_eq!(OpponentId::FixedOrder.as_str(), "stupidAI");
    }

    #[test]
    fn test_serde_uses_wire_ids() {
        let json = serde_json::to_string(&OpponentId::MonteCarlo).unwrap();
        assert_eq!(json, "\"monteCarloAI\"");
        let id: OpponentId = serde_json::from_str("\"randomAI\"").unwrap();
        assert_eq!(id, OpponentId::Random);
    }

    #[test]
    fn test_list_keeps_declaration_order() {
        let registry = OpponentRegistry::default();
        let ids: Vec<OpponentId> = registry.list().iter().map(|d| *d.id()).collect();
        assert_eq!(ids, OpponentId::iter().collect::<Vec<_>>());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_subset_registry() {
        let registry = OpponentRegistry::with_opponents(
            &EngineConfig::default(),
            &[OpponentId::Random, OpponentId::AlphaBeta],
        );
        let ids: Vec<OpponentId> = registry.list().iter().map(|d| *d.id()).collect();
        assert_eq!(ids, vec![OpponentId::AlphaBeta, OpponentId::Random]);
        assert_eq!(
            registry.get(OpponentId::Minimax).unwrap_err(),
            GameError::OpponentNotFound {
                id: OpponentId::Minimax
            }
        );
    }

    #[test]
    fn test_display_names_outlive_registry() {
        let names: Vec<&'static str> = {
            let registry = OpponentRegistry::default();
            registry
                .list()
                .iter()
                .map(OpponentDescriptor::display_name)
                .collect()
        };
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "Alpha-Beta AI (Hard)");
        assert_eq!(names[4], "Stupid AI (Very Easy)");
    }

    #[test]
    fn test_lookup_errors() {
        let registry = OpponentRegistry::default();
        assert_eq!(
            registry.lookup("deepBlue").unwrap_err().kind(),
            "unknown_opponent"
        );
        assert_eq!(*registry.lookup("minimaxAI").unwrap().id(), OpponentId::Minimax);
        assert_eq!(registry.lookup(HUMAN_ID).unwrap_err().kind(), "unknown_opponent");
    }

    #[test]
    fn test_every_opponent_moves_on_empty_board() {
        let config = EngineConfig::new(3, 2, 50, 9);
        let registry = OpponentRegistry::new(&config);
        let board = Board::new();
        for descriptor in registry.list() {
            let col = registry
                .select_move(*descriptor.id(), &board, Side::First)
                .unwrap();
            assert!(col < crate::types::COLS);
        }
    }
}
