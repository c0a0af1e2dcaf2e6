//! Serialized access to the one live game session.

use crate::config::AppConfig;
use crate::protocol::{OpponentEntry, OpponentList, OpponentsResponse};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_connect4::{
    COLS, GameError, GameSession, HUMAN_DISPLAY_NAME, HUMAN_ID, Mode, OpponentRegistry,
    SessionSnapshot,
};
use tracing::{debug, info, instrument, warn};

/// Cloneable handle to the session and the opponent registry.
///
/// Every operation holds the session lock for its whole duration, so
/// operations never interleave.
#[derive(Debug, Clone)]
pub struct SessionController {
    session: Arc<Mutex<GameSession>>,
    registry: Arc<OpponentRegistry>,
}

impl SessionController {
    /// Creates a controller with a fresh session in `mode`.
    ///
    /// # Errors
    ///
    /// [`GameError::OpponentNotFound`] if `mode` names an opponent the
    /// registry does not hold.
    #[instrument(skip(registry), fields(opponents = registry.len()))]
    pub fn new(registry: OpponentRegistry, mode: Mode) -> Result<Self, GameError> {
        Self::with_session(registry, GameSession::new(mode))
    }

    /// Creates a controller around an existing session.
    ///
    /// # Errors
    ///
    /// [`GameError::OpponentNotFound`] if the session's mode names an
    /// opponent the registry does not hold.
    pub fn with_session(
        registry: OpponentRegistry,
        session: GameSession,
    ) -> Result<Self, GameError> {
        if let Some(id) = session.snapshot().mode.opponent() {
            registry.get(id)?;
        }
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            registry: Arc::new(registry),
        })
    }

    /// Creates a controller from loaded configuration.
    ///
    /// # Errors
    ///
    /// [`GameError::OpponentNotFound`] if the default opponent is disabled.
    pub fn from_config(config: &AppConfig) -> Result<Self, GameError> {
        Self::new(config.registry(), config.initial_mode())
    }

    /// The opponent registry.
    pub fn registry(&self) -> &OpponentRegistry {
        &self.registry
    }

    fn lock(&self) -> MutexGuard<'_, GameSession> {
        lock_session(&self.session)
    }

    /// Plays a human move.
    #[instrument(skip(self))]
    pub fn apply_move(&self, column: i64) -> Result<SessionSnapshot, GameError> {
        let column = checked_column(column)?;
        let mut session = self.lock();
        session.apply_move(column)?;
        Ok(session.snapshot())
    }

    /// Lets the automated opponent move, returning the new state and column.
    ///
    /// The search runs on the blocking pool with the session locked.
    #[instrument(skip(self))]
    pub async fn request_automated_move(&self) -> Result<(SessionSnapshot, usize), GameError> {
        let session = Arc::clone(&self.session);
        let registry = Arc::clone(&self.registry);
        let task = tokio::task::spawn_blocking(move || -> Result<_, GameError> {
            let mut session = lock_session(&session);
            let outcome = session.request_automated_move(&registry)?;
            Ok((session.snapshot(), outcome.column))
        });
        match task.await {
            Ok(result) => result,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }

    /// Starts a new game in the current mode.
    #[instrument(skip(self))]
    pub fn reset(&self) -> SessionSnapshot {
        let mut session = self.lock();
        session.reset();
        info!("Session reset");
        session.snapshot()
    }

    /// Selects an opponent by wire id, or local two-player for `human`.
    #[instrument(skip(self))]
    pub fn set_opponent(&self, id: &str) -> Result<Mode, GameError> {
        let mode = if id == HUMAN_ID {
            Mode::HumanVsHuman
        } else {
            Mode::HumanVsAutomated(*self.registry.lookup(id)?.id())
        };
        self.lock().set_mode(mode)?;
        Ok(mode)
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Opponent picker contents and the current selection.
    pub fn describe_opponents(&self) -> OpponentsResponse {
        let mode = self.lock().snapshot().mode;
        let mut entries: Vec<OpponentEntry> = self
            .registry
            .list()
            .iter()
            .map(|descriptor| OpponentEntry {
                id: descriptor.id().as_str().to_string(),
                display_name: descriptor.display_name().to_string(),
            })
            .collect();
        entries.push(OpponentEntry {
            id: HUMAN_ID.to_string(),
            display_name: HUMAN_DISPLAY_NAME.to_string(),
        });
        debug!(count = entries.len(), "Describing opponents");

        OpponentsResponse {
            opponents: OpponentList(entries),
            current: mode_id(mode).to_string(),
            is_human_vs_human: mode.is_human_vs_human(),
        }
    }
}

/// Wire id of the opponent selected by `mode`.
pub fn mode_id(mode: Mode) -> &'static str {
    match mode.opponent() {
        Some(id) => id.as_str(),
        None => HUMAN_ID,
    }
}

fn checked_column(column: i64) -> Result<usize, GameError> {
    usize::try_from(column)
        .ok()
        .filter(|&c| c < COLS)
        .ok_or(GameError::ColumnOutOfRange { column })
}

fn lock_session(session: &Mutex<GameSession>) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(|poisoned| {
        warn!("Session lock poisoned, recovering");
        PoisonError::into_inner(poisoned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_connect4::{EngineConfig, OpponentId, Side, Status};

    fn controller() -> SessionController {
        SessionController::new(
            OpponentRegistry::new(&EngineConfig::new(3, 2, 20, 1)),
            Mode::HumanVsAutomated(OpponentId::FixedOrder),
        )
        .unwrap()
    }

    #[test]
    fn test_disabled_initial_opponent_is_rejected() {
        let registry =
            OpponentRegistry::with_opponents(&EngineConfig::default(), &[OpponentId::Random]);
        let err = SessionController::new(
            registry.clone(),
            Mode::HumanVsAutomated(OpponentId::AlphaBeta),
        )
        .unwrap_err();
        assert_eq!(
            err,
            GameError::OpponentNotFound {
                id: OpponentId::AlphaBeta
            }
        );

        assert!(SessionController::new(registry.clone(), Mode::HumanVsHuman).is_ok());
        assert!(
            SessionController::with_session(
                registry,
                GameSession::new(Mode::HumanVsAutomated(OpponentId::Random)),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_negative_column_is_out_of_range() {
        let controller = controller();
        assert_eq!(
            controller.apply_move(-1),
            Err(GameError::ColumnOutOfRange { column: -1 })
        );
        assert_eq!(
            controller.apply_move(7),
            Err(GameError::ColumnOutOfRange { column: 7 })
        );
        assert!(controller.snapshot().board.is_empty());
    }

    #[tokio::test]
    async fn test_automated_reply_follows_human_move() {
        let controller = controller();
        let snapshot = controller.apply_move(0).unwrap();
        assert_eq!(snapshot.active_side, Side::Second);

        let (snapshot, column) = controller.request_automated_move().await.unwrap();
        assert_eq!(column, 3);
        assert_eq!(snapshot.active_side, Side::First);
        assert_eq!(snapshot.status, Status::InProgress);
    }

    #[test]
    fn test_set_opponent_human_and_unknown() {
        let controller = controller();
        assert_eq!(controller.set_opponent("human"), Ok(Mode::HumanVsHuman));
        assert_eq!(
            controller.set_opponent("deepBlue").unwrap_err().kind(),
            "unknown_opponent"
        );
        assert_eq!(
            controller.set_opponent("minimaxAI"),
            Ok(Mode::HumanVsAutomated(OpponentId::Minimax))
        );
    }

    #[test]
    fn test_describe_opponents_ends_with_human() {
        let controller = controller();
        let view = controller.describe_opponents();
        assert_eq!(
            view.opponents.ids(),
            vec![
                "alphaBetaAI",
                "minimaxAI",
                "monteCarloAI",
                "randomAI",
                "stupidAI",
                "human"
            ]
        );
        assert_eq!(view.current, "stupidAI");
        assert!(!view.is_human_vs_human);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let controller = controller();
        let clone = controller.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.session.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(controller.session.is_poisoned());
        assert!(controller.apply_move(2).is_ok());
    }
}
