//! Session registry
//!
//! Maps session ids to live games. The map sits behind a `RwLock` and each
//! game behind its own `Mutex`, so moves in different sessions never contend
//! and a single session sees one writer at a time.
//!
//! Each entry also carries its settlement flag, so a result is claimed at
//! most once per session and the flag goes away with the session.

use crate::error::RegistryError;
use crate::settlement::SettlementRequest;
use chess_engine::{ChessGame, GameConfig, Players};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub type SharedGame = Arc<Mutex<ChessGame>>;

struct SessionEntry {
    game: SharedGame,
    settled: AtomicBool,
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    config: GameConfig,
}

impl SessionRegistry {
    pub fn new(config: GameConfig) -> Self {
        SessionRegistry {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Start a game for `players` (`[white, black]`)
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] if the id is taken, or
    /// [`RegistryError::Setup`] if `players` does not hold two ids.
    pub fn create(&self, session_id: &str, players: &[String]) -> Result<SharedGame, RegistryError> {
        let players = Players::from_ids(players)?;
        let mut sessions = self.sessions.write();
        if sessions.contains_key(session_id) {
            warn!("[SESSIONS] Rejected duplicate session {}", session_id);
            return Err(RegistryError::Duplicate(session_id.to_string()));
        }

        let game = Arc::new(Mutex::new(ChessGame::new(session_id, players, self.config)));
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                game: Arc::clone(&game),
                settled: AtomicBool::new(false),
            },
        );
        info!(
            "[SESSIONS] Opened session {} ({} active)",
            session_id,
            sessions.len()
        );
        Ok(game)
    }

    pub fn get(&self, session_id: &str) -> Result<SharedGame, RegistryError> {
        self.sessions
            .read()
            .get(session_id)
            .map(|entry| Arc::clone(&entry.game))
            .ok_or_else(|| RegistryError::NotFound(session_id.to_string()))
    }

    /// Run `f` with the session's game locked
    pub fn with_game<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut ChessGame) -> R,
    ) -> Result<R, RegistryError> {
        let game = self.get(session_id)?;
        let mut guard = game.lock();
        Ok(f(&mut guard))
    }

    /// Claim the session's result for settlement
    ///
    /// Returns the request the first time it is called after the game ended,
    /// `None` while the game runs or once the result was already claimed.
    pub fn claim_settlement(
        &self,
        session_id: &str,
    ) -> Result<Option<SettlementRequest>, RegistryError> {
        let sessions = self.sessions.read();
        let entry = sessions
            .get(session_id)
            .ok_or_else(|| RegistryError::NotFound(session_id.to_string()))?;

        let game = entry.game.lock();
        let Some(request) = SettlementRequest::for_game(&game) else {
            return Ok(None);
        };
        if entry.settled.swap(true, Ordering::AcqRel) {
            return Ok(None);
        }
        Ok(Some(request))
    }

    /// Whether the session's result has been claimed; `false` for unknown ids
    pub fn is_settled(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .get(session_id)
            .is_some_and(|entry| entry.settled.load(Ordering::Acquire))
    }

    pub fn remove(&self, session_id: &str) -> Result<SharedGame, RegistryError> {
        match self.sessions.write().remove(session_id) {
            Some(entry) => {
                info!("[SESSIONS] Closed session {}", session_id);
                Ok(entry.game)
            }
            None => {
                warn!("[SESSIONS] Close requested for unknown session {}", session_id);
                Err(RegistryError::NotFound(session_id.to_string()))
            }
        }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of sessions whose game has ended, sorted
    pub fn finished_sessions(&self) -> Vec<String> {
        let mut finished: Vec<String> = self
            .sessions
            .read()
            .iter()
            .filter(|(_, entry)| entry.game.lock().state().game_over())
            .map(|(id, _)| id.clone())
            .collect();
        finished.sort();
        finished
    }
}
