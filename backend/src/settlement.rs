//! Result settlement hand-off
//!
//! When a game ends its podium (winner id, or nobody on a draw) is handed to
//! a [`ResultSink`] exactly once per session. The payload is the text
//! `session_id:<id>;podium:<a,b>` together with its SHA-256 digest, which is
//! what a signing service would sign.

use crate::error::RegistryError;
use crate::registry::SessionRegistry;
use chess_engine::ChessGame;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;

/// A finished game's result, ready to be signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementRequest {
    pub session_id: String,
    pub podium: Vec<String>,
    pub message: String,
    pub digest: String,
}

impl SettlementRequest {
    pub fn new(session_id: impl Into<String>, podium: Vec<String>) -> Self {
        let session_id = session_id.into();
        let message = format!("session_id:{};podium:{}", session_id, podium.join(","));
        let digest = format!("{:x}", Sha256::digest(message.as_bytes()));
        SettlementRequest {
            session_id,
            podium,
            message,
            digest,
        }
    }

    /// Podium for a finished game, `None` while it is still running
    pub fn for_game(game: &ChessGame) -> Option<Self> {
        let state = game.state();
        if !state.game_over() {
            return None;
        }
        let podium = state.winner().map(str::to_string).into_iter().collect();
        Some(Self::new(game.session_id(), podium))
    }
}

/// Receiver of settlement requests
pub trait ResultSink: Send + Sync {
    fn submit(&self, request: &SettlementRequest);
}

/// Sink that only logs the hand-off
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl ResultSink for LoggingSink {
    fn submit(&self, request: &SettlementRequest) {
        info!(
            "[SETTLEMENT] Session {} podium [{}] digest {}",
            request.session_id,
            request.podium.join(","),
            request.digest
        );
    }
}

/// Forwards each finished session to the sink once
///
/// The once-only flag lives on the registry entry, see
/// [`SessionRegistry::claim_settlement`].
pub struct Settlement {
    sink: Arc<dyn ResultSink>,
}

impl Default for Settlement {
    fn default() -> Self {
        Settlement::new(Arc::new(LoggingSink))
    }
}

impl Settlement {
    pub fn new(sink: Arc<dyn ResultSink>) -> Self {
        Settlement { sink }
    }

    /// Submit the session's result if its game has ended and it was not
    /// submitted before
    ///
    /// Returns `true` when this call performed the submission.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if the session is gone.
    pub fn settle(&self, registry: &SessionRegistry, session_id: &str) -> Result<bool, RegistryError> {
        match registry.claim_settlement(session_id)? {
            Some(request) => {
                self.sink.submit(&request);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
