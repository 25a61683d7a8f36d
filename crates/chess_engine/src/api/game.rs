//! Game lifecycle management
//!
//! [`ChessGame`] is the per-session aggregate root: it exclusively owns the
//! [`GameState`] and is the only thing that mutates it. The surrounding
//! system serialises calls per session; nothing in here locks.

use super::state::GameOutcome;
use crate::board::Position;
use crate::error::SetupError;
use crate::types::{Color, MoveRecord, Piece, Square};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default wall-clock budget for a whole game (30 minutes)
pub const DEFAULT_GAME_DURATION_SECS: i64 = 1800;

/// Per-game rule settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Elapsed time after which the game ends on material count
    pub game_duration: TimeDelta,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            game_duration: TimeDelta::seconds(DEFAULT_GAME_DURATION_SECS),
        }
    }
}

impl GameConfig {
    pub fn with_duration_secs(secs: i64) -> Self {
        GameConfig {
            game_duration: TimeDelta::seconds(secs),
        }
    }
}

/// Player ids assigned to each colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub white: String,
    pub black: String,
}

impl Players {
    pub fn new(white: impl Into<String>, black: impl Into<String>) -> Self {
        Players {
            white: white.into(),
            black: black.into(),
        }
    }

    /// Build from an ordered `[white, black]` id list
    ///
    /// # Errors
    ///
    /// [`SetupError::PlayerCount`] unless exactly two ids are given.
    pub fn from_ids(ids: &[String]) -> Result<Self, SetupError> {
        match ids {
            [white, black] => Ok(Players::new(white.clone(), black.clone())),
            _ => Err(SetupError::PlayerCount(ids.len())),
        }
    }

    /// Id of the player holding `color`
    pub fn id_for(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// Complete mutable state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) position: Position,
    pub(crate) current_turn: Color,
    pub(crate) outcome: GameOutcome,
    pub(crate) winner: Option<String>,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) move_history: Vec<MoveRecord>,
    pub(crate) captured_by_white: Vec<Piece>,
    pub(crate) captured_by_black: Vec<Piece>,
    pub(crate) players: Players,
}

impl GameState {
    fn new(position: Position, current_turn: Color, players: Players) -> Self {
        GameState {
            position,
            current_turn,
            outcome: GameOutcome::InProgress,
            winner: None,
            started_at: Utc::now(),
            move_history: Vec::new(),
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            players,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Winning player id; `None` while in progress and on draws
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn game_over(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Pieces captured by `color`, in capture order
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    pub(crate) fn captured_by_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.captured_by_white,
            Color::Black => &mut self.captured_by_black,
        }
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.position.king_square(color)
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant_target()
    }
}

/// One chess session: identity, rule settings and state
#[derive(Debug, Clone)]
pub struct ChessGame {
    pub(crate) session_id: String,
    pub(crate) config: GameConfig,
    pub(crate) state: GameState,
}

impl ChessGame {
    /// Create a game at the standard starting position, White to move
    pub fn new(session_id: impl Into<String>, players: Players, config: GameConfig) -> Self {
        let game = ChessGame {
            session_id: session_id.into(),
            config,
            state: GameState::new(Position::standard(), Color::White, players),
        };
        info!(
            "[CHESS] Created game {} (white={}, black={})",
            game.session_id, game.state.players.white, game.state.players.black
        );
        game
    }

    /// Create a game from an ordered `[white, black]` id list with default settings
    ///
    /// # Errors
    ///
    /// [`SetupError::PlayerCount`] unless exactly two ids are given.
    pub fn create(session_id: impl Into<String>, players: &[String]) -> Result<Self, SetupError> {
        Ok(ChessGame::new(
            session_id,
            Players::from_ids(players)?,
            GameConfig::default(),
        ))
    }

    /// Create a game at an arbitrary position
    ///
    /// # Errors
    ///
    /// [`SetupError::KingCount`] unless each colour has exactly one king.
    pub fn from_position(
        session_id: impl Into<String>,
        players: Players,
        position: Position,
        to_move: Color,
        config: GameConfig,
    ) -> Result<Self, SetupError> {
        for color in [Color::White, Color::Black] {
            let found = position.king_count(color);
            if found != 1 {
                return Err(SetupError::KingCount { color, found });
            }
        }

        Ok(ChessGame {
            session_id: session_id.into(),
            config,
            state: GameState::new(position, to_move, players),
        })
    }

    /// Override the recorded start time
    ///
    /// Used when restoring a session, and by tests exercising the timeout.
    pub fn with_start_time(mut self, started_at: DateTime<Utc>) -> Self {
        self.state.started_at = started_at;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the game state
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
