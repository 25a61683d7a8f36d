//! Public API for the chess engine
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle (`ChessGame`, `GameState`, `Players`, `GameConfig`)
//! - `moves` - Move execution and validation (`make_move`, `try_move`)
//! - `state` - End-of-game evaluation and polling (`GameOutcome`, `poll`)

mod game;
mod moves;
mod state;

pub use game::{ChessGame, GameConfig, GameState, Players, DEFAULT_GAME_DURATION_SECS};
pub use state::{evaluate_outcome, GameOutcome};
