//! Error types for chess engine
//!
//! Rule violations surface as [`MoveError`]; a returned error always means the
//! game state was left untouched. [`SetupError`] covers building a game from a
//! custom position.

use crate::types::{Color, Square};
use thiserror::Error;

/// Reasons a move submission is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The game already reached a terminal outcome
    #[error("Game is already over")]
    GameOver,

    /// Submitting player is not the one assigned to the side on move
    #[error("Player {player} is not on move ({expected} to play)")]
    WrongPlayer { player: String, expected: Color },

    /// Source square is empty or holds an opponent piece
    #[error("No {color} piece at square {square}")]
    NoPieceOfColor { square: Square, color: Color },

    /// Destination holds one of the mover's own pieces
    #[error("Square {square} is occupied by the mover's own piece")]
    OwnPieceAtDestination { square: Square },

    /// Geometry, blocking, castling or king-safety rules forbid the move
    #[error("Invalid move: from square {from} to square {to}")]
    IllegalMove { from: Square, to: Square },

    /// Coordinates outside the board
    #[error("Invalid square coordinates ({file}, {rank}) (must be 0-7)")]
    OffBoard { file: i64, rank: i64 },

    /// Text that is not a `"file,rank"` pair
    #[error("Invalid square {input:?} (expected \"file,rank\")")]
    InvalidSquare { input: String },
}

/// Errors building a game from an explicit position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Expected exactly one {color} king, found {found}")]
    KingCount { color: Color, found: usize },

    #[error("Expected two player ids (white, black), got {0}")]
    PlayerCount(usize),
}

/// Result type alias for move submission
pub type MoveResult<T> = Result<T, MoveError>;
