//! Serialisable game snapshots
//!
//! [`GameSnapshot`] is what the session layer hands to clients: a sparse
//! board keyed by `"file,rank"`, turn, result fields, players, capture lists
//! and move history. Maps are ordered, so snapshots taken without an
//! intervening move compare (and serialise) equal.

use crate::api::{ChessGame, GameOutcome};
use crate::types::{Color, MoveRecord, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Captured piece as listed in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPiece {
    pub kind: PieceKind,
    pub color: Color,
}

impl From<&Piece> for CapturedPiece {
    fn from(piece: &Piece) -> Self {
        CapturedPiece {
            kind: piece.kind,
            color: piece.color,
        }
    }
}

/// Point-in-time view of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub session_id: String,
    pub game_type: String,
    pub board: BTreeMap<Square, Piece>,
    pub current_turn: Color,
    pub winner: Option<String>,
    pub game_over: bool,
    pub outcome: GameOutcome,
    pub white_player: String,
    pub black_player: String,
    pub captured_by_white: Vec<CapturedPiece>,
    pub captured_by_black: Vec<CapturedPiece>,
    pub move_history: Vec<MoveRecord>,
    pub en_passant_target: Option<Square>,
}

impl ChessGame {
    /// Take a snapshot of the current state; no side effects
    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            session_id: self.session_id.clone(),
            game_type: "chess".to_string(),
            board: state.position.board().pieces().collect(),
            current_turn: state.current_turn,
            winner: state.winner.clone(),
            game_over: state.game_over(),
            outcome: state.outcome,
            white_player: state.players.white.clone(),
            black_player: state.players.black.clone(),
            captured_by_white: state.captured_by_white.iter().map(CapturedPiece::from).collect(),
            captured_by_black: state.captured_by_black.iter().map(CapturedPiece::from).collect(),
            move_history: state.move_history.clone(),
            en_passant_target: state.position.en_passant_target(),
        }
    }
}
