//! Game state queries and end-of-game evaluation
//!
//! After every accepted move the position is classified for the side about
//! to move:
//!
//! 1. in check with no legal move - checkmate, the side that just moved wins
//! 2. not in check with no legal move - stalemate, no winner
//! 3. wall-clock budget exceeded - timeout, higher material wins, equal
//!    material is a draw
//! 4. otherwise the game continues
//!
//! A finished game never changes again. Timeouts are only noticed when the
//! evaluator runs (on a move or a [`ChessGame::poll`]); there is no timer.

use super::game::{ChessGame, GameConfig};
use crate::board::Position;
use crate::evaluation::material_total;
use crate::move_gen::{has_legal_moves, is_in_check};
use crate::types::Color;
use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    /// `winner` is `None` when material is level
    Timeout { winner: Option<Color> },
}

impl GameOutcome {
    #[inline]
    pub fn is_finished(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Winning colour, if the game ended decisively
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } => Some(winner),
            GameOutcome::Timeout { winner } => winner,
            GameOutcome::InProgress | GameOutcome::Stalemate => None,
        }
    }
}

/// Classify `position` with `side_to_move` on move
///
/// # Arguments
///
/// * `position` - Position after the last accepted move
/// * `side_to_move` - Colour about to move
/// * `elapsed` - Wall-clock time since the game started
/// * `config` - Rule settings (game duration)
pub fn evaluate_outcome(
    position: &Position,
    side_to_move: Color,
    elapsed: TimeDelta,
    config: &GameConfig,
) -> GameOutcome {
    if !has_legal_moves(position, side_to_move) {
        return if is_in_check(position, side_to_move) {
            GameOutcome::Checkmate {
                winner: side_to_move.opponent(),
            }
        } else {
            GameOutcome::Stalemate
        };
    }

    if elapsed > config.game_duration {
        return GameOutcome::Timeout {
            winner: material_leader(position),
        };
    }

    GameOutcome::InProgress
}

/// Colour with more material, `None` when level
fn material_leader(position: &Position) -> Option<Color> {
    let white = material_total(position, Color::White);
    let black = material_total(position, Color::Black);
    match white.cmp(&black) {
        Ordering::Greater => Some(Color::White),
        Ordering::Less => Some(Color::Black),
        Ordering::Equal => None,
    }
}

impl ChessGame {
    /// Re-run the end-of-game evaluator without a move
    ///
    /// Lets a state poll finish a game whose clock ran out. Finished games are
    /// returned unchanged.
    pub fn poll(&mut self) -> GameOutcome {
        if !self.state.game_over() {
            self.evaluate_end();
        }
        self.state.outcome
    }

    /// Evaluate the position for the side to move and record a terminal outcome
    pub(crate) fn evaluate_end(&mut self) {
        let elapsed = Utc::now() - self.state.started_at;
        let outcome = evaluate_outcome(
            &self.state.position,
            self.state.current_turn,
            elapsed,
            &self.config,
        );
        if outcome.is_finished() {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        let state = &mut self.state;
        state.outcome = outcome;
        state.winner = outcome
            .winner()
            .map(|color| state.players.id_for(color).to_string());

        info!(
            "[CHESS] Game {} ended: {:?}, winner={}",
            self.session_id,
            outcome,
            state.winner.as_deref().unwrap_or("none")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind, Square};

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn kings() -> Position {
        Position::empty()
            .with(sq(4, 0), Piece::new(PieceKind::King, Color::White))
            .with(sq(4, 7), Piece::new(PieceKind::King, Color::Black))
    }

    #[test]
    fn test_starting_position_is_in_progress() {
        let outcome = evaluate_outcome(
            &Position::standard(),
            Color::White,
            TimeDelta::zero(),
            &GameConfig::default(),
        );
        assert_eq!(outcome, GameOutcome::InProgress);
    }

    #[test]
    fn test_back_rank_mate() {
        // Black king h8 boxed in by its own pawns, white rook delivers mate on the 8th
        let position = Position::empty()
            .with(sq(7, 7), Piece::new(PieceKind::King, Color::Black))
            .with(sq(6, 6), Piece::new(PieceKind::Pawn, Color::Black))
            .with(sq(7, 6), Piece::new(PieceKind::Pawn, Color::Black))
            .with(sq(0, 7), Piece::new(PieceKind::Rook, Color::White))
            .with(sq(4, 0), Piece::new(PieceKind::King, Color::White));

        let outcome = evaluate_outcome(
            &position,
            Color::Black,
            TimeDelta::zero(),
            &GameConfig::default(),
        );
        assert_eq!(
            outcome,
            GameOutcome::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn test_stalemate_without_check() {
        // Black king a8, white queen c7, white king far away: no move, no check
        let position = Position::empty()
            .with(sq(0, 7), Piece::new(PieceKind::King, Color::Black))
            .with(sq(2, 6), Piece::new(PieceKind::Queen, Color::White))
            .with(sq(4, 0), Piece::new(PieceKind::King, Color::White));

        let outcome = evaluate_outcome(
            &position,
            Color::Black,
            TimeDelta::zero(),
            &GameConfig::default(),
        );
        assert_eq!(outcome, GameOutcome::Stalemate);
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_timeout_decided_by_material() {
        let config = GameConfig::with_duration_secs(60);
        let position = kings().with(sq(0, 1), Piece::new(PieceKind::Pawn, Color::White));

        let outcome = evaluate_outcome(&position, Color::Black, TimeDelta::seconds(61), &config);
        assert_eq!(
            outcome,
            GameOutcome::Timeout {
                winner: Some(Color::White)
            }
        );

        let not_yet = evaluate_outcome(&position, Color::Black, TimeDelta::seconds(60), &config);
        assert_eq!(not_yet, GameOutcome::InProgress);
    }

    #[test]
    fn test_timeout_with_level_material_is_a_draw() {
        let config = GameConfig::with_duration_secs(60);
        let outcome = evaluate_outcome(&kings(), Color::White, TimeDelta::seconds(120), &config);
        assert_eq!(outcome, GameOutcome::Timeout { winner: None });
        assert!(outcome.is_finished());
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(GameOutcome::Checkmate {
            winner: Color::White,
        })
        .unwrap();
        assert_eq!(json["kind"], "checkmate");
        assert_eq!(json["winner"], "white");

        let json = serde_json::to_value(GameOutcome::InProgress).unwrap();
        assert_eq!(json["kind"], "in_progress");
    }
}
