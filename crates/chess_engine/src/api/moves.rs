//! Move execution and validation
//!
//! [`ChessGame::make_move`] is the single mutating entry point. Validation
//! runs to completion before the first write, and every write after it is
//! infallible, so a rejected move never leaves a trace.

use super::game::ChessGame;
use crate::error::{MoveError, MoveResult};
use crate::move_gen::{en_passant_victim, is_legal_move, legal_destinations, rook_squares};
use crate::types::{MoveRecord, Piece, PieceKind, Square};
use tracing::debug;

impl ChessGame {
    /// Submit a move, reporting only acceptance
    ///
    /// `true` means the move was played and the turn passed; `false` means
    /// nothing changed. Use [`ChessGame::try_move`] to learn why a move was
    /// rejected.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        player_id: &str,
        promotion_choice: Option<PieceKind>,
    ) -> bool {
        self.try_move(from, to, player_id, promotion_choice).is_ok()
    }

    /// Submit a move
    ///
    /// Validation order: game still running, `player_id` holds the side on
    /// move, a piece of that side stands on `from`, `to` is not occupied by
    /// the mover's own piece, the move is legal.
    ///
    /// Pawns reaching the last rank always become queens; `_promotion_choice`
    /// is accepted for API compatibility and ignored.
    ///
    /// # Errors
    ///
    /// The first failed check as a [`MoveError`]; the state is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let e2 = Square::new(4, 1).unwrap();
    /// let e4 = Square::new(4, 3).unwrap();
    /// let record = game.try_move(e2, e4, "alice", None)?;
    /// assert!(!record.is_capture);
    /// ```
    pub fn try_move(
        &mut self,
        from: Square,
        to: Square,
        player_id: &str,
        _promotion_choice: Option<PieceKind>,
    ) -> MoveResult<MoveRecord> {
        let piece = match self.validate(from, to, player_id) {
            Ok(piece) => piece,
            Err(err) => {
                debug!(
                    "[CHESS] Game {} rejected {} -> {} from {}: {}",
                    self.session_id, from, to, player_id, err
                );
                return Err(err);
            }
        };

        let record = self.execute(from, to, piece);
        debug!(
            "[CHESS] Game {}: {} {} {} -> {}",
            self.session_id, record.color, record.piece, from, to
        );

        self.state.move_history.push(record);
        self.state.current_turn = self.state.current_turn.opponent();
        self.evaluate_end();

        Ok(record)
    }

    /// All legal destinations for the piece on `from`
    ///
    /// Empty when the game is over or the square is empty.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.state.game_over() {
            return Vec::new();
        }
        legal_destinations(&self.state.position, from)
    }

    fn validate(&self, from: Square, to: Square, player_id: &str) -> MoveResult<Piece> {
        let state = &self.state;
        if state.game_over() {
            return Err(MoveError::GameOver);
        }

        let mover = state.current_turn;
        if state.players.id_for(mover) != player_id {
            return Err(MoveError::WrongPlayer {
                player: player_id.to_string(),
                expected: mover,
            });
        }

        let piece = match state.position.piece_at(from) {
            Some(piece) if piece.color == mover => piece,
            _ => {
                return Err(MoveError::NoPieceOfColor {
                    square: from,
                    color: mover,
                })
            }
        };

        if state.position.board().color_at(to) == Some(mover) {
            return Err(MoveError::OwnPieceAtDestination { square: to });
        }

        if !is_legal_move(&state.position, from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        Ok(piece)
    }

    /// Apply a validated move and build its record
    fn execute(&mut self, from: Square, to: Square, piece: Piece) -> MoveRecord {
        let mover = piece.color;
        let position = &mut self.state.position;

        // Special-move flags are fixed before anything moves
        let is_castle = piece.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2;
        let is_en_passant = piece.kind == PieceKind::Pawn
            && from.file() != to.file()
            && position.board().is_empty(to)
            && position.en_passant_target() == Some(to);
        let is_promotion = piece.kind == PieceKind::Pawn && to.rank() == mover.promotion_rank();

        // The en passant target lives for exactly one ply
        position.set_en_passant_target(None);

        let captured = if is_castle {
            position.relocate(from, to);
            if let Some((rook_from, rook_to)) = rook_squares(from, to) {
                position.relocate(rook_from, rook_to);
            }
            None
        } else if is_en_passant {
            position.relocate(from, to);
            en_passant_victim(from, to).and_then(|victim| position.remove(victim))
        } else {
            position.relocate(from, to)
        };

        if is_promotion {
            position.put(to, Piece::new(PieceKind::Queen, mover).moved());
        }

        if piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            position.set_en_passant_target(from.offset(0, mover.forward()));
        }

        if let Some(captured) = captured {
            self.state.captured_by_mut(mover).push(captured);
        }

        MoveRecord {
            from,
            to,
            piece: piece.kind,
            color: mover,
            is_capture: captured.is_some(),
            is_castle,
            is_en_passant,
            is_promotion,
            promotion: is_promotion.then_some(PieceKind::Queen),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ChessGame, GameConfig, Players};
    use crate::board::Position;
    use crate::error::MoveError;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn new_game() -> ChessGame {
        ChessGame::new("test", Players::new("white", "black"), GameConfig::default())
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = new_game();
        let before = *game.state().position();

        let err = game.try_move(sq(4, 1), sq(4, 3), "black", None).unwrap_err();

        assert_eq!(
            err,
            MoveError::WrongPlayer {
                player: "black".to_string(),
                expected: Color::White
            }
        );
        assert_eq!(*game.state().position(), before);
        assert_eq!(game.state().current_turn(), Color::White);
    }

    #[test]
    fn test_moving_opponent_piece_rejected() {
        let mut game = new_game();
        let err = game.try_move(sq(4, 6), sq(4, 4), "white", None).unwrap_err();
        assert_eq!(
            err,
            MoveError::NoPieceOfColor {
                square: sq(4, 6),
                color: Color::White
            }
        );
    }

    #[test]
    fn test_own_piece_destination_rejected() {
        let mut game = new_game();
        let err = game.try_move(sq(3, 0), sq(3, 1), "white", None).unwrap_err();
        assert_eq!(err, MoveError::OwnPieceAtDestination { square: sq(3, 1) });
    }

    #[test]
    fn test_illegal_geometry_rejected() {
        let mut game = new_game();
        let err = game.try_move(sq(4, 1), sq(4, 4), "white", None).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                from: sq(4, 1),
                to: sq(4, 4)
            }
        );
        assert!(game.state().move_history().is_empty());
    }

    #[test]
    fn test_capture_goes_to_capturer_list() {
        let mut game = new_game();
        assert!(game.make_move(sq(4, 1), sq(4, 3), "white", None));
        assert!(game.make_move(sq(3, 6), sq(3, 4), "black", None));
        assert!(game.make_move(sq(4, 3), sq(3, 4), "white", None));

        let state = game.state();
        assert_eq!(
            state.captured_by(Color::White),
            &[Piece::new(PieceKind::Pawn, Color::Black).moved()]
        );
        assert!(state.captured_by(Color::Black).is_empty());
        let last = state.move_history().last().unwrap();
        assert!(last.is_capture);
        assert!(!last.is_en_passant);
    }

    #[test]
    fn test_en_passant_window_is_one_ply() {
        let mut game = new_game();
        assert!(game.make_move(sq(4, 1), sq(4, 3), "white", None));
        assert_eq!(game.state().en_passant_target(), Some(sq(4, 2)));

        assert!(game.make_move(sq(6, 7), sq(5, 5), "black", None));
        assert_eq!(game.state().en_passant_target(), None);
    }

    #[test]
    fn test_black_promotion_and_king_cache() {
        let position = Position::empty()
            .with(sq(7, 0), Piece::new(PieceKind::King, Color::White))
            .with(sq(0, 7), Piece::new(PieceKind::King, Color::Black))
            .with(sq(3, 1), Piece::new(PieceKind::Pawn, Color::Black).moved());
        let mut game = ChessGame::from_position(
            "promo",
            Players::new("white", "black"),
            position,
            Color::Black,
            GameConfig::default(),
        )
        .unwrap();

        let record = game
            .try_move(sq(3, 1), sq(3, 0), "black", Some(PieceKind::Knight))
            .unwrap();

        assert!(record.is_promotion);
        assert_eq!(record.promotion, Some(PieceKind::Queen));
        assert_eq!(
            game.state().piece_at(sq(3, 0)).map(|p| (p.kind, p.color)),
            Some((PieceKind::Queen, Color::Black))
        );

        assert!(game.make_move(sq(7, 0), sq(6, 1), "white", None));
        assert_eq!(game.state().king_square(Color::White), Some(sq(6, 1)));
    }

    #[test]
    fn test_legal_destinations_for_starting_knight() {
        let game = new_game();
        let mut destinations = game.legal_destinations(sq(6, 0));
        destinations.sort();
        assert_eq!(destinations, vec![sq(5, 2), sq(7, 2)]);
    }
}
