//! Move geometry and legality
//!
//! Pure, side-effect-free movement rules per piece type (pseudo-legality),
//! plus the check-aware legality filter built on top of them.
//!
//! ## Layers
//!
//! 1. [`piece_reaches`] - the base movement predicate: piece geometry and
//!    blocking only
//! 2. [`is_pseudo_legal`] - adds the base rules: the destination may not hold
//!    a piece of the mover's colour, nor any King
//! 3. [`is_legal_move`] - pseudo-legal and does not leave the mover's king in
//!    check

mod attack;
mod bishop;
mod castle;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;
mod sliding;

pub use attack::{
    attacks, has_legal_moves, is_in_check, is_legal_move, is_square_attacked,
    legal_destinations, would_move_leave_king_in_check,
};
pub(crate) use castle::rook_squares;
pub(crate) use pawn::en_passant_victim;

use crate::board::Position;
use crate::types::{Piece, PieceKind, Square};

/// Check whether `piece` on `from` can move to `to` by geometry and blocking
///
/// Ignores check-safety and the rule that kings are never captured. A
/// two-file king move is a castling attempt and includes the castling
/// preconditions.
pub fn piece_reaches(position: &Position, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }

    let board = position.board();
    match piece.kind {
        PieceKind::Pawn => pawn::reaches(position, piece, from, to),
        PieceKind::Knight => knight::reaches(from, to),
        PieceKind::Bishop => bishop::reaches(board, from, to),
        PieceKind::Rook => rook::reaches(board, from, to),
        PieceKind::Queen => queen::reaches(board, from, to),
        PieceKind::King => king::reaches(position, piece, from, to),
    }
}

/// Check whether the piece on `from` may move to `to`, ignoring check-safety
///
/// Returns `false` if `from` is empty.
pub fn is_pseudo_legal(position: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return false;
    };

    // Can't capture your own pieces, and kings are never captured
    if let Some(target) = position.piece_at(to) {
        if target.color == piece.color || target.kind == PieceKind::King {
            return false;
        }
    }

    piece_reaches(position, piece, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_cannot_capture_own_piece() {
        let position = Position::standard();
        // Rook a1 onto pawn a2
        assert!(!is_pseudo_legal(&position, sq(0, 0), sq(0, 1)));
    }

    #[test]
    fn test_cannot_capture_king() {
        let position = Position::empty()
            .with(sq(0, 0), Piece::new(PieceKind::Rook, Color::White))
            .with(sq(0, 7), Piece::new(PieceKind::King, Color::Black));

        assert!(!is_pseudo_legal(&position, sq(0, 0), sq(0, 7)));
        // The base predicate still reaches the king: that is what check means
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert!(piece_reaches(&position, rook, sq(0, 0), sq(0, 7)));
    }

    #[test]
    fn test_empty_source_is_never_pseudo_legal() {
        let position = Position::standard();
        assert!(!is_pseudo_legal(&position, sq(4, 4), sq(4, 5)));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let queen = Piece::new(PieceKind::Queen, Color::White);
        let position = Position::empty().with(sq(3, 3), queen);

        assert!(piece_reaches(&position, queen, sq(3, 3), sq(3, 7)));
        assert!(piece_reaches(&position, queen, sq(3, 3), sq(7, 7)));
        assert!(!piece_reaches(&position, queen, sq(3, 3), sq(5, 4)));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let position = Position::standard();
        assert!(is_pseudo_legal(&position, sq(1, 0), sq(2, 2)));
        assert!(is_pseudo_legal(&position, sq(6, 7), sq(5, 5)));
    }

    #[test]
    fn test_king_single_step_and_castle_shape() {
        let king = Piece::new(PieceKind::King, Color::White);
        let position = Position::empty().with(sq(4, 0), king);

        assert!(piece_reaches(&position, king, sq(4, 0), sq(5, 1)));
        assert!(!piece_reaches(&position, king, sq(4, 0), sq(4, 2)));
        // No rook on h1: two-file move is not a legal castle
        assert!(!piece_reaches(&position, king, sq(4, 0), sq(6, 0)));
    }
}
