//! Attack detection, check detection and legality filtering
//!
//! Provides functions to check if squares are under attack and if kings are in
//! check. This module is critical for move legality validation and for
//! terminal-state detection.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through the attacker's pieces
//! and verify if any can reach the target square with its capture geometry.
//! This is cheaper than generating all moves and checking if any target the
//! square.
//!
//! ## Speculative probing
//!
//! [`would_move_leave_king_in_check`] applies the candidate move to a copy of
//! the [`Position`] and inspects the copy. The caller's position is borrowed
//! immutably, so the probe cannot leave a side effect on any path.

use super::{bishop, is_pseudo_legal, king, knight, pawn, queen, rook};
use crate::board::Position;
use crate::types::{Color, Piece, PieceKind, Square};

/// Check if `piece` standing on `from` attacks `target`
///
/// Same geometry and blocking as movement, except that pawns attack their
/// forward diagonals whatever stands there and kings attack only adjacent
/// squares.
pub fn attacks(position: &Position, piece: Piece, from: Square, target: Square) -> bool {
    let board = position.board();
    match piece.kind {
        PieceKind::Pawn => pawn::attacks(piece, from, target),
        PieceKind::Knight => knight::reaches(from, target),
        PieceKind::Bishop => bishop::reaches(board, from, target),
        PieceKind::Rook => rook::reaches(board, from, target),
        PieceKind::Queen => queen::reaches(board, from, target),
        PieceKind::King => king::attacks(from, target),
    }
}

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `position` - The position to inspect
/// * `square` - Target square to check
/// * `by_color` - Color of pieces that might attack
///
/// # Returns
///
/// `true` if the square is attacked by any piece of the specified color
///
/// # Examples
///
/// ```rust,ignore
/// // Is f1 covered by Black?
/// let attacked = is_square_attacked(&position, Square::new(5, 0).unwrap(), Color::Black);
/// ```
pub fn is_square_attacked(position: &Position, square: Square, by_color: Color) -> bool {
    position
        .board()
        .pieces_of(by_color)
        .any(|(from, piece)| attacks(position, piece, from, square))
}

/// Check if the king of a given color is in check
///
/// Uses the cached king square. A missing king degrades to "not in check".
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king_square) => is_square_attacked(position, king_square, color.opponent()),
        None => false,
    }
}

/// Check whether moving the piece on `from` to `to` leaves `color`'s king in check
///
/// The move is tried on a copy: the piece is relocated (king cache
/// included), a piece on `to` is dropped and an en passant victim is
/// removed. Geometry is not validated here.
pub fn would_move_leave_king_in_check(
    position: &Position,
    from: Square,
    to: Square,
    color: Color,
) -> bool {
    let mut probe = *position;
    let Some(piece) = probe.remove(from) else {
        return is_in_check(&probe, color);
    };

    let is_en_passant = piece.kind == PieceKind::Pawn
        && from.file() != to.file()
        && probe.board().is_empty(to)
        && probe.en_passant_target() == Some(to);
    if is_en_passant {
        if let Some(victim) = pawn::en_passant_victim(from, to) {
            probe.remove(victim);
        }
    }

    probe.put(to, piece);
    is_in_check(&probe, color)
}

/// Check whether moving the piece on `from` to `to` is legal
///
/// Legal means pseudo-legal (geometry, blocking, castling, en passant) and
/// not leaving the mover's own king in check.
pub fn is_legal_move(position: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    is_pseudo_legal(position, from, to)
        && !would_move_leave_king_in_check(position, from, to, piece.color)
}

/// All legal destinations for the piece on `from`
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|to| is_legal_move(position, from, *to))
        .collect()
}

/// Check whether `color` has at least one legal move
///
/// Tries every destination for every piece of `color` and stops at the first
/// legal one: O(pieces x 64) in the worst case.
pub fn has_legal_moves(position: &Position, color: Color) -> bool {
    position.board().pieces_of(color).any(|(from, _)| {
        Square::all().any(|to| is_legal_move(position, from, to))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    #[test]
    fn test_no_check_in_starting_position() {
        let position = Position::standard();
        assert!(!is_in_check(&position, Color::White));
        assert!(!is_in_check(&position, Color::Black));
    }

    #[test]
    fn test_rook_gives_check_along_open_file() {
        let position = Position::empty()
            .with(sq(4, 0), piece(PieceKind::King, Color::White))
            .with(sq(4, 7), piece(PieceKind::Rook, Color::Black));
        assert!(is_in_check(&position, Color::White));

        let blocked = position.with(sq(4, 3), piece(PieceKind::Pawn, Color::White));
        assert!(!is_in_check(&blocked, Color::White));
    }

    #[test]
    fn test_pawn_gives_check_diagonally_only() {
        let position = Position::empty()
            .with(sq(4, 4), piece(PieceKind::King, Color::Black))
            .with(sq(3, 3), piece(PieceKind::Pawn, Color::White));
        assert!(is_in_check(&position, Color::Black));

        let in_front = Position::empty()
            .with(sq(4, 4), piece(PieceKind::King, Color::Black))
            .with(sq(4, 3), piece(PieceKind::Pawn, Color::White));
        assert!(!is_in_check(&in_front, Color::Black));
    }

    #[test]
    fn test_missing_king_is_not_in_check() {
        let position = Position::empty().with(sq(0, 0), piece(PieceKind::Queen, Color::Black));
        assert!(!is_in_check(&position, Color::White));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let position = Position::empty()
            .with(sq(4, 0), piece(PieceKind::King, Color::White))
            .with(sq(4, 1), piece(PieceKind::Bishop, Color::White))
            .with(sq(4, 7), piece(PieceKind::Rook, Color::Black));

        assert!(would_move_leave_king_in_check(&position, sq(4, 1), sq(5, 2), Color::White));
        assert!(!is_legal_move(&position, sq(4, 1), sq(5, 2)));
    }

    #[test]
    fn test_probe_leaves_position_untouched() {
        let position = Position::empty()
            .with(sq(4, 0), piece(PieceKind::King, Color::White))
            .with(sq(4, 1), piece(PieceKind::Rook, Color::White))
            .with(sq(4, 6), piece(PieceKind::Rook, Color::Black))
            .with(sq(0, 7), piece(PieceKind::King, Color::Black));
        let before = position;

        // Capture that keeps the file closed: safe
        assert!(!would_move_leave_king_in_check(&position, sq(4, 1), sq(4, 6), Color::White));
        assert_eq!(position, before);

        // Stepping aside opens the file: unsafe
        assert!(would_move_leave_king_in_check(&position, sq(4, 1), sq(0, 1), Color::White));
        assert_eq!(position, before);

        // King move updates only the probe's cache
        assert!(!would_move_leave_king_in_check(&position, sq(4, 0), sq(3, 0), Color::White));
        assert_eq!(position.king_square(Color::White), Some(sq(4, 0)));
    }

    #[test]
    fn test_en_passant_probe_removes_victim() {
        // Capturing en passant would expose the white king along the rank
        let mut position = Position::empty()
            .with(sq(0, 4), piece(PieceKind::King, Color::White))
            .with(sq(1, 4), piece(PieceKind::Pawn, Color::White).moved())
            .with(sq(2, 4), piece(PieceKind::Pawn, Color::Black).moved())
            .with(sq(7, 4), piece(PieceKind::Rook, Color::Black))
            .with(sq(7, 7), piece(PieceKind::King, Color::Black));
        position.set_en_passant_target(Some(sq(2, 5)));

        assert!(is_pseudo_legal(&position, sq(1, 4), sq(2, 5)));
        assert!(would_move_leave_king_in_check(&position, sq(1, 4), sq(2, 5), Color::White));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let position = Position::empty()
            .with(sq(4, 0), piece(PieceKind::King, Color::White))
            .with(sq(3, 7), piece(PieceKind::Rook, Color::Black))
            .with(sq(7, 7), piece(PieceKind::King, Color::Black));

        let destinations = legal_destinations(&position, sq(4, 0));
        assert!(!destinations.contains(&sq(3, 0)));
        assert!(!destinations.contains(&sq(3, 1)));
        assert!(destinations.contains(&sq(5, 1)));
    }

    #[test]
    fn test_starting_position_has_twenty_legal_moves() {
        let position = Position::standard();
        let total: usize = position
            .board()
            .pieces_of(Color::White)
            .map(|(from, _)| legal_destinations(&position, from).len())
            .sum();
        assert_eq!(total, 20);
        assert!(has_legal_moves(&position, Color::Black));
    }
}
