//! Pawn geometry
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, destination empty
//! - **Double push**: an unmoved pawn on its starting rank may advance two
//!   squares when both the intermediate and destination squares are empty
//! - **Captures**: one square diagonally forward onto an enemy piece
//! - **En passant**: one square diagonally forward onto the position's en
//!   passant target, even though that square is empty
//!
//! Promotion is not a geometry concern; the controller handles it when the
//! move is executed.

use crate::board::Position;
use crate::types::{Piece, Square};

/// Check whether the pawn `pawn` on `from` may move to `to`
///
/// # Arguments
///
/// * `position` - Current position (occupancy and en passant target)
/// * `pawn` - The moving pawn (colour and `has_moved` matter)
/// * `from` - Source square
/// * `to` - Destination square
pub(crate) fn reaches(position: &Position, pawn: Piece, from: Square, to: Square) -> bool {
    let board = position.board();
    let dir = pawn.color.forward();
    let (df, dr) = from.delta_to(to);

    // Forward move
    if df == 0 && dr == dir {
        return board.is_empty(to);
    }

    // Double move from the starting rank
    if df == 0 && dr == 2 * dir {
        if pawn.has_moved || from.rank() != pawn.color.pawn_rank() {
            return false;
        }
        return match from.offset(0, dir) {
            Some(intermediate) => board.is_empty(intermediate) && board.is_empty(to),
            None => false,
        };
    }

    // Capture diagonally, including en passant onto the empty target
    if df.abs() == 1 && dr == dir {
        return match board.color_at(to) {
            Some(target) => target != pawn.color,
            None => position.en_passant_target() == Some(to),
        };
    }

    false
}

/// Check whether a pawn on `from` attacks `target`
///
/// Pawns attack diagonally forward regardless of what stands on the target.
#[inline]
pub(crate) fn attacks(pawn: Piece, from: Square, target: Square) -> bool {
    let (df, dr) = from.delta_to(target);
    df.abs() == 1 && dr == pawn.color.forward()
}

/// Square of the pawn removed by an en passant capture from `from` to `to`
///
/// The victim stands beside the capturing pawn: target file, origin rank.
#[inline]
pub(crate) fn en_passant_victim(from: Square, to: Square) -> Option<Square> {
    Square::new(to.file(), from.rank())
}
