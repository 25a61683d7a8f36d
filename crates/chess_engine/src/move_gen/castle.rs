//! Castling legality
//!
//! All of the following must hold for the king on `from` to castle to `to`:
//! - the king has not moved
//! - the rook on the same rank (file 7 kingside, file 0 queenside) exists,
//!   belongs to the king's colour and has not moved
//! - every square strictly between king and rook is empty
//! - the king is not currently in check
//! - no square the king occupies or crosses, destination included, is
//!   attacked by the opponent
//!
//! The side is chosen by comparing destination and origin files.

use super::attack::{is_in_check, is_square_attacked};
use crate::board::Position;
use crate::types::{Piece, PieceKind, Square};

/// Which wing the king castles towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Side implied by a two-file king move
    #[inline]
    pub(crate) fn of(from: Square, to: Square) -> CastleSide {
        if to.file() > from.file() {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        }
    }

    /// File the castling rook starts on
    #[inline]
    pub(crate) fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File delta pointing from the king toward the rook
    #[inline]
    fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// Rook origin and destination squares for a castling king move
///
/// The rook ends on the square the king crossed, next to the king's new
/// square.
pub(crate) fn rook_squares(from: Square, to: Square) -> Option<(Square, Square)> {
    let side = CastleSide::of(from, to);
    let rook_from = Square::new(side.rook_file(), from.rank())?;
    let rook_to = to.offset(-side.step(), 0)?;
    Some((rook_from, rook_to))
}

/// Check whether `king` on `from` may castle to `to`
pub(crate) fn can_castle(position: &Position, king: Piece, from: Square, to: Square) -> bool {
    if king.kind != PieceKind::King || king.has_moved {
        return false;
    }

    let (df, dr) = from.delta_to(to);
    if dr != 0 || df.abs() != 2 {
        return false;
    }

    let side = CastleSide::of(from, to);
    let Some((rook_from, _)) = rook_squares(from, to) else {
        return false;
    };

    // Rook must exist, be ours and be unmoved
    match position.piece_at(rook_from) {
        Some(rook)
            if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return false,
    }

    // Squares between king and rook must be empty
    let mut between = from.offset(side.step(), 0);
    while let Some(square) = between {
        if square == rook_from {
            break;
        }
        if !position.board().is_empty(square) {
            return false;
        }
        between = square.offset(side.step(), 0);
    }

    if is_in_check(position, king.color) {
        return false;
    }

    // King must not pass through or land on an attacked square
    let opponent = king.color.opponent();
    let mut path = Some(from);
    while let Some(square) = path {
        if is_square_attacked(position, square, opponent) {
            return false;
        }
        if square == to {
            break;
        }
        path = square.offset(side.step(), 0);
    }

    true
}
