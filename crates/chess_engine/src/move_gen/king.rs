//! King geometry
//!
//! ## King Movement Rules
//!
//! - Kings move one square in any direction (8 possible destinations)
//! - A two-square horizontal move is a castling attempt and is delegated to
//!   [`castle::can_castle`](super::castle::can_castle)
//! - Kings attack only the adjacent squares; castling never attacks

use super::castle;
use crate::board::Position;
use crate::types::{Piece, Square};

/// Check whether the king `king` on `from` may move to `to`
pub(crate) fn reaches(position: &Position, king: Piece, from: Square, to: Square) -> bool {
    if attacks(from, to) {
        return true;
    }

    let (df, dr) = from.delta_to(to);
    if dr == 0 && df.abs() == 2 {
        return castle::can_castle(position, king, from, to);
    }

    false
}

/// Check whether a king on `from` attacks `target`
#[inline]
pub(crate) fn attacks(from: Square, target: Square) -> bool {
    let (df, dr) = from.delta_to(target);
    from != target && df.abs() <= 1 && dr.abs() <= 1
}
