//! Queen geometry
//!
//! Queens combine the movement of rooks and bishops.

use super::{bishop, rook};
use crate::board::Board;
use crate::types::Square;

/// Check whether a queen on `from` reaches `to`
#[inline]
pub(crate) fn reaches(board: &Board, from: Square, to: Square) -> bool {
    rook::reaches(board, from, to) || bishop::reaches(board, from, to)
}
