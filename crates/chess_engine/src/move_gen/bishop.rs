//! Bishop geometry
//!
//! Bishops move diagonally (equal absolute file and rank delta); every
//! intervening diagonal square must be empty.

use super::sliding::{self, Line};
use crate::board::Board;
use crate::types::Square;

/// Check whether a bishop on `from` reaches `to`
#[inline]
pub(crate) fn reaches(board: &Board, from: Square, to: Square) -> bool {
    sliding::slides_to(board, from, to, Line::Diagonal)
}
