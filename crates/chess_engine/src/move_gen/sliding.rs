//! Sliding piece geometry
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces move any number of squares along a line until blocked.
//!
//! ## Algorithm
//!
//! A slide from `from` to `to` is valid when the two squares share a line of
//! the requested kind and every square strictly between them is empty. The
//! destination itself is not inspected here; own-piece and king-capture
//! restrictions belong to the caller.

use crate::board::Board;
use crate::types::Square;

/// Line shapes a slider can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line {
    /// Same file or same rank
    Orthogonal,
    /// Equal absolute file and rank delta
    Diagonal,
}

/// Check whether `from` and `to` lie on a line of the given shape
#[inline]
pub(crate) fn on_line(from: Square, to: Square, line: Line) -> bool {
    let (df, dr) = from.delta_to(to);
    if df == 0 && dr == 0 {
        return false;
    }
    match line {
        Line::Orthogonal => df == 0 || dr == 0,
        Line::Diagonal => df.abs() == dr.abs(),
    }
}

/// Check that every square strictly between `from` and `to` is empty
///
/// Assumes the squares share a rank, file or diagonal.
pub(crate) fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta_to(to);
    let (step_file, step_rank) = (df.signum(), dr.signum());

    let mut current = from.offset(step_file, step_rank);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if !board.is_empty(square) {
            return false; // Path is blocked
        }
        current = square.offset(step_file, step_rank);
    }

    // Walked off the board without meeting `to`: not on a shared line
    false
}

/// Check whether a slider along `line` reaches `to` unobstructed
#[inline]
pub(crate) fn slides_to(board: &Board, from: Square, to: Square, line: Line) -> bool {
    on_line(from, to, line) && is_path_clear(board, from, to)
}
