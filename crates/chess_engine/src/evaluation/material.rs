//! Material evaluation
//!
//! Evaluates the material of a position by counting piece values:
//! Pawn 1, Knight 3, Bishop 3, Rook 5, Queen 9, King 0.

use crate::board::Position;
use crate::types::{Color, PieceKind};

/// Material value of a piece kind
#[inline]
pub fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Summed material of `color`'s pieces on the board
pub fn material_total(position: &Position, color: Color) -> u32 {
    position
        .board()
        .pieces_of(color)
        .map(|(_, piece)| piece_value(piece.kind))
        .sum()
}

/// Material balance from White's point of view
pub fn material_balance(position: &Position) -> i64 {
    i64::from(material_total(position, Color::White))
        - i64::from(material_total(position, Color::Black))
}
