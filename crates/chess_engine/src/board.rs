//! Board state and position bookkeeping
//!
//! [`Board`] is a fixed 64-entry array of optional pieces. [`Position`] adds
//! the state legality depends on besides piece placement: the cached king
//! squares and the en passant target.
//!
//! `Position` is `Copy` (under 200 bytes), so legality probes work on a copy
//! and the live position is never mutated speculatively.

use crate::types::{Color, Piece, PieceKind, Square};

/// Piece order on both back ranks, file 0 to file 7
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, at most one piece per square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            squares: [None; 64],
        }
    }
}

impl Board {
    /// Get piece at square
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Check if square is empty
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Colour of the piece on `square`, if any
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.get(square).map(|piece| piece.color)
    }

    /// Occupied squares in index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|piece| (Square::from_index(index), piece)))
    }

    /// Occupied squares holding `color`'s pieces
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Number of pieces on the board
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[square.index()], piece)
    }
}

/// Piece placement plus king-square cache and en passant target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    board: Board,
    white_king: Option<Square>,
    black_king: Option<Square>,
    en_passant: Option<Square>,
}

impl Position {
    /// Position with no pieces
    pub fn empty() -> Self {
        Position::default()
    }

    /// Standard starting position
    pub fn standard() -> Self {
        let mut position = Position::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in [Color::White, Color::Black] {
                if let Some(square) = Square::new(file, color.home_rank()) {
                    position.place(square, Piece::new(*kind, color));
                }
                if let Some(square) = Square::new(file, color.pawn_rank()) {
                    position.place(square, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        position
    }

    /// Put `piece` on `square`, replacing whatever stood there
    ///
    /// Keeps the king-square cache in step with the board. Intended for
    /// building custom positions; games only mutate positions through the
    /// controller.
    pub fn place(&mut self, square: Square, piece: Piece) -> &mut Self {
        self.put(square, piece);
        self
    }

    /// Builder form of [`Position::place`]
    pub fn with(mut self, square: Square, piece: Piece) -> Self {
        self.put(square, piece);
        self
    }

    /// Underlying piece placement
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Cached king square (O(1))
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Square a pawn may capture onto en passant this ply
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    /// Kings of `color` actually on the board
    pub fn king_count(&self, color: Color) -> usize {
        self.board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count()
    }

    /// Place a piece, returning the one it displaced
    pub(crate) fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let displaced = self.board.set(square, Some(piece));
        if let Some(old) = displaced {
            self.forget_king(square, old);
        }
        if piece.kind == PieceKind::King {
            self.set_king_square(piece.color, Some(square));
        }
        displaced
    }

    /// Remove and return the piece on `square`
    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed = self.board.set(square, None);
        if let Some(piece) = removed {
            self.forget_king(square, piece);
        }
        removed
    }

    /// Move the piece on `from` to `to` and flag it as moved
    ///
    /// Returns the piece that stood on `to`. Does nothing if `from` is empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => self.put(to, piece.moved()),
            None => None,
        }
    }

    fn set_king_square(&mut self, color: Color, square: Option<Square>) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    fn forget_king(&mut self, square: Square, piece: Piece) {
        if piece.kind == PieceKind::King && self.king_square(piece.color) == Some(square) {
            self.set_king_square(piece.color, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_standard_position_layout() {
        let position = Position::standard();

        assert_eq!(position.board().count(), 32);
        assert_eq!(
            position.piece_at(sq(3, 0)),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            position.piece_at(sq(4, 7)),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        for file in 0..8 {
            assert_eq!(
                position.piece_at(sq(file, 6)),
                Some(Piece::new(PieceKind::Pawn, Color::Black))
            );
            assert!(position.board().is_empty(sq(file, 4)));
        }
        assert_eq!(position.king_square(Color::White), Some(sq(4, 0)));
        assert_eq!(position.king_square(Color::Black), Some(sq(4, 7)));
        assert_eq!(position.en_passant_target(), None);
    }

    #[test]
    fn test_relocate_updates_king_cache_and_flags_moved() {
        let mut position = Position::standard();
        position.remove(sq(4, 1));

        let captured = position.relocate(sq(4, 0), sq(4, 1));

        assert_eq!(captured, None);
        assert_eq!(position.king_square(Color::White), Some(sq(4, 1)));
        assert!(position.piece_at(sq(4, 1)).unwrap().has_moved);
        assert!(position.board().is_empty(sq(4, 0)));
    }

    #[test]
    fn test_relocate_returns_captured_piece() {
        let mut position = Position::empty()
            .with(sq(0, 0), Piece::new(PieceKind::Rook, Color::White))
            .with(sq(0, 5), Piece::new(PieceKind::Knight, Color::Black));

        let captured = position.relocate(sq(0, 0), sq(0, 5));

        assert_eq!(captured, Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(position.board().count(), 1);
    }

    #[test]
    fn test_overwriting_king_clears_cache() {
        let mut position =
            Position::empty().with(sq(4, 4), Piece::new(PieceKind::King, Color::Black));
        position.place(sq(4, 4), Piece::new(PieceKind::Queen, Color::White));

        assert_eq!(position.king_square(Color::Black), None);
        assert_eq!(position.king_count(Color::Black), 0);
    }

    #[test]
    fn test_pieces_of_filters_by_color() {
        let position = Position::standard();
        assert_eq!(position.board().pieces_of(Color::White).count(), 16);
        assert!(position
            .board()
            .pieces_of(Color::Black)
            .all(|(square, _)| square.rank() >= 6));
    }
}
