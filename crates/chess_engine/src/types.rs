//! # Chess Rule Engine Core Types
//!
//! Colours, piece kinds, squares and the immutable move record appended to a
//! game's history.
//!
//! ## Coordinates
//!
//! A [`Square`] is a `(file, rank)` pair with both components in `0..8`.
//! File 0 is the queenside edge, rank 0 is White's back rank. Squares are
//! linearised as `rank * 8 + file` when indexing the board array.
//!
//! On the wire a square is the text `"file,rank"`, e.g. `"4,1"` for the
//! White king's pawn. [`Square`] serialises to and parses from that form.
//!
//! ## Move records
//!
//! [`MoveRecord`] flags (`is_castle`, `is_en_passant`, ...) are computed by
//! the controller before the record is built and never change afterwards.

use crate::error::MoveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Side colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step (+1 for White, -1 for Black)
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this colour's pieces at the start of the game
    #[inline]
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank holding this colour's pawns at the start of the game
    #[inline]
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Farthest rank for this colour's pawns
    #[inline]
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A piece standing on the board
///
/// `has_moved` drives castling rights and the pawn double step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Unmoved piece
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Same piece, flagged as having moved
    pub const fn moved(self) -> Self {
        Piece {
            has_moved: true,
            ..self
        }
    }
}

/// Board coordinate, always inside the 8x8 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    // rank first so the derived ordering walks the board rank by rank
    rank: u8,
    file: u8,
}

impl Square {
    /// Build a square, `None` if either coordinate is outside `0..8`
    #[inline]
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        (file < 8 && rank < 8).then_some(Square { rank, file })
    }

    /// Build a square from untrusted signed coordinates
    ///
    /// # Errors
    ///
    /// [`MoveError::OffBoard`] if either coordinate is outside `0..8`.
    pub fn try_from_coords(file: i64, rank: i64) -> Result<Square, MoveError> {
        match (u8::try_from(file), u8::try_from(rank)) {
            (Ok(f), Ok(r)) => Square::new(f, r).ok_or(MoveError::OffBoard { file, rank }),
            _ => Err(MoveError::OffBoard { file, rank }),
        }
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Linear index into the board array (`rank * 8 + file`)
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Square {
        debug_assert!(index < 64);
        Square {
            rank: (index / 8) as u8,
            file: (index % 8) as u8,
        }
    }

    /// Square shifted by a file/rank delta, `None` when it falls off the board
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Signed `(file, rank)` delta from `self` to `other`
    #[inline]
    pub(crate) fn delta_to(self, other: Square) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// All 64 squares, rank by rank
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = MoveError;

    /// Parse the `"file,rank"` text form used by the session API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidSquare {
            input: s.to_string(),
        };
        let (file, rank) = s.split_once(',').ok_or_else(invalid)?;
        let file: i64 = file.trim().parse().map_err(|_| invalid())?;
        let rank: i64 = rank.trim().parse().map_err(|_| invalid())?;
        Square::try_from_coords(file, rank)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// One accepted ply, as appended to the move history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: Color,
    pub is_capture: bool,
    pub is_castle: bool,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    pub promotion: Option<PieceKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert_eq!(
            Square::try_from_coords(-1, 3),
            Err(MoveError::OffBoard { file: -1, rank: 3 })
        );
    }

    #[test]
    fn test_square_text_form() {
        let sq: Square = "4,1".parse().unwrap();
        assert_eq!((sq.file(), sq.rank()), (4, 1));
        assert_eq!(sq.to_string(), "4,1");

        let spaced: Square = " 3 , 6 ".parse().unwrap();
        assert_eq!((spaced.file(), spaced.rank()), (3, 6));

        assert!(matches!(
            "e2".parse::<Square>(),
            Err(MoveError::InvalidSquare { .. })
        ));
        assert!(matches!(
            "8,0".parse::<Square>(),
            Err(MoveError::OffBoard { file: 8, rank: 0 })
        ));
    }

    #[test]
    fn test_square_index_layout() {
        let sq = Square::new(3, 2).unwrap();
        assert_eq!(sq.index(), 19);
        assert_eq!(Square::from_index(19), sq);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 2), Square::new(1, 2));
    }

    #[test]
    fn test_square_serde_uses_text_form() {
        let sq = Square::new(6, 0).unwrap();
        let json = serde_json::to_string(&sq).unwrap();
        assert_eq!(json, "\"6,0\"");
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sq);
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.forward(), -1);
        assert_eq!(Color::White.promotion_rank(), 7);
        assert_eq!(Color::Black.pawn_rank(), 6);
    }
}
