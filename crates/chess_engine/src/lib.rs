//! # Chess rule engine
//!
//! Board representation, per-piece move legality, check, checkmate and
//! stalemate detection, castling, en passant and promotion for the
//! tournament game server.
//!
//! ## Layout
//!
//! - [`types`] - colours, piece kinds, squares, move records
//! - [`board`] - piece placement and position bookkeeping
//! - [`move_gen`] - movement geometry, attack detection, legality filter
//! - [`evaluation`] - material counting
//! - [`api`] - the per-session game controller and end-of-game evaluator
//! - [`snapshot`] - serialisable state for the session layer
//!
//! The engine performs no I/O and no locking. Callers must serialise mutating
//! calls for a given game.
//!
//! ```rust,ignore
//! use chess_engine::{ChessGame, GameConfig, Players, Square};
//!
//! let mut game = ChessGame::new("session-1", Players::new("alice", "bob"), GameConfig::default());
//! let e2 = Square::new(4, 1).unwrap();
//! let e4 = Square::new(4, 3).unwrap();
//! assert!(game.make_move(e2, e4, "alice", None));
//! ```

pub mod api;
pub mod board;
pub mod error;
pub mod evaluation;
pub mod move_gen;
pub mod snapshot;
pub mod types;

pub use api::{ChessGame, GameConfig, GameOutcome, GameState, Players};
pub use board::{Board, Position};
pub use error::{MoveError, MoveResult, SetupError};
pub use snapshot::{CapturedPiece, GameSnapshot};
pub use types::{Color, MoveRecord, Piece, PieceKind, Square};
