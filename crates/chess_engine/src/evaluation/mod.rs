//! Position evaluation
//!
//! Only material counting is needed: it breaks ties when a game runs out of
//! time.
//!
//! ## Module Organization
//!
//! - `material` - Piece values and per-colour material totals

mod material;

pub use material::{material_balance, material_total, piece_value};
