//! Session layer for the chess tournament server
//!
//! Owns live games, exposes them over HTTP and hands finished results to
//! settlement. All chess rules live in `chess_engine`.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod settlement;
