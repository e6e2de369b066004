//! # Chess Rules
//!
//! A deterministic chess rules authority: board positions, move legality under check and pins,
//! castling, en passant, promotion, and a turn-based game that ends in mate or a draw.
pub mod arbiter;
pub mod board;
pub mod core;
pub mod game;
pub mod utils;

pub use arbiter::Arbiter;
pub use board::{Board, Position};
pub use self::core::*;
pub use game::{Game, GameConfig, Outcome, PlayError};
