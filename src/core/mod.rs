// Core module exports

// Value type submodules
pub mod errors;
pub mod macros;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use errors::{CastleBlock, MoveError, NotationError, RuleError};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{CastleSide, Castling, Colour, Direction, SquareAddError};
