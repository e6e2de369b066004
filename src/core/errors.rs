//! Defines the error types reported by the rules engine.
//!
//! These cover the three failure families a caller can see when submitting a move:
//! flow errors (the game is over), notation errors (the token could not be resolved
//! to a piece and a destination) and rule errors (the move breaks check, pin or
//! castling rules). Every one of them is recoverable, the board is left untouched
//! and the caller may retry with another move.

#![deny(missing_docs)]

use thiserror::Error;

use super::CastleSide;

/******************************************\
|==========================================|
|               Rule Errors                |
|==========================================|
\******************************************/

/// Represents a move that is geometrically possible but illegal under the check,
/// pin or castling rules.
///
/// The display strings are part of the public contract, they are handed back
/// verbatim to whoever submitted the move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// The king is in check and the move leaves it in check.
    ///
    /// Also reported when the king itself steps onto an attacked square while in check.
    #[error("King is in check, and will be still in check on this move.")]
    StillInCheck,

    /// The king is in check by a single piece and the destination neither captures
    /// the checker nor blocks its line.
    ///
    /// # Example
    /// ```
    /// # use chess_rules::game::Game;
    /// # use chess_rules::core::errors::RuleError;
    /// # use chess_rules::game::PlayError;
    /// let mut game = Game::from_fen("4k3/8/8/8/8/8/3P4/r3K3 w - - 0 1").unwrap();
    /// assert_eq!(game.play("d3"), Err(PlayError::Rule(RuleError::DoesNotBlock)));
    /// ```
    #[error("King is in check, move does not block the check.")]
    DoesNotBlock,

    /// The king is not in check, but moving the piece would expose it (the piece is pinned),
    /// or the king would step onto an attacked square.
    #[error("King is not in check, but will be in check on this move.")]
    ExposesKing,

    /// Two pieces give check at once, only a king move can resolve it.
    #[error("King is in double check, only a king move can resolve it.")]
    DoubleCheck,

    /// Castling is not available.
    #[error("You can not castle {side}: {reason}")]
    Castle {
        /// The wing the king tried to castle towards.
        side: CastleSide,
        /// Why castling was refused.
        reason: CastleBlock,
    },
}

/// Why a castling attempt was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleBlock {
    /// The king or the rook has already moved.
    #[error("king or rook has already moved")]
    Moved,
    /// No rook of the king's side stands on the corner square, or the king is off its home square.
    #[error("king or rook is not on its home square")]
    Missing,
    /// A square between king and rook is occupied.
    #[error("squares between king and rook are occupied")]
    Obstructed,
    /// The king is in check, or passes through or lands on an attacked square.
    #[error("king is in check or passes through an attacked square")]
    Attacked,
}

/******************************************\
|==========================================|
|               Move Errors                |
|==========================================|
\******************************************/

/// Represents the result of asking the arbiter to execute a single move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The piece cannot reach the destination: the geometry is wrong, a transit square is
    /// occupied, the destination holds a piece of the same side (or a king), or a pawn
    /// tries to move diagonally onto an empty square that is not a valid en passant target.
    #[error("Move is not possible on the board")]
    Unreachable,

    /// The piece can reach the destination, but the move is illegal.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/******************************************\
|==========================================|
|             Notation Errors              |
|==========================================|
\******************************************/

/// Represents the failures of turning a move token into a piece and a destination.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationError {
    /// The token does not have the shape of a move (2-4 significant characters).
    ///
    /// # Example
    /// ```
    /// # use chess_rules::game::MoveToken;
    /// # use chess_rules::core::errors::NotationError;
    /// assert_eq!("Nbd7e5".parse::<MoveToken>(), Err(NotationError::Malformed));
    /// ```
    #[error("Move is not in the right format")]
    Malformed,

    /// The side to move has no piece of the requested type and disambiguator.
    #[error("The piece you try to move is not on the board")]
    NoSuchPiece,

    /// The destination square is not on the board.
    #[error("Out of bounds")]
    OutOfBounds,

    /// No candidate piece can reach the destination.
    #[error("Move is not possible on the board")]
    NoPath,

    /// Promotion to anything but a queen was requested.
    #[error("Pawns can only promote to a queen")]
    UnsupportedPromotion,
}
