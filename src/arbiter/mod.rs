//! # Module: `arbiter`
//!
//! The legality engine. An [`Arbiter`] is bound to one board for its lifetime and is the only
//! component that moves pieces on it.
//!
//! ## Core Concepts
//!
//! - **Attackers**: which pieces of a side could move to a square, see [`Arbiter::is_attacked`].
//! - **Resolving squares**: with a single checker, the squares that end the check when occupied:
//!   the checker's own square, plus the line towards the king when the checker slides.
//! - **Double check**: two checkers can only be answered by a king move, no block or capture
//!   is ever accepted. This is checked up front rather than left to the pin simulation.
//! - **King safety**: every non-king move is played out on a [`Simulation`](crate::board::Simulation)
//!   of the grid and rejected if the own king ends up attacked.

pub mod castle;
pub mod movement;

pub use movement::Executed;

use crate::board::{Board, BoardPiece, PieceId};
use crate::core::*;

/******************************************\
|==========================================|
|                 Arbiter                  |
|==========================================|
\******************************************/

#[derive(Debug)]
pub struct Arbiter<'b> {
    board: &'b mut Board,
}

impl<'b> Arbiter<'b> {
    pub fn new(board: &'b mut Board) -> Self {
        Arbiter { board }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Returns the pieces of `by` attacking `square`, see [`Board::attackers_to`]
    #[inline]
    pub fn is_attacked(&mut self, square: Square, by: Colour) -> Vec<PieceId> {
        self.board.attackers_to(square, by)
    }

    /// Returns the pieces giving check to the king of `colour`
    pub fn checkers(&mut self, colour: Colour) -> Vec<PieceId> {
        let king = self.board.king(colour).square;
        self.is_attacked(king, !colour)
    }

    #[inline]
    pub fn in_check(&mut self, colour: Colour) -> bool {
        !self.checkers(colour).is_empty()
    }

    /// Squares that end a check by the given checkers when a non-king piece lands on them.
    ///
    /// Empty unless there is exactly one checker.
    pub fn resolving_squares(&self, colour: Colour, checkers: &[PieceId]) -> Vec<Square> {
        let [checker] = checkers else {
            return Vec::new();
        };
        let Some(checker) = self.board.piece(*checker) else {
            return Vec::new();
        };

        let mut squares = vec![checker.square];
        if checker.pt().is_slider() {
            let king = self.board.king(colour).square;
            squares.extend(checker.square.between(king).unwrap_or_default());
        }
        squares
    }

    /// Returns the destinations of a piece that do not leave its own king attacked, in square order.
    ///
    /// Castling is not included, see [`Arbiter::castle_moves`].
    pub fn legal_moves(&mut self, id: PieceId) -> Vec<Square> {
        let Some(piece) = self.board.piece(id).copied() else {
            return Vec::new();
        };

        self.board
            .pseudo_legal_moves(&piece)
            .into_iter()
            .filter(|&to| !self.holds_king(to) && self.king_safety(&piece, to).is_ok())
            .collect()
    }

    /// Whether any legal move exists for `colour`, castling included
    pub fn has_legal_move(&mut self, colour: Colour) -> bool {
        let ids: Vec<PieceId> = self.board.pieces(colour).map(|p| p.id).collect();

        ids.into_iter().any(|id| !self.legal_moves(id).is_empty())
            || !self.castle_moves(colour).is_empty()
    }

    /// Whether the king of `colour` has an adjacent square it can step to without being attacked
    pub fn king_can_escape(&mut self, colour: Colour) -> bool {
        let king = *self.board.king(colour);

        self.board
            .pseudo_legal_moves(&king)
            .into_iter()
            .any(|to| !self.holds_king(to) && self.is_attacked(to, !colour).is_empty())
    }

    /// Whether a non-king piece of `colour` can legally capture or block the single checker.
    ///
    /// Always `false` for anything but exactly one checker.
    pub fn can_any_piece_block(&mut self, colour: Colour, checkers: &[PieceId]) -> bool {
        let mut targets = self.resolving_squares(colour, checkers);
        if targets.is_empty() {
            return false;
        }

        // A pawn that just advanced two squares can also be taken en passant
        if let Some(target) = self.board.enpassant() {
            if self.enpassant_victim(colour, target).is_some_and(|v| checkers.contains(&v)) {
                targets.push(target);
            }
        }

        let blockers: Vec<BoardPiece> = self
            .board
            .pieces(colour)
            .filter(|p| p.pt() != PieceType::King)
            .copied()
            .collect();

        blockers.iter().any(|piece| {
            targets.iter().any(|&to| {
                self.board.reaches(piece, to) && self.king_safety(piece, to).is_ok()
            })
        })
    }

    /// Whether the king of `colour` is checkmated
    pub fn is_checkmate(&mut self, colour: Colour) -> bool {
        let checkers = self.checkers(colour);

        if checkers.is_empty() || self.king_can_escape(colour) {
            return false;
        }

        checkers.len() > 1 || !self.can_any_piece_block(colour, &checkers)
    }

    /// Whether `colour` is not in check and has no legal move
    pub fn is_stalemate(&mut self, colour: Colour) -> bool {
        !self.in_check(colour) && !self.has_legal_move(colour)
    }

    /// Decides whether moving `piece` to `to` keeps its own king safe.
    ///
    /// Assumes the move is reachable on the board.
    pub(crate) fn king_safety(&mut self, piece: &BoardPiece, to: Square) -> Result<(), RuleError> {
        let colour = piece.colour();
        let checkers = self.checkers(colour);

        if piece.pt() == PieceType::King {
            return match self.is_attacked(to, !colour).is_empty() {
                true => Ok(()),
                false if checkers.is_empty() => Err(RuleError::ExposesKing),
                false => Err(RuleError::StillInCheck),
            };
        }

        if checkers.len() > 1 {
            return Err(RuleError::DoubleCheck);
        }

        let victim = self.enpassant_capture(piece, to);

        if !checkers.is_empty() {
            let resolving = self.resolving_squares(colour, &checkers);
            let takes_checker = victim.is_some_and(|v| checkers.contains(&v));

            if !resolving.contains(&to) && !takes_checker {
                return Err(RuleError::DoesNotBlock);
            }
        }

        let king = self.board.king(colour).square;
        let victim_square = victim.and_then(|v| self.board.piece(v)).map(|v| v.square);

        let exposed = {
            let mut sim = self.board.simulate();
            sim.lift(piece.square);
            sim.place(piece.id, to);
            if let Some(square) = victim_square {
                sim.lift(square);
            }
            !sim.attackers_to(king, !colour).is_empty()
        };

        match (exposed, checkers.is_empty()) {
            (false, _) => Ok(()),
            (true, true) => Err(RuleError::ExposesKing),
            (true, false) => Err(RuleError::StillInCheck),
        }
    }

    /// The pawn captured if `piece` moves diagonally onto the en passant target
    pub(crate) fn enpassant_capture(&self, piece: &BoardPiece, to: Square) -> Option<PieceId> {
        let diagonal_pawn_step = piece.pt() == PieceType::Pawn && piece.square.file() != to.file();

        if diagonal_pawn_step && self.board.id_on(to).is_none() {
            self.enpassant_victim(piece.colour(), to)
        } else {
            None
        }
    }

    /// The enemy pawn standing behind an en passant target, from the capturing side's view
    fn enpassant_victim(&self, colour: Colour, target: Square) -> Option<PieceId> {
        if !self.board.is_enpassant_target(colour, target) {
            return None;
        }

        target
            .offset(0, -colour.forward())
            .and_then(|sq| self.board.on(sq))
            .filter(|p| p.piece == Piece::from_parts(!colour, PieceType::Pawn))
            .map(|p| p.id)
    }

    #[inline]
    fn holds_king(&self, square: Square) -> bool {
        self.board.id_on(square).is_some_and(|id| self.board.is_king(id))
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
