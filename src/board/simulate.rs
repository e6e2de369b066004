use std::ops::Deref;

use super::{Board, PieceId};
use crate::core::*;

/******************************************\
|==========================================|
|                Simulation                |
|==========================================|
\******************************************/

/// # Scoped grid mutation
///
/// A guard that edits the grid of a board and puts every square back when it goes out of scope,
/// whichever way the scope is left. Only the grid is touched: piece collections, recorded squares
/// and move flags are never changed, so a lifted or overwritten piece simply stops being live.
///
/// Read access to the board goes through `Deref`. Guards nest through [`Simulation::simulate`].
///
/// ## Examples
///
/// ```
/// use chess_rules::board::Board;
/// use chess_rules::core::Square;
///
/// let mut board = Board::default();
/// {
///     let mut sim = board.simulate();
///     sim.lift(Square::E2);
///     assert!(sim.on(Square::E2).is_none());
/// }
/// assert!(board.on(Square::E2).is_some());
/// ```
#[derive(Debug)]
pub struct Simulation<'a> {
    board: &'a mut Board,

    undo: Vec<(Square, Option<PieceId>)>,
}

impl Board {
    /// Starts a scoped mutation of the grid
    pub fn simulate(&mut self) -> Simulation<'_> {
        Simulation {
            board: self,
            undo: Vec::with_capacity(4),
        }
    }
}

impl Simulation<'_> {
    /// Empties a square, returning the id that stood there
    pub fn lift(&mut self, square: Square) -> Option<PieceId> {
        let previous = self.board.grid[square.index()].take();
        self.undo.push((square, previous));
        previous
    }

    /// Puts a piece on a square, returning the id it replaced
    pub fn place(&mut self, id: PieceId, square: Square) -> Option<PieceId> {
        let previous = self.board.grid[square.index()].replace(id);
        self.undo.push((square, previous));
        previous
    }

    /// Starts a nested scope, undone before this one
    pub fn simulate(&mut self) -> Simulation<'_> {
        self.board.simulate()
    }

    /// See [`Board::attackers_to`]
    pub fn attackers_to(&mut self, square: Square, by: Colour) -> Vec<PieceId> {
        self.board.attackers_to(square, by)
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        while let Some((square, previous)) = self.undo.pop() {
            self.board.grid[square.index()] = previous;
        }
    }
}

/******************************************\
|==========================================|
|                Attackers                 |
|==========================================|
\******************************************/

impl Board {
    /// Returns the live pieces of `by` that could move to `square`, in id order.
    ///
    /// The king of the other side is moved onto `square` for the duration of the query, so a pawn
    /// sees something to capture there and sliders are not blocked by the king's current square.
    /// Turn order and the attackers' own king safety are ignored.
    pub fn attackers_to(&mut self, square: Square, by: Colour) -> Vec<PieceId> {
        let king = *self.king(!by);

        let mut sim = self.simulate();
        sim.lift(king.square);
        sim.place(king.id, square);

        let attackers = sim
            .live_pieces(by)
            .filter(|piece| sim.reaches(piece, square))
            .map(|piece| piece.id)
            .collect();

        attackers
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
