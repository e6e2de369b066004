//! # Module: `geometry`
//!
//! Raw movement patterns of the six piece kinds, and the occupancy rules layered on top of them.
//!
//! ## Core Concepts
//!
//! - **Raw path**: [`BoardPiece::raw_path`] returns the transit squares strictly between the
//!   piece and a destination that must be empty for the move to be possible, or `None` if the
//!   destination does not fit the piece's movement pattern at all. Occupancy is ignored.
//! - **Reach**: [`Board::reaches`] combines the raw path with the board: transit squares empty,
//!   no own piece on the destination, and the pawn rules (diagonal steps capture, straight
//!   steps do not, en passant onto the current target only).
//! - **Pseudo-legal moves**: every destination a piece reaches, with no regard for its own king.
//!
//! Dispatch is a plain `match` over [`PieceType`].

use super::{Board, BoardPiece};
use crate::core::*;

/******************************************\
|==========================================|
|                 Raw Paths                |
|==========================================|
\******************************************/

impl BoardPiece {
    /// Returns the squares between the piece and `to` that must be empty, or `None`
    /// if `to` is not on the piece's movement pattern.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::board::Board;
    /// use chess_rules::core::Square;
    ///
    /// let board = Board::default();
    /// let pawn = board.on(Square::E2).unwrap();
    /// assert_eq!(pawn.raw_path(Square::E4), Some(vec![Square::E3]));
    /// assert_eq!(pawn.raw_path(Square::E5), None);
    /// ```
    pub fn raw_path(&self, to: Square) -> Option<Vec<Square>> {
        match self.pt() {
            PieceType::Pawn => pawn_path(self.colour(), self.square, to, self.has_moved),
            PieceType::Knight => knight_path(self.square, to),
            PieceType::King => king_path(self.square, to),
            slider => slider_path(slider, self.square, to),
        }
    }
}

/// Forward only: one step straight or diagonal, or two straight steps from an unmoved pawn
fn pawn_path(colour: Colour, from: Square, to: Square, has_moved: bool) -> Option<Vec<Square>> {
    let rank_delta = (to.rank() as i8 - from.rank() as i8) * colour.forward();

    match rank_delta {
        1 if Square::file_dist(from, to) <= 1 => Some(Vec::new()),
        2 if !has_moved && from.file() == to.file() => {
            from.offset(0, colour.forward()).map(|mid| vec![mid])
        }
        _ => None,
    }
}

fn knight_path(from: Square, to: Square) -> Option<Vec<Square>> {
    match (Square::file_dist(from, to), Square::rank_dist(from, to)) {
        (1, 2) | (2, 1) => Some(Vec::new()),
        _ => None,
    }
}

fn king_path(from: Square, to: Square) -> Option<Vec<Square>> {
    let dist = Square::file_dist(from, to).max(Square::rank_dist(from, to));
    (dist == 1).then(Vec::new)
}

fn slider_path(pt: PieceType, from: Square, to: Square) -> Option<Vec<Square>> {
    let dir = Direction::try_from(from, to).ok()?;

    let fits = match pt {
        PieceType::Rook => dir.is_orthogonal(),
        PieceType::Bishop => dir.is_diagonal(),
        _ => true,
    };

    if fits { from.between(to) } else { None }
}

/******************************************\
|==========================================|
|              Board Occupancy             |
|==========================================|
\******************************************/

impl Board {
    /// Returns whether `piece` can move to `to` on the current grid, ignoring its own king.
    ///
    /// A capture onto any enemy piece counts, kings included, which is what attack detection needs.
    pub fn reaches(&self, piece: &BoardPiece, to: Square) -> bool {
        let Some(path) = piece.raw_path(to) else {
            return false;
        };

        if path.iter().any(|&sq| self.id_on(sq).is_some()) {
            return false;
        }

        let occupant = self.on(to).map(BoardPiece::colour);
        if occupant == Some(piece.colour()) {
            return false;
        }

        if piece.pt() != PieceType::Pawn {
            return true;
        }

        if piece.square.file() == to.file() {
            occupant.is_none()
        } else {
            occupant.is_some() || self.is_enpassant_target(piece.colour(), to)
        }
    }

    /// Whether a pawn of `colour` may capture en passant onto `to`
    #[inline]
    pub(crate) fn is_enpassant_target(&self, colour: Colour, to: Square) -> bool {
        self.enpassant == Some(to) && to.rank() == colour.ep_capture_rank()
    }

    /// Returns every square `piece` reaches, in square order
    pub fn pseudo_legal_moves(&self, piece: &BoardPiece) -> Vec<Square> {
        let mut targets: Vec<Square> = match piece.pt() {
            PieceType::Pawn => {
                let fwd = piece.colour().forward();
                [(0, fwd), (0, 2 * fwd), (-1, fwd), (1, fwd)]
                    .into_iter()
                    .filter_map(|(df, dr)| piece.square.offset(df, dr))
                    .collect()
            }
            PieceType::Knight => Direction::KNIGHT
                .into_iter()
                .filter_map(|dir| piece.square.add(dir).ok())
                .collect(),
            PieceType::King => Direction::ORTHOGONAL
                .into_iter()
                .chain(Direction::DIAGONAL)
                .filter_map(|dir| piece.square.add(dir).ok())
                .collect(),
            slider => {
                let dirs: &[Direction] = match slider {
                    PieceType::Rook => &Direction::ORTHOGONAL,
                    PieceType::Bishop => &Direction::DIAGONAL,
                    _ => &[
                        Direction::N, Direction::S, Direction::E, Direction::W,
                        Direction::NE, Direction::NW, Direction::SE, Direction::SW,
                    ],
                };
                dirs.iter().flat_map(|&dir| self.ray(piece.square, dir)).collect()
            }
        };

        targets.retain(|&to| self.reaches(piece, to));
        targets.sort();
        targets
    }

    /// Walks from `from` in `dir` up to and including the first occupied square
    fn ray(&self, from: Square, dir: Direction) -> Vec<Square> {
        let mut squares = Vec::new();
        let mut current = from;

        while let Ok(next) = current.add(dir) {
            squares.push(next);
            if self.id_on(next).is_some() {
                break;
            }
            current = next;
        }

        squares
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
