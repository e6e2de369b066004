use super::{Rank, Square};
use thiserror::Error;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two colours in chess: White and Black.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(Colour);
crate::impl_enum_iter!(Colour);

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// Represents the 8 line directions in chess, plus the knight jumps.
/// Each direction is a (file, rank) step; see [`Direction::delta`].

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N, S, W, E,
    NE, NW, SE, SW,
    NNE, NNW, NEE, NWW,
    SEE, SWW, SSE, SSW,
}

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

/// # Castling Representation
///
/// Represents the castling availability for a position, one bit per right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling(pub u8);

impl Default for Castling {
    fn default() -> Self {
        Castling::ALL
    }
}

crate::impl_bit_ops!(Castling);

/// The two wings a king can castle towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    /// King side, `O-O`
    Short,
    /// Queen side, `O-O-O`
    Long,
}

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Colour {
    /// Returns the rank step a pawn of this colour advances by
    pub const fn forward(&self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Returns the back rank of this colour
    pub const fn home_rank(&self) -> Rank {
        Rank::Rank1.relative(*self)
    }

    /// Returns the rank pawns of this colour start on
    pub const fn pawn_rank(&self) -> Rank {
        Rank::Rank2.relative(*self)
    }

    /// Returns the rank pawns of this colour promote on
    pub const fn promotion_rank(&self) -> Rank {
        Rank::Rank8.relative(*self)
    }

    /// Returns the en passant target rank a pawn of this colour may capture onto
    pub const fn ep_capture_rank(&self) -> Rank {
        Rank::Rank6.relative(*self)
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

impl Direction {
    /// The four orthogonal line directions
    pub const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// The four diagonal line directions
    pub const DIAGONAL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    /// The eight knight jumps
    #[rustfmt::skip]
    pub const KNIGHT: [Direction; 8] = [
        Direction::NNE, Direction::NNW, Direction::NEE, Direction::NWW,
        Direction::SEE, Direction::SWW, Direction::SSE, Direction::SSW,
    ];

    /// Returns the (file, rank) step of the direction
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            N => (0, 1),
            S => (0, -1),
            W => (-1, 0),
            E => (1, 0),
            NE => (1, 1),
            NW => (-1, 1),
            SE => (1, -1),
            SW => (-1, -1),
            NNE => (1, 2),
            NNW => (-1, 2),
            NEE => (2, 1),
            NWW => (-2, 1),
            SEE => (2, -1),
            SWW => (-2, -1),
            SSE => (1, -2),
            SSW => (-1, -2),
        }
    }

    /// Returns whether the direction runs along a rank or a file
    pub const fn is_orthogonal(self) -> bool {
        matches!(self, Direction::N | Direction::S | Direction::E | Direction::W)
    }

    /// Returns whether the direction runs along a diagonal
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::NW | Direction::SE | Direction::SW
        )
    }

    /// Try to get the line direction between two squares
    pub const fn try_from(from: Square, to: Square) -> Result<Self, &'static str> {
        if from as u8 == to as u8 {
            return Err("Squares are the same");
        }

        let rank_dist = (to.rank() as i8) - (from.rank() as i8);
        let file_dist = (to.file() as i8) - (from.file() as i8);

        match (rank_dist, file_dist) {
            (0, i) if i < 0 => Ok(Direction::W),
            (0, i) if i > 0 => Ok(Direction::E),
            (i, 0) if i > 0 => Ok(Direction::N),
            (i, 0) if i < 0 => Ok(Direction::S),

            (i, j) if i == j && i < 0 => Ok(Direction::SW),
            (i, j) if i == j && i > 0 => Ok(Direction::NE),
            (i, j) if i == -j && i > 0 => Ok(Direction::NW),
            (i, j) if i == -j && i < 0 => Ok(Direction::SE),

            _ => Err("No valid direction between these squares"),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;

    /// Negate the direction (N => S, etc...)
    fn neg(self) -> Self::Output {
        use Direction::*;
        match self {
            N => S,
            S => N,
            W => E,
            E => W,
            NE => SW,
            NW => SE,
            SE => NW,
            SW => NE,
            NNE => SSW,
            NNW => SSE,
            NEE => SWW,
            NWW => SEE,
            SEE => NWW,
            SWW => NEE,
            SSE => NNW,
            SSW => NNE,
        }
    }
}

impl Square {
    /// Try to add direction to a square
    #[inline]
    pub const fn add(self, rhs: Direction) -> Result<Self, SquareAddError> {
        let (file_delta, rank_delta) = rhs.delta();
        match self.offset(file_delta, rank_delta) {
            Some(sq) => Ok(sq),
            None => Err(SquareAddError::OutOfBounds),
        }
    }

    /// Returns the squares strictly between `self` and `to` along a shared line,
    /// or `None` if the two squares do not share a rank, file or diagonal
    pub fn between(self, to: Square) -> Option<Vec<Square>> {
        let dir = Direction::try_from(self, to).ok()?;
        let mut squares = Vec::new();
        let mut sq = self.add(dir).ok()?;

        while sq != to {
            squares.push(sq);
            sq = sq.add(dir).ok()?;
        }

        Some(squares)
    }
}

impl Castling {
    // Atomic castling rights
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);
    // Board colour castling rights
    pub const WHITE_CASTLING: Castling = Castling(3);
    pub const BLACK_CASTLING: Castling = Castling(12);
    // All or nothing castling rights
    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// Helper function to check if a castling right has another castling right as a subset
    pub fn has(self, right: Castling) -> bool {
        self & right != Castling::NONE
    }

    /// Helper function to set castling rights
    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    /// Helper function to remove castling rights
    pub fn remove(&mut self, right: Castling) {
        *self &= !right;
    }

    /// Get the castling right for a colour and wing
    #[inline]
    pub fn right(colour: Colour, side: CastleSide) -> Self {
        match (colour, side) {
            (Colour::White, CastleSide::Short) => Castling::WK,
            (Colour::White, CastleSide::Long) => Castling::WQ,
            (Colour::Black, CastleSide::Short) => Castling::BK,
            (Colour::Black, CastleSide::Long) => Castling::BQ,
        }
    }

    /// Get all castling rights belonging to a colour
    #[inline]
    pub fn for_colour(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WHITE_CASTLING,
            Colour::Black => Castling::BLACK_CASTLING,
        }
    }
}

impl std::ops::Not for Castling {
    type Output = Self;

    /// Invert the bits to give the opposite castling rights
    #[inline]
    fn not(self) -> Self::Output {
        Castling(!self.0 & 0x0F)
    }
}

impl std::fmt::Display for Castling {
    /// Displays castling right in the `KQkq` format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        let mut s = String::new();
        if self.has(Castling::WK) {
            s.push('K');
        }
        if self.has(Castling::WQ) {
            s.push('Q');
        }
        if self.has(Castling::BK) {
            s.push('k');
        }
        if self.has(Castling::BQ) {
            s.push('q');
        }

        write!(f, "{}", s)
    }
}

impl CastleSide {
    /// File the king lands on
    pub const fn king_to(self) -> super::File {
        match self {
            CastleSide::Short => super::File::FileG,
            CastleSide::Long => super::File::FileC,
        }
    }

    /// File the rook starts on
    pub const fn rook_from(self) -> super::File {
        match self {
            CastleSide::Short => super::File::FileH,
            CastleSide::Long => super::File::FileA,
        }
    }

    /// File the rook lands on
    pub const fn rook_to(self) -> super::File {
        match self {
            CastleSide::Short => super::File::FileF,
            CastleSide::Long => super::File::FileD,
        }
    }
}

impl std::fmt::Display for CastleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastleSide::Short => write!(f, "short"),
            CastleSide::Long => write!(f, "long"),
        }
    }
}

/******************************************\
|==========================================|
|             Square Add Errors            |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAddError {
    #[error("Square operation resulted in an out-of-bounds position")]
    OutOfBounds,
}
