use thiserror::Error;

use crate::core::Colour;

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - Represents the different chess pieces, i.e. a piece type together with its side
/// - The single character notation encodes the side in its case (`P` white, `p` black)

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhitePawn, BlackPawn, WhiteKnight, BlackKnight, WhiteBishop, BlackBishop, WhiteRook, BlackRook, WhiteQueen, BlackQueen, WhiteKing, BlackKing
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;
}

crate::impl_from_to_primitive!(Piece);
crate::impl_enum_iter!(Piece);

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - Represents the different chess piece types

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;
}

crate::impl_from_to_primitive!(PieceType);
crate::impl_enum_iter!(PieceType);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Piece {
    /// Returns the piece type of the piece
    pub const fn pt(self) -> PieceType {
        unsafe { PieceType::from_unchecked(self as u8 >> 1) }
    }

    /// Returns the colour of the piece
    pub const fn colour(self) -> Colour {
        unsafe { Colour::from_unchecked(self as u8 & 1) }
    }

    /// Combines a colour and piece type pair to create a piece
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::core::{Piece, Colour, PieceType};
    ///
    /// assert_eq!(Piece::from_parts(Colour::White, PieceType::Pawn), Piece::WhitePawn);
    /// assert_eq!(Piece::from_parts(Colour::Black, PieceType::King), Piece::BlackKing);
    /// ```
    pub const fn from_parts(colour: Colour, piece_type: PieceType) -> Self {
        unsafe { Piece::from_unchecked(colour as u8 | (piece_type as u8) << 1) }
    }

    /// Returns the single character notation of the piece
    pub fn notation(self) -> char {
        PIECE_STR.as_bytes()[self.index()] as char
    }

    /// Parses a single notation character into a piece
    pub fn from_char(c: char) -> Result<Self, ParsePieceError> {
        let index = PIECE_STR
            .chars()
            .position(|p| p == c)
            .ok_or(ParsePieceError::InvalidChar(c))?;

        Ok(unsafe { Piece::from_unchecked(index as u8) })
    }
}

impl PieceType {
    /// Returns whether the piece type moves along lines (bishop, rook, queen)
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    /// Parses an upper case piece letter as used in move notation (`N`, `B`, `R`, `Q`, `K`, `P`)
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// String to convert from piece/piece type to their string representation
const PIECE_STR: &str = "PpNnBbRrQqKk";

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let piece_char = PIECE_STR.as_bytes()[self.index() << 1] as char;
        write!(f, "{}", piece_char.to_ascii_lowercase())
    }
}

/******************************************\
|==========================================|
|                Parse Piece               |
|==========================================|
\******************************************/

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    /// Parse the piece character into a piece, with error checkings
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::core::{Piece, ParsePieceError};
    ///
    /// assert_eq!("k".parse::<Piece>().unwrap(), Piece::BlackKing);
    /// assert!(matches!("X".parse::<Piece>(), Err(ParsePieceError::InvalidChar('X'))));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c),
            _ => Err(ParsePieceError::InvalidLength(s.chars().count())),
        }
    }
}

/******************************************\
|==========================================|
|            Piece Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Invalid length for piece string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for piece string: '{0}', expected one of 'PNBRQKpnbrqk'")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_parts() {
        assert_eq!(Piece::WhitePawn.pt(), PieceType::Pawn);
        assert_eq!(Piece::BlackQueen.pt(), PieceType::Queen);
        assert_eq!(Piece::WhiteKing.colour(), Colour::White);
        assert_eq!(Piece::BlackKnight.colour(), Colour::Black);
    }

    #[test]
    fn test_piece_conversion_roundtrip() {
        for piece in Piece::iter() {
            let reconstructed = Piece::from_parts(piece.colour(), piece.pt());
            assert_eq!(piece, reconstructed);
            assert_eq!(Piece::from_char(piece.notation()), Ok(piece));
        }
    }

    #[test]
    fn test_notation_case_encodes_side() {
        assert_eq!(Piece::WhiteRook.notation(), 'R');
        assert_eq!(Piece::BlackRook.notation(), 'r');
        assert_eq!(PieceType::Knight.to_string(), "n");
    }

    #[test]
    fn test_piece_from_str_invalid() {
        assert!(matches!(
            "".parse::<Piece>(),
            Err(ParsePieceError::InvalidLength(0))
        ));
        assert!(matches!(
            "Pn".parse::<Piece>(),
            Err(ParsePieceError::InvalidLength(2))
        ));
        assert!(matches!(
            "X".parse::<Piece>(),
            Err(ParsePieceError::InvalidChar('X'))
        ));
        assert!(matches!(
            "1".parse::<Piece>(),
            Err(ParsePieceError::InvalidChar('1'))
        ));
    }

    #[test]
    fn test_letters() {
        assert_eq!(PieceType::from_letter('N'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_letter('n'), None);
        assert!(PieceType::Queen.is_slider());
        assert!(!PieceType::King.is_slider());
    }
}
