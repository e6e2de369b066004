use std::str::FromStr;

use crate::core::*;

/******************************************\
|==========================================|
|                Move Token                |
|==========================================|
\******************************************/

/// # Move token
///
/// A short algebraic move, resolved against the board later on.
///
/// - `e4`: pawn to e4
/// - `exd5`, `ed5`: the pawn on the e-file to d5
/// - `Nf3`, `Nxf3+`: a knight to f3
/// - `Nbd7`, `R1e2`: a knight on the b-file, a rook on rank 1
/// - `O-O`, `O-O-O` (also with zeros)
///
/// `x`, `+` and `#` carry no meaning and are dropped. A trailing `=Q` is accepted, promotion is
/// always to a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Castle(CastleSide),

    Move {
        piece: PieceType,
        from: Disambiguator,
        to: Square,
    },
}

/// Narrows which of several pieces of the same kind is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disambiguator {
    #[default]
    Any,
    File(File),
    Rank(Rank),
}

impl Disambiguator {
    #[inline]
    pub fn matches(self, square: Square) -> bool {
        match self {
            Disambiguator::Any => true,
            Disambiguator::File(file) => square.file() == file,
            Disambiguator::Rank(rank) => square.rank() == rank,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        File::from_char(c)
            .map(Disambiguator::File)
            .or_else(|_| Rank::from_char(c).map(Disambiguator::Rank))
            .ok()
    }
}

/******************************************\
|==========================================|
|               Parse Token                |
|==========================================|
\******************************************/

impl FromStr for MoveToken {
    type Err = NotationError;

    /// ## Examples
    ///
    /// ```
    /// use chess_rules::core::{CastleSide, PieceType, Square};
    /// use chess_rules::game::{Disambiguator, MoveToken};
    ///
    /// assert_eq!("O-O".parse(), Ok(MoveToken::Castle(CastleSide::Short)));
    /// assert_eq!(
    ///     "Nxf3+".parse(),
    ///     Ok(MoveToken::Move { piece: PieceType::Knight, from: Disambiguator::Any, to: Square::F3 })
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['+', '#']);

        match trimmed {
            "O-O" | "0-0" => return Ok(MoveToken::Castle(CastleSide::Short)),
            "O-O-O" | "0-0-0" => return Ok(MoveToken::Castle(CastleSide::Long)),
            _ => {}
        }

        let body = match trimmed.split_once('=') {
            Some((body, "Q")) => body,
            Some((_, "N" | "B" | "R")) => return Err(NotationError::UnsupportedPromotion),
            Some(_) => return Err(NotationError::Malformed),
            None => trimmed,
        };

        let chars: Vec<char> = body.chars().filter(|&c| c != 'x').collect();

        let (piece, from, dest) = match chars.as_slice() {
            [dest @ ..] if dest.len() == 2 => (PieceType::Pawn, Disambiguator::Any, dest),
            [lead, dest @ ..] if dest.len() == 2 => match PieceType::from_letter(*lead) {
                Some(piece) => (piece, Disambiguator::Any, dest),
                None => {
                    let from = Disambiguator::from_char(*lead).ok_or(NotationError::Malformed)?;
                    (PieceType::Pawn, from, dest)
                }
            },
            [letter, hint, dest @ ..] if dest.len() == 2 => {
                let piece = PieceType::from_letter(*letter).ok_or(NotationError::Malformed)?;
                let from = Disambiguator::from_char(*hint).ok_or(NotationError::Malformed)?;
                (piece, from, dest)
            }
            _ => return Err(NotationError::Malformed),
        };

        let to = parse_destination(dest)?;

        Ok(MoveToken::Move { piece, from, to })
    }
}

fn parse_destination(dest: &[char]) -> Result<Square, NotationError> {
    let [file, rank] = dest else {
        return Err(NotationError::Malformed);
    };

    let file = File::from_char(*file).map_err(|_| NotationError::OutOfBounds)?;
    let rank = Rank::from_char(*rank).map_err(|_| NotationError::OutOfBounds)?;

    Ok(Square::from_parts(file, rank))
}

/******************************************\
|==========================================|
|                Movetext                  |
|==========================================|
\******************************************/

/// Splits movetext into move tokens, dropping move numbers and result markers.
///
/// ## Examples
///
/// ```
/// use chess_rules::game::movetext_tokens;
///
/// let tokens: Vec<&str> = movetext_tokens("1. e4 e5 2.Nf3 Nc6 3... a6 1-0").collect();
/// assert_eq!(tokens, ["e4", "e5", "Nf3", "Nc6", "a6"]);
/// ```
pub fn movetext_tokens(movetext: &str) -> impl Iterator<Item = &str> {
    movetext
        .split_whitespace()
        .map(|word| match word.rfind('.') {
            Some(dot) => &word[dot + 1..],
            None => word,
        })
        .filter(|token| !token.is_empty() && !is_result_marker(token))
}

fn is_result_marker(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
