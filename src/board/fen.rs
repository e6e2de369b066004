use thiserror::Error;

use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// A fully parsed position: the board plus the two turn fields the board does not own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,

    pub stm: Colour,

    pub full_moves: u16,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            board: Board::default(),
            stm: Colour::White,
            full_moves: 1,
        }
    }
}

impl Position {
    /// Serializes all six fields
    pub fn fen(&self) -> String {
        self.board.fen(self.stm, self.full_moves)
    }
}

impl std::str::FromStr for Position {
    type Err = FenParseError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Position::parse(fen)
    }
}

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Position {
    /// Parses a six field position string.
    ///
    /// Castling rights decide which kings and corner rooks start out unmoved, so the castling
    /// field written back by [`Position::fen`] is the one that was read.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::board::{Position, START_FEN};
    ///
    /// let position = Position::parse(START_FEN).unwrap();
    /// assert_eq!(position.fen(), START_FEN);
    /// ```
    pub fn parse(fen: &str) -> Result<Self, FenParseError> {
        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let placed = parse_piece_placement(piece_placement)?;
        check_kings(&placed)?;

        let side_to_move = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let stm = parse_side_to_move(side_to_move)?;

        let castling = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let rights = parse_castling(castling, &placed)?;

        let mut board = Board::assemble(&placed, rights);

        let enpassant = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.set_enpassant(parse_enpassant(enpassant, &board, stm)?);

        let fifty_move_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.set_fifty_move(parse_fifty_move(fifty_move_token)?);

        let full_move_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let full_moves = parse_full_move(full_move_token)?;

        if parts.next().is_some() {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        let waiting_king = board.king(!stm).square;
        if !board.attackers_to(waiting_king, stm).is_empty() {
            return Err(FenParseError::OpponentInCheck(!stm));
        }

        Ok(Position {
            board,
            stm,
            full_moves,
        })
    }
}

impl Board {
    /// Builds a board from the placement field alone.
    ///
    /// Every castling right whose king and rook stand on their home squares is assumed.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::board::{Board, START_PLACEMENT};
    /// use chess_rules::core::Castling;
    ///
    /// let board = Board::from_placement(START_PLACEMENT).unwrap();
    /// assert_eq!(board.castling(), Castling::ALL);
    /// ```
    pub fn from_placement(piece_placement: &str) -> Result<Self, FenParseError> {
        let placed = parse_piece_placement(piece_placement)?;
        check_kings(&placed)?;

        let mut rights = Castling::NONE;
        for colour in Colour::iter() {
            for side in [CastleSide::Short, CastleSide::Long] {
                if castling_pieces_home(&placed, colour, side) {
                    rights.set(Castling::right(colour, side));
                }
            }
        }

        Ok(Board::assemble(&placed, rights))
    }

    /// Serializes the placement field, rank 8 first
    pub fn placement(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.piece.notation());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen
    }

    /// Serializes all six fields, given the turn fields kept outside the board
    pub fn fen(&self, stm: Colour, full_moves: u16) -> String {
        let mut fen = self.placement();

        fen.push(' ');
        fen.push(match stm {
            Colour::White => 'w',
            Colour::Black => 'b',
        });

        fen.push_str(&format!(" {}", self.castling()));

        fen.push(' ');
        match self.enpassant() {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {}", self.fifty_move()));

        fen.push_str(&format!(" {}", full_moves));

        fen
    }
}

/******************************************\
|==========================================|
|              Field Parsers               |
|==========================================|
\******************************************/

fn parse_separator(
    rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
    rank: Rank,
    file: u8,
) -> Result<(Rank, u8), FenParseError> {
    if file != 8 {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
            rank, file
        )));
    }

    let next_rank = rank_iter.next().ok_or_else(|| {
        FenParseError::InvalidRankFormat(format!(
            "Too many rank separators ('/') found after completing rank {:?}",
            rank
        ))
    })?;

    Ok((next_rank, 0))
}

fn parse_skip(
    skip: char,
    idx: usize,
    current_rank: Rank,
    current_file_index: u8,
) -> Result<u8, FenParseError> {
    let skip_val = skip.to_digit(10).unwrap_or(0);

    if !(1..=8).contains(&skip_val) {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Invalid skip digit '{}' (must be 1-8) at char index {}",
            skip, idx
        )));
    }

    let skip_u8 = skip_val as u8;

    if current_file_index + skip_u8 > 8 {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Skip value {} exceeds rank length at file index {} on rank {:?}",
            skip_u8, current_file_index, current_rank
        )));
    }

    Ok(skip_u8)
}

fn parse_piece(piece: char, rank: Rank, file: u8) -> Result<(Piece, Square), FenParseError> {
    let current_file = File::try_from_index(file).ok_or_else(|| {
        FenParseError::InvalidRankFormat(format!(
            "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
            piece, rank
        ))
    })?;

    let piece_enum =
        Piece::from_char(piece).map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

    Ok((piece_enum, Square::from_parts(current_file, rank)))
}

fn parse_piece_placement(piece_placement: &str) -> Result<Vec<(Piece, Square)>, FenParseError> {
    let mut rank_iter = Rank::iter().rev();

    let mut rank = rank_iter
        .next()
        .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

    let mut file: u8 = 0;
    let mut placed = Vec::with_capacity(32);

    for (i, char) in piece_placement.chars().enumerate() {
        match char {
            '/' => {
                (rank, file) = parse_separator(&mut rank_iter, rank, file)?;
            }

            skip if skip.is_ascii_digit() => {
                file += parse_skip(skip, i, rank, file)?;
            }

            piece_char => {
                placed.push(parse_piece(piece_char, rank, file)?);
                file += 1;
            }
        }
    }

    if file != 8 {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Final rank {:?} ended prematurely at file index {} (expected 8)",
            rank, file
        )));
    }

    if rank_iter.next().is_some() {
        return Err(FenParseError::InvalidRankFormat(
            "Not enough ranks specified in FEN string (expected 8)".to_string(),
        ));
    }

    Ok(placed)
}

fn check_kings(placed: &[(Piece, Square)]) -> Result<(), FenParseError> {
    for colour in Colour::iter() {
        let king = Piece::from_parts(colour, PieceType::King);
        let count = placed.iter().filter(|(piece, _)| *piece == king).count();

        if count != 1 {
            return Err(FenParseError::InvalidKingCount { colour, count });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_to_move: &str) -> Result<Colour, FenParseError> {
    match side_to_move {
        "w" => Ok(Colour::White),
        "b" => Ok(Colour::Black),
        _ => Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
    }
}

/// Whether the king and the corner rook of a castling right stand on their home squares
fn castling_pieces_home(placed: &[(Piece, Square)], colour: Colour, side: CastleSide) -> bool {
    let home = colour.home_rank();
    let king = (
        Piece::from_parts(colour, PieceType::King),
        Square::from_parts(File::FileE, home),
    );
    let rook = (
        Piece::from_parts(colour, PieceType::Rook),
        Square::from_parts(side.rook_from(), home),
    );

    placed.contains(&king) && placed.contains(&rook)
}

fn parse_castling(castling: &str, placed: &[(Piece, Square)]) -> Result<Castling, FenParseError> {
    let mut rights = Castling::NONE;

    if castling == "-" {
        return Ok(rights);
    }

    for c in castling.chars() {
        let (colour, side) = match c {
            'K' => (Colour::White, CastleSide::Short),
            'Q' => (Colour::White, CastleSide::Long),
            'k' => (Colour::Black, CastleSide::Short),
            'q' => (Colour::Black, CastleSide::Long),
            _ => return Err(FenParseError::InvalidCastlingChar(c)),
        };

        if !castling_pieces_home(placed, colour, side) {
            return Err(FenParseError::CastlingWithoutPieces(c));
        }

        rights.set(Castling::right(colour, side));
    }

    Ok(rights)
}

fn parse_enpassant(
    enpassant: &str,
    board: &Board,
    stm: Colour,
) -> Result<Option<Square>, FenParseError> {
    if enpassant == "-" {
        return Ok(None);
    }

    let square = enpassant
        .parse::<Square>()
        .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?;

    if square.rank() != stm.ep_capture_rank() {
        return Err(FenParseError::InvalidEnPassantSquare(format!(
            "{square} is not a valid enpassant square for {stm} to move"
        )));
    }

    let pushed_pawn = square
        .offset(0, -stm.forward())
        .and_then(|behind| board.on(behind))
        .map(|p| p.piece);

    if board.on(square).is_some() || pushed_pawn != Some(Piece::from_parts(!stm, PieceType::Pawn)) {
        return Err(FenParseError::InvalidEnPassantSquare(format!(
            "{square} does not follow a two square pawn advance"
        )));
    }

    Ok(Some(square))
}

fn parse_fifty_move(fifty_move_token: &str) -> Result<u16, FenParseError> {
    fifty_move_token
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()))
}

fn parse_full_move(full_move_token: &str) -> Result<u16, FenParseError> {
    let full_move_number = full_move_token
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

    if full_move_number == 0 {
        return Err(FenParseError::InvalidFullmoveNumber(format!(
            "Fullmove number cannot be 0, found: {}",
            full_move_token
        )));
    }

    Ok(full_move_number)
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    #[error("FEN string must have 6 fields separated by spaces")]
    InvalidNumberOfFields,

    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    #[error("Castling right '{0}' needs its king and rook on their home squares")]
    CastlingWithoutPieces(char),

    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),

    #[error("Expected exactly one {colour} king, found {count}")]
    InvalidKingCount { colour: Colour, count: usize },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Colour),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_fen() {
        let position = Position::parse(START_FEN).unwrap();
        let board = &position.board;

        assert_eq!(board.on(Square::A1).map(|p| p.piece), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1).map(|p| p.piece), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::H8).map(|p| p.piece), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::D8).map(|p| p.piece), Some(Piece::BlackQueen));
        assert!(board.on(Square::E4).is_none());
        assert_eq!(position.stm, Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.enpassant(), None);
        assert_eq!(board.fifty_move(), 0);
        assert_eq!(position.full_moves, 1);
        assert_eq!(position.fen(), START_FEN);
        assert_eq!(position, Position::default());
    }

    #[test]
    fn test_start_placement_round_trip() {
        assert_eq!(Board::default().placement(), START_PLACEMENT);
        assert_eq!(Board::from_placement(START_PLACEMENT).unwrap(), Board::default());
    }

    #[test]
    fn test_parse_kiwipete_fen() {
        let position = Position::parse(KIWIPETE_FEN).unwrap();
        let board = &position.board;

        assert_eq!(board.on(Square::A8).map(|p| p.piece), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::E8).map(|p| p.piece), Some(Piece::BlackKing));
        assert_eq!(board.on(Square::F3).map(|p| p.piece), Some(Piece::WhiteQueen));
        assert_eq!(board.on(Square::H3).map(|p| p.piece), Some(Piece::BlackPawn));
        assert_eq!(board.castling(), Castling::ALL);
        assert!(board.is_consistent());
        assert_eq!(position.fen(), KIWIPETE_FEN);
    }

    #[test]
    fn test_moved_flags_from_fen() {
        let position = Position::parse("r3k2r/8/8/8/4P3/8/P7/R3K2R w Kq - 3 20").unwrap();
        let board = &position.board;

        assert!(!board.on(Square::A2).unwrap().has_moved);
        assert!(board.on(Square::E4).unwrap().has_moved);
        assert!(!board.on(Square::E1).unwrap().has_moved);
        assert!(!board.on(Square::H1).unwrap().has_moved);
        assert!(board.on(Square::A1).unwrap().has_moved);
        assert!(board.on(Square::H8).unwrap().has_moved);
        assert!(!board.on(Square::A8).unwrap().has_moved);
        assert_eq!(position.fen(), "r3k2r/8/8/8/4P3/8/P7/R3K2R w Kq - 3 20");
    }

    #[test]
    fn test_enpassant_field() {
        let fen = "rnbqkbnr/pppp1ppp/8/8/4p3/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1";
        assert!(matches!(
            Position::parse(fen),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));

        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let position = Position::parse(fen).unwrap();
        assert_eq!(position.board.enpassant(), Some(Square::E3));
        assert_eq!(position.fen(), fen);

        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e6 0 1";
        assert!(matches!(
            Position::parse(fen),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn test_fen_invalid_piece() {
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            Position::parse(fen),
            Err(FenParseError::InvalidPiecePlacementChar('x'))
        ));
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Position::parse(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_piece() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = Position::parse(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("attempted beyond file H")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digits() {
        for (fen, digit) in [
            ("rnbqkbnr/pppp0ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "'0'"),
            ("rnbqkbnr/pppp9ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "'9'"),
        ] {
            let result = Position::parse(fen);
            assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
            assert!(result.unwrap_err().to_string().contains(digit));
        }
    }

    #[test]
    fn test_fen_rank_count() {
        let result = Board::from_placement("8/8/8/8/8/8/8/8/8");
        assert!(result.unwrap_err().to_string().contains("Too many rank separators"));

        let result = Board::from_placement("8/8/8/8/8/8/8");
        assert!(result.unwrap_err().to_string().contains("Not enough ranks specified"));
    }

    #[test]
    fn test_fen_field_count() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
        assert_eq!(Position::parse(fen), Err(FenParseError::InvalidNumberOfFields));

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra";
        assert_eq!(Position::parse(fen), Err(FenParseError::InvalidNumberOfFields));
    }

    #[test]
    fn test_fen_scalar_fields() {
        let base = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

        assert_eq!(
            Position::parse(&format!("{base} x KQkq - 0 1")),
            Err(FenParseError::InvalidSideToMove("x".to_string()))
        );
        assert_eq!(
            Position::parse(&format!("{base} w KQxq - 0 1")),
            Err(FenParseError::InvalidCastlingChar('x'))
        );
        assert_eq!(
            Position::parse(&format!("{base} w KQkq - -1 1")),
            Err(FenParseError::InvalidHalfmoveClock("-1".to_string()))
        );
        assert!(matches!(
            Position::parse(&format!("{base} w KQkq - 0 0")),
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn test_fen_king_count() {
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/4K3"),
            Err(FenParseError::InvalidKingCount {
                colour: Colour::Black,
                count: 0
            })
        );
        assert_eq!(
            Board::from_placement("4k3/8/8/8/8/8/8/3KK3"),
            Err(FenParseError::InvalidKingCount {
                colour: Colour::White,
                count: 2
            })
        );
    }

    #[test]
    fn test_fen_castling_needs_pieces() {
        assert_eq!(
            Position::parse("4k3/8/8/8/8/8/8/4K2R w Q - 0 1"),
            Err(FenParseError::CastlingWithoutPieces('Q'))
        );
        assert!(Position::parse("4k3/8/8/8/8/8/8/4K2R w K - 0 1").is_ok());
    }

    #[test]
    fn test_fen_opponent_in_check() {
        assert_eq!(
            Position::parse("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1"),
            Err(FenParseError::OpponentInCheck(Colour::Black))
        );
        assert!(Position::parse("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").is_ok());
    }
}
