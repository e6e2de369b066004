pub mod fen;
pub mod geometry;
pub mod simulate;

pub use fen::{FenParseError, KIWIPETE_FEN, Position, START_FEN, START_PLACEMENT};
pub use simulate::Simulation;

use std::collections::BTreeMap;

use crate::core::*;

/******************************************\
|==========================================|
|                 Piece Id                 |
|==========================================|
\******************************************/

/// Stable identity of a piece for the lifetime of a board
///
/// Ids are handed out in placement order when a board is built and never reused.
/// A promoted pawn keeps its id, so lookups made before the promotion stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub(crate) u16);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/******************************************\
|==========================================|
|               Board Piece                |
|==========================================|
\******************************************/

/// A piece standing on the board, together with the state the rules care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPiece {
    pub id: PieceId,

    pub piece: Piece,

    pub square: Square,

    /// Set once the piece has left its square; gates pawn double steps and castling
    pub has_moved: bool,
}

impl BoardPiece {
    #[inline]
    pub fn colour(&self) -> Colour {
        self.piece.colour()
    }

    #[inline]
    pub fn pt(&self) -> PieceType {
        self.piece.pt()
    }
}

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// # Board representation
///
/// - `grid` maps every square to the id of the piece standing on it
/// - `pieces` owns the live pieces of each side, keyed and ordered by id
/// - `kings` holds the id of each side's king, kings are never removed
///
/// Outside of a [`Simulation`] the grid and the collections describe exactly the same set of
/// pieces. Inside one, only the grid changes, and a piece counts as live iff the grid still
/// points back at it from its recorded square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<PieceId>; Square::NUM],

    pieces: [BTreeMap<PieceId, BoardPiece>; Colour::NUM],

    kings: [PieceId; Colour::NUM],

    enpassant: Option<Square>,

    fifty_move: u16,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    /// The standard starting position
    fn default() -> Board {
        use PieceType::*;
        const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        // Same order as reading the placement field: rank 8 first, a to h
        let mut placed = Vec::with_capacity(32);
        for colour in [Colour::Black, Colour::White] {
            let back = File::iter()
                .zip(BACK_RANK)
                .map(|(file, pt)| (Piece::from_parts(colour, pt), Square::from_parts(file, colour.home_rank())));
            let pawns = File::iter().map(|file| {
                (Piece::from_parts(colour, Pawn), Square::from_parts(file, colour.pawn_rank()))
            });

            match colour {
                Colour::Black => placed.extend(back.chain(pawns)),
                Colour::White => placed.extend(pawns.chain(back)),
            }
        }

        Board::assemble(&placed, Castling::ALL)
    }
}

impl Board {
    /// Builds a board from a list of placed pieces; the list must hold exactly one king per side.
    ///
    /// `rights` decides which kings and corner rooks count as unmoved.
    pub(crate) fn assemble(placed: &[(Piece, Square)], rights: Castling) -> Board {
        let mut grid = [None; Square::NUM];
        let mut pieces: [BTreeMap<PieceId, BoardPiece>; Colour::NUM] = Default::default();
        let mut kings = [PieceId(0); Colour::NUM];

        for (index, &(piece, square)) in placed.iter().enumerate() {
            let id = PieceId(index as u16);
            let colour = piece.colour();

            let unmoved = match piece.pt() {
                PieceType::Pawn => square.rank() == colour.pawn_rank(),
                PieceType::King => {
                    square == Square::from_parts(File::FileE, colour.home_rank())
                        && rights.has(Castling::for_colour(colour))
                }
                PieceType::Rook => [CastleSide::Short, CastleSide::Long].iter().any(|&side| {
                    square == Square::from_parts(side.rook_from(), colour.home_rank())
                        && rights.has(Castling::right(colour, side))
                }),
                _ => true,
            };

            if piece.pt() == PieceType::King {
                kings[colour.index()] = id;
            }

            grid[square.index()] = Some(id);
            pieces[colour.index()].insert(
                id,
                BoardPiece {
                    id,
                    piece,
                    square,
                    has_moved: !unmoved,
                },
            );
        }

        Board {
            grid,
            pieces,
            kings,
            enpassant: None,
            fifty_move: 0,
        }
    }

    /// Returns the piece on a square
    #[inline]
    pub fn on(&self, square: Square) -> Option<&BoardPiece> {
        self.grid[square.index()].and_then(|id| self.piece(id))
    }

    /// Returns the id on a square, without resolving it
    #[inline]
    pub fn id_on(&self, square: Square) -> Option<PieceId> {
        self.grid[square.index()]
    }

    /// Looks up a piece by identity, in either side's collection
    pub fn piece(&self, id: PieceId) -> Option<&BoardPiece> {
        self.pieces[Colour::White.index()]
            .get(&id)
            .or_else(|| self.pieces[Colour::Black.index()].get(&id))
    }

    /// Iterates the pieces of one side in id order
    pub fn pieces(&self, colour: Colour) -> impl Iterator<Item = &BoardPiece> {
        self.pieces[colour.index()].values()
    }

    /// Iterates the pieces of one side that the grid still points at
    pub fn live_pieces(&self, colour: Colour) -> impl Iterator<Item = &BoardPiece> {
        self.pieces(colour)
            .filter(|p| self.grid[p.square.index()] == Some(p.id))
    }

    /// Returns the king of one side
    #[inline]
    pub fn king(&self, colour: Colour) -> &BoardPiece {
        &self.pieces[colour.index()][&self.kings[colour.index()]]
    }

    #[inline]
    pub fn is_king(&self, id: PieceId) -> bool {
        self.kings.contains(&id)
    }

    #[inline]
    pub fn enpassant(&self) -> Option<Square> {
        self.enpassant
    }

    /// Plies since the last capture or pawn move
    #[inline]
    pub fn fifty_move(&self) -> u16 {
        self.fifty_move
    }

    /// Castling availability, derived from whether each king and corner rook has moved
    pub fn castling(&self) -> Castling {
        let mut rights = Castling::NONE;

        for colour in Colour::iter() {
            let king = self.king(colour);
            let home = colour.home_rank();

            if king.has_moved || king.square != Square::from_parts(File::FileE, home) {
                continue;
            }

            for side in [CastleSide::Short, CastleSide::Long] {
                let corner = Square::from_parts(side.rook_from(), home);
                let unmoved_rook = self.on(corner).is_some_and(|rook| {
                    rook.piece == Piece::from_parts(colour, PieceType::Rook) && !rook.has_moved
                });

                if unmoved_rook {
                    rights.set(Castling::right(colour, side));
                }
            }
        }

        rights
    }

    /// Checks that the grid and the piece collections describe the same position
    pub fn is_consistent(&self) -> bool {
        let occupied = self.grid.iter().filter(|id| id.is_some()).count();
        let total: usize = self.pieces.iter().map(|side| side.len()).sum();

        let kings_present = Colour::iter().all(|c| {
            self.pieces[c.index()]
                .get(&self.kings[c.index()])
                .is_some_and(|k| k.piece == Piece::from_parts(c, PieceType::King))
        });

        occupied == total
            && kings_present
            && Colour::iter().all(|c| {
                self.pieces[c.index()].values().all(|p| {
                    p.colour() == c && self.grid[p.square.index()] == Some(p.id)
                })
            })
    }
}

/******************************************\
|==========================================|
|                 Mutation                 |
|==========================================|
\******************************************/

impl Board {
    /// Removes the piece on a square from the grid and from its collection
    pub(crate) fn take(&mut self, square: Square) -> Option<BoardPiece> {
        let id = self.grid[square.index()].take()?;
        let colour = self.piece(id)?.colour();
        self.pieces[colour.index()].remove(&id)
    }

    /// Moves a piece to an empty square and marks it as moved
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let Some(colour) = self.piece(id).map(BoardPiece::colour) else {
            return;
        };

        if let Some(piece) = self.pieces[colour.index()].get_mut(&id) {
            self.grid[piece.square.index()] = None;
            self.grid[to.index()] = Some(id);
            piece.square = to;
            piece.has_moved = true;
        }
    }

    /// Replaces the kind of a piece in place, keeping its id and square
    pub(crate) fn promote(&mut self, id: PieceId, pt: PieceType) {
        for side in self.pieces.iter_mut() {
            if let Some(piece) = side.get_mut(&id) {
                piece.piece = Piece::from_parts(piece.colour(), pt);
            }
        }
    }

    pub(crate) fn set_enpassant(&mut self, square: Option<Square>) {
        self.enpassant = square;
    }

    pub(crate) fn set_fifty_move(&mut self, fifty_move: u16) {
        self.fifty_move = fifty_move;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.piece.to_string(),
                    None => " ".to_string(),
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Castling: {}", self.castling())?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Half Move Clock: {}", self.fifty_move)?;
        writeln!(f, "Placement: {}", self.placement())?;

        Ok(())
    }
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
    fn test_default_board() {
        let board = Board::default();

        assert!(board.is_consistent());
        assert_eq!(board.pieces(Colour::White).count(), 16);
        assert_eq!(board.pieces(Colour::Black).count(), 16);
        assert_eq!(board.king(Colour::White).square, Square::E1);
        assert_eq!(board.king(Colour::Black).square, Square::E8);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.enpassant(), None);
        assert_eq!(board.fifty_move(), 0);
    }

    #[test]
    fn test_ids_follow_placement_order() {
        let board = Board::default();
        let ids: Vec<PieceId> = board.pieces(Colour::Black).map(|p| p.id).collect();

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(board.on(Square::A8).map(|p| p.id), Some(PieceId(0)));
    }

    #[test]
    fn test_take_and_relocate() {
        let mut board = Board::default();

        let taken = board.take(Square::D7).map(|p| p.piece);
        assert_eq!(taken, Some(Piece::BlackPawn));
        assert!(board.on(Square::D7).is_none());
        assert!(board.is_consistent());

        let id = board.id_on(Square::E2).unwrap();
        board.relocate(id, Square::E4);
        let pawn = board.piece(id).unwrap();
        assert_eq!(pawn.square, Square::E4);
        assert!(pawn.has_moved);
        assert!(board.on(Square::E2).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_promote_keeps_identity() {
        let mut board = Board::default();
        let id = board.id_on(Square::A2).unwrap();

        board.promote(id, PieceType::Queen);

        let queen = board.piece(id).unwrap();
        assert_eq!(queen.piece, Piece::WhiteQueen);
        assert_eq!(queen.square, Square::A2);
        assert_eq!(board.pieces(Colour::White).count(), 16);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_castling_follows_moved_flags() {
        let mut board = Board::default();

        let rook = board.id_on(Square::H1).unwrap();
        board.take(Square::G1);
        board.relocate(rook, Square::G1);
        assert_eq!(board.castling(), Castling::WQ | Castling::BLACK_CASTLING);

        let king = board.king(Colour::Black).id;
        board.take(Square::E7);
        board.relocate(king, Square::E7);
        assert_eq!(board.castling(), Castling::WQ);
    }
}
