use crate::board::Board;
use crate::core::*;

/******************************************\
|==========================================|
|          Insufficient Material           |
|==========================================|
\******************************************/

/// Whether neither side can possibly deliver mate.
///
/// True for king against king, a lone minor piece against a bare king, and opposing bishops
/// standing on squares of the same colour.
pub fn insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();

    for colour in [Colour::White, Colour::Black] {
        for piece in board.pieces(colour) {
            match piece.pt() {
                PieceType::King => {}
                PieceType::Knight | PieceType::Bishop => minors.push(*piece),
                _ => return false,
            }
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [a, b] => {
            a.pt() == PieceType::Bishop
                && b.pt() == PieceType::Bishop
                && a.colour() != b.colour()
                && a.square.is_light() == b.square.is_light()
        }
        _ => false,
    }
}

/******************************************\
|==========================================|
|            Repetition Key                |
|==========================================|
\******************************************/

/// The parts of a position that must match for it to count as repeated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    placement: String,
    stm: Colour,
    castling: Castling,
    enpassant: Option<Square>,
}

impl RepetitionKey {
    pub fn new(board: &Board, stm: Colour) -> Self {
        Self {
            placement: board.placement(),
            stm,
            castling: board.castling(),
            enpassant: board.enpassant(),
        }
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

    fn material(placement: &str) -> bool {
        insufficient_material(&Board::from_placement(placement).unwrap())
    }

    #[test]
    fn test_insufficient_material() {
        assert!(material("4k3/8/8/8/8/8/8/4K3"));
        assert!(material("4k3/8/8/8/8/8/8/4KN2"));
        assert!(material("4kb2/8/8/8/8/8/8/4K3"));
        // f8 and c1 are both dark
        assert!(material("4kb2/8/8/8/8/8/8/2B1K3"));
    }

    #[test]
    fn test_sufficient_material() {
        assert!(!material("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"));
        assert!(!material("4k3/8/8/8/8/8/4P3/4K3"));
        assert!(!material("4k3/8/8/8/8/8/8/3RK3"));
        assert!(!material("4k3/8/8/8/8/8/8/2NNK3"));
        // f8 is dark, f1 is light
        assert!(!material("4kb2/8/8/8/8/8/8/4KB2"));
        assert!(!material("4kn2/8/8/8/8/8/8/4KB2"));
    }

    #[test]
    fn test_repetition_key() {
        let board = Board::default();
        let mut moved = board.clone();
        moved.set_enpassant(Some(Square::E3));

        assert_eq!(
            RepetitionKey::new(&board, Colour::White),
            RepetitionKey::new(&board.clone(), Colour::White)
        );
        assert_ne!(
            RepetitionKey::new(&board, Colour::White),
            RepetitionKey::new(&board, Colour::Black)
        );
        assert_ne!(
            RepetitionKey::new(&board, Colour::Black),
            RepetitionKey::new(&moved, Colour::Black)
        );
    }
}
