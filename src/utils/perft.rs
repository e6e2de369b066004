use crate::arbiter::Arbiter;
use crate::board::{Board, PieceId};
use crate::core::*;

/// Counts the leaf nodes of the legal move tree, `depth` plies deep.
///
/// Every move is played on a fresh clone of the board. Castling is included and promotions
/// count once, as a queen.
pub fn perft(board: &Board, stm: Colour, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    perft_divide(board, stm, depth)
        .into_iter()
        .map(|(_, nodes)| nodes)
        .sum()
}

/// Node counts below each root move, labelled `e2e4` or `O-O`
pub fn perft_divide(board: &Board, stm: Colour, depth: usize) -> Vec<(String, usize)> {
    let mut divide = Vec::new();
    if depth == 0 {
        return divide;
    }

    let mut scratch = board.clone();
    let mut arbiter = Arbiter::new(&mut scratch);
    let ids: Vec<PieceId> = board.pieces(stm).map(|p| p.id).collect();

    for id in ids {
        let Some(from) = board.piece(id).map(|p| p.square) else {
            continue;
        };

        for to in arbiter.legal_moves(id) {
            let mut next = board.clone();
            if Arbiter::new(&mut next).attempt_move(id, to).is_ok() {
                divide.push((format!("{from}{to}"), perft(&next, !stm, depth - 1)));
            }
        }
    }

    for side in arbiter.castle_moves(stm) {
        let mut next = board.clone();
        if Arbiter::new(&mut next).castle(stm, side).is_ok() {
            let label = match side {
                CastleSide::Short => "O-O",
                CastleSide::Long => "O-O-O",
            };
            divide.push((label.to_string(), perft(&next, !stm, depth - 1)));
        }
    }

    divide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{KIWIPETE_FEN, Position};

    fn perft_fen(fen: &str, depth: usize) -> usize {
        let position = Position::parse(fen).unwrap();
        perft(&position.board, position.stm, depth)
    }

    #[test]
    fn test_perft_start_position() {
        let board = Board::default();

        assert_eq!(perft(&board, Colour::White, 0), 1);
        assert_eq!(perft(&board, Colour::White, 1), 20);
        assert_eq!(perft(&board, Colour::White, 2), 400);
    }

    #[test]
    fn test_perft_kiwipete() {
        assert_eq!(perft_fen(KIWIPETE_FEN, 1), 48);
    }

    #[test]
    fn test_perft_enpassant_pin() {
        // b5xc6 en passant would open the fifth rank to the rook on h5
        assert_eq!(perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 1), 14);
        assert_eq!(perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 2), 191);
    }

    #[test]
    fn test_perft_divide_labels() {
        let divide = perft_divide(&Board::default(), Colour::White, 1);

        assert_eq!(divide.len(), 20);
        assert!(divide.contains(&("e2e4".to_string(), 1)));
        assert!(divide.contains(&("g1f3".to_string(), 1)));

        let position = Position::parse(KIWIPETE_FEN).unwrap();
        let divide = perft_divide(&position.board, position.stm, 1);
        assert!(divide.contains(&("O-O".to_string(), 1)));
        assert!(divide.contains(&("O-O-O".to_string(), 1)));
    }
}
