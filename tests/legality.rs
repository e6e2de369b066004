use chess_rules::arbiter::Arbiter;
use chess_rules::board::{Board, KIWIPETE_FEN, PieceId, Position};
use chess_rules::core::*;
use chess_rules::utils::{PRNG, perft};

/// Every legal move of `stm`, as (piece, destination)
fn all_legal_moves(board: &Board, stm: Colour) -> Vec<(PieceId, Square)> {
    let mut scratch = board.clone();
    let mut arbiter = Arbiter::new(&mut scratch);
    let ids: Vec<PieceId> = board.pieces(stm).map(|p| p.id).collect();

    ids.into_iter()
        .flat_map(|id| {
            arbiter
                .legal_moves(id)
                .into_iter()
                .map(move |to| (id, to))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn assert_moves_are_safe(board: &Board, stm: Colour) {
    for piece in board.pieces(stm) {
        let mut scratch = board.clone();
        let legal = Arbiter::new(&mut scratch).legal_moves(piece.id);

        for to in board.pseudo_legal_moves(piece) {
            let mut next = board.clone();
            let result = Arbiter::new(&mut next).attempt_move(piece.id, to);

            if legal.contains(&to) {
                assert!(result.is_ok(), "{} {}{to} refused: {result:?}", piece.piece, piece.square);
                assert!(
                    !Arbiter::new(&mut next).in_check(stm),
                    "{} {}{to} leaves the king attacked in {}",
                    piece.piece,
                    piece.square,
                    board.fen(stm, 1)
                );
                assert!(next.is_consistent());
            } else {
                assert!(result.is_err(), "{} {}{to} accepted", piece.piece, piece.square);
                assert_eq!(&next, board);
            }
        }
    }
}

#[test]
fn test_random_playouts_never_expose_the_king() {
    let mut seeder = PRNG::default();

    for _ in 0..12 {
        let mut prng = PRNG::new(seeder.random_u64());
        let mut board = Board::default();
        let mut stm = Colour::White;

        for ply in 0..80u16 {
            assert_moves_are_safe(&board, stm);

            let fen = board.fen(stm, ply / 2 + 1);
            let reparsed = Position::parse(&fen).unwrap();
            assert_eq!(reparsed.fen(), fen);

            let moves = all_legal_moves(&board, stm);
            let Some(&(id, to)) = prng.pick(&moves) else {
                break;
            };

            Arbiter::new(&mut board).attempt_move(id, to).unwrap();
            stm = !stm;
        }
    }
}

#[test]
fn test_queries_restore_the_board() {
    let mut board = Position::parse(KIWIPETE_FEN).unwrap().board;
    let before = board.clone();
    let mut arbiter = Arbiter::new(&mut board);

    for colour in [Colour::White, Colour::Black] {
        let ids: Vec<PieceId> = arbiter.board().pieces(colour).map(|p| p.id).collect();
        for id in ids {
            arbiter.legal_moves(id);
        }
        arbiter.castle_moves(colour);
        arbiter.is_checkmate(colour);
        arbiter.is_stalemate(colour);
        for square in Square::iter() {
            arbiter.is_attacked(square, colour);
        }
    }

    assert_eq!(board, before);
}

#[test]
fn test_perft_start_position() {
    let board = Board::default();

    assert_eq!(perft(&board, Colour::White, 1), 20);
    assert_eq!(perft(&board, Colour::White, 2), 400);
    assert_eq!(perft(&board, Colour::White, 3), 8902);
}

#[test]
fn test_perft_kiwipete() {
    let position = Position::parse(KIWIPETE_FEN).unwrap();

    assert_eq!(perft(&position.board, position.stm, 1), 48);
    assert_eq!(perft(&position.board, position.stm, 2), 2039);
}
