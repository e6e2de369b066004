use chess_rules::board::START_PLACEMENT;
use chess_rules::core::*;
use chess_rules::game::{DrawReason, Game, Outcome, PlayError, Termination};

#[test]
fn test_fresh_game_placement() {
    let game = Game::new();

    assert_eq!(game.board().placement(), START_PLACEMENT);
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::new();

    let results = game.play_movetext("1. e4 f5 2. f4 g5 3. Qh5#");
    let codes: Vec<u8> = results
        .iter()
        .map(|r| r.as_ref().map(|o| o.code()).unwrap())
        .collect();

    assert_eq!(codes, [0, 0, 0, 0, 1]);
    assert!(game.has_ended());
    assert_eq!(
        game.termination(),
        Some(Termination::Checkmate { winner: Colour::White })
    );

    assert_eq!(game.play("a6"), Err(PlayError::GameEnded));
    assert_eq!(PlayError::GameEnded.to_string(), "Game has already ended.");
}

#[test]
fn test_movetext_stops_after_mate() {
    let mut game = Game::new();

    let results = game.play_movetext("1. e4 f5 2. f4 g5 3. Qh5# a6 4. a3");

    assert_eq!(results.len(), 5);
    assert_eq!(game.history().len(), 5);
}

#[test]
fn test_movetext_continues_past_rejections() {
    let mut game = Game::new();

    let results = game.play_movetext("1. e4 e4 2. e5 d5");

    assert_eq!(results[0], Ok(Outcome::Continue));
    assert!(results[1].is_err());
    assert_eq!(results[2], Ok(Outcome::Continue));
    assert!(results[3].is_err());
    assert_eq!(game.history(), ["e4", "e5"]);
}

#[test]
fn test_enpassant_expires() {
    let mut game = Game::new();
    for token in ["e4", "a6", "e5", "d5"] {
        assert_eq!(game.play(token), Ok(Outcome::Continue));
    }

    // Taking right away is allowed
    let mut now = game.clone();
    assert_eq!(now.play("exd6"), Ok(Outcome::Continue));
    assert!(now.board().on(Square::D5).is_none());
    assert_eq!(
        now.board().on(Square::D6).map(|p| p.piece),
        Some(Piece::WhitePawn)
    );

    // One move pair later the target is gone
    assert_eq!(game.play("Nf3"), Ok(Outcome::Continue));
    assert_eq!(game.play("a5"), Ok(Outcome::Continue));
    assert_eq!(
        game.play("exd6"),
        Err(PlayError::Notation(NotationError::NoPath))
    );
}

#[test]
fn test_castling_rights_and_attacks() {
    let mut game = Game::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    assert!(game.fen().contains(" KQkq "));

    assert_eq!(game.play("O-O"), Ok(Outcome::Continue));
    assert_eq!(game.play("0-0-0"), Ok(Outcome::Continue));
    assert_eq!(
        game.fen(),
        "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 w - - 2 2"
    );

    // f1 is covered by the rook on f8, the king and rook never moved
    let mut game = Game::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(
        game.play("O-O"),
        Err(PlayError::Rule(RuleError::Castle {
            side: CastleSide::Short,
            reason: CastleBlock::Attacked,
        }))
    );
    assert!(game.fen().contains(" KQ "));
}

#[test]
fn test_fifty_move_draw() {
    let mut game = Game::new();

    // A capture or pawn move resets the clock
    game.play_movetext("1. Nf3 Nf6 2. Nc3 e5");
    assert!(game.fen().ends_with(" 0 3"));

    let shuffle = ["Ng1", "Ng8", "Nf3", "Nf6"];
    let mut last = Ok(Outcome::Continue);
    for ply in 0..100 {
        last = game.play(shuffle[ply % 4]);
        if ply < 99 {
            assert_eq!(last, Ok(Outcome::Continue), "ply {ply}");
        }
    }

    assert_eq!(last, Ok(Outcome::Draw));
    assert_eq!(
        game.termination(),
        Some(Termination::Draw(DrawReason::FiftyMoveRule))
    );
    assert_eq!(game.board().fifty_move(), 100);
}

#[test]
fn test_fifty_move_clock_resets_on_capture() {
    let mut game = Game::from_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 98 80").unwrap();

    assert_eq!(game.play("Nxd5"), Ok(Outcome::Continue));
    assert!(game.fen().ends_with(" 0 80"));
    assert_eq!(game.play("Kd7"), Ok(Outcome::Continue));
    assert!(game.fen().ends_with(" 1 81"));
}

#[test]
fn test_double_check_requires_king_move() {
    // Rook on a1 and knight on d3 both check the king on e1
    let mut game = Game::from_fen("4k3/8/8/8/8/3n4/1B6/r3K3 w - - 0 1").unwrap();

    assert_eq!(
        game.play("Bxa1"),
        Err(PlayError::Rule(RuleError::DoubleCheck))
    );
    assert_eq!(
        game.play("Bc1"),
        Err(PlayError::Rule(RuleError::DoubleCheck))
    );
    assert!(game.legal_moves(Square::B2).is_empty());
    assert_eq!(game.legal_moves(Square::E1), vec![Square::D2, Square::E2]);
    assert_eq!(game.play("Ke2"), Ok(Outcome::Continue));
}

#[test]
fn test_pinned_piece_cannot_move() {
    let mut game = Game::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();

    assert_eq!(game.play("Nc3"), Err(PlayError::Rule(RuleError::ExposesKing)));
    assert!(game.legal_moves(Square::E2).is_empty());
}

#[test]
fn test_load_rejects_bad_positions() {
    assert!(Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    assert!(Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
    assert!(Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e5 0 1").is_err());
    assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1").is_err());
    // The side that just moved can not still be in check
    assert!(Game::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").is_err());
}

#[test]
fn test_loaded_mate_is_over() {
    let game = Game::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 1 1").unwrap();

    assert!(game.has_ended());
    assert_eq!(game.outcome(), Outcome::WhiteWins);
}
