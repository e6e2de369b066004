use tracing::trace;

use super::Arbiter;
use crate::board::{BoardPiece, PieceId};
use crate::core::*;

/******************************************\
|==========================================|
|              Executed Move               |
|==========================================|
\******************************************/

/// What happened on the board when a move was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    pub piece: Piece,

    pub from: Square,

    pub to: Square,

    pub captured: Option<Piece>,

    pub en_passant: bool,

    pub promoted: bool,
}

/******************************************\
|==========================================|
|              Attempt Move                |
|==========================================|
\******************************************/

impl Arbiter<'_> {
    /// Validates a move and carries it out.
    ///
    /// On any error the board is left exactly as it was.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::arbiter::Arbiter;
    /// use chess_rules::board::Board;
    /// use chess_rules::core::{MoveError, Square};
    ///
    /// let mut board = Board::default();
    /// let pawn = board.id_on(Square::E2).unwrap();
    /// let mut arbiter = Arbiter::new(&mut board);
    ///
    /// assert_eq!(arbiter.attempt_move(pawn, Square::E5), Err(MoveError::Unreachable));
    /// assert!(arbiter.attempt_move(pawn, Square::E4).is_ok());
    /// assert_eq!(arbiter.board().enpassant(), Some(Square::E3));
    /// ```
    pub fn attempt_move(&mut self, id: PieceId, to: Square) -> Result<Executed, MoveError> {
        let piece = self.board.piece(id).copied().ok_or(MoveError::Unreachable)?;

        if !self.board.reaches(&piece, to) || self.holds_king(to) {
            return Err(MoveError::Unreachable);
        }

        if let Err(err) = self.king_safety(&piece, to) {
            trace!(piece = %piece.piece, from = %piece.square, %to, %err, "move rejected");
            return Err(err.into());
        }

        Ok(self.execute(piece, to))
    }

    /// Carries out a reachable, safe move: capture, en passant bookkeeping, clock, promotion
    fn execute(&mut self, piece: BoardPiece, to: Square) -> Executed {
        let id = piece.id;
        let from = piece.square;
        let colour = piece.colour();
        let is_pawn = piece.pt() == PieceType::Pawn;

        let victim = self
            .enpassant_capture(&piece, to)
            .and_then(|v| self.board.piece(v))
            .map(|v| v.square);

        let captured = match victim {
            Some(square) => self.board.take(square),
            None => self.board.take(to),
        }
        .map(|p| p.piece);

        let double_step = is_pawn && Square::rank_dist(from, to) == 2;
        self.board.set_enpassant(match double_step {
            true => from.offset(0, colour.forward()),
            false => None,
        });

        let fifty_move = match captured.is_some() || is_pawn {
            true => 0,
            false => self.board.fifty_move().saturating_add(1),
        };
        self.board.set_fifty_move(fifty_move);

        self.board.relocate(id, to);

        let promoted = is_pawn && to.rank() == colour.promotion_rank();
        if promoted {
            self.board.promote(id, PieceType::Queen);
        }

        Executed {
            piece: piece.piece,
            from,
            to,
            captured,
            en_passant: victim.is_some(),
            promoted,
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
    use crate::board::{Board, Position};

    #[test]
    fn test_quiet_move_and_clock() {
        let mut board = Board::default();
        let knight = board.id_on(Square::G1).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        let executed = arbiter.attempt_move(knight, Square::F3).unwrap();
        assert_eq!(executed.captured, None);
        assert_eq!(arbiter.board().fifty_move(), 1);
        assert_eq!(arbiter.board().enpassant(), None);
        assert!(arbiter.board().piece(knight).unwrap().has_moved);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_capture_resets_clock() {
        let mut board = Position::parse("4k3/8/8/3p4/8/2N5/8/4K3 w - - 7 30")
            .unwrap()
            .board;
        let knight = board.id_on(Square::C3).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        let executed = arbiter.attempt_move(knight, Square::D5).unwrap();
        assert_eq!(executed.captured, Some(Piece::BlackPawn));
        assert_eq!(arbiter.board().fifty_move(), 0);
        assert_eq!(arbiter.board().pieces(Colour::Black).count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_rejections_leave_board_untouched() {
        let mut board = Board::from_placement("k3r3/8/8/8/8/8/4N3/4K3").unwrap();
        let before = board.clone();
        let knight = board.id_on(Square::E2).unwrap();
        let king = board.king(Colour::White).id;
        let mut arbiter = Arbiter::new(&mut board);

        assert_eq!(
            arbiter.attempt_move(knight, Square::C3),
            Err(MoveError::Rule(RuleError::ExposesKing))
        );
        assert_eq!(
            arbiter.attempt_move(knight, Square::E4),
            Err(MoveError::Unreachable)
        );
        assert_eq!(
            arbiter.attempt_move(king, Square::E2),
            Err(MoveError::Unreachable)
        );

        assert_eq!(board, before);
    }

    #[test]
    fn test_cannot_capture_king() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/4RK2").unwrap();
        let rook = board.id_on(Square::E1).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        assert!(arbiter.board().reaches(arbiter.board().piece(rook).unwrap(), Square::E8));
        assert_eq!(arbiter.attempt_move(rook, Square::E8), Err(MoveError::Unreachable));
        assert!(!arbiter.legal_moves(rook).contains(&Square::E8));
    }

    #[test]
    fn test_enpassant_capture() {
        let mut board = Position::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2")
            .unwrap()
            .board;
        let pawn = board.id_on(Square::E5).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        let executed = arbiter.attempt_move(pawn, Square::D6).unwrap();
        assert!(executed.en_passant);
        assert_eq!(executed.captured, Some(Piece::BlackPawn));
        assert!(arbiter.board().on(Square::D5).is_none());
        assert_eq!(arbiter.board().enpassant(), None);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_stale_enpassant_target() {
        // Pawn on d4 next to a black pawn on e4; no target set, so the diagonal step fails
        let mut board = Board::from_placement("4k3/8/8/8/3Pp3/8/8/4K3").unwrap();
        let pawn = board.id_on(Square::E4).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        assert_eq!(arbiter.attempt_move(pawn, Square::D3), Err(MoveError::Unreachable));
    }

    #[test]
    fn test_promotion_keeps_identity() {
        let mut board = Board::from_placement("4k3/1P6/8/8/8/8/8/4K3").unwrap();
        let pawn = board.id_on(Square::B7).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        let executed = arbiter.attempt_move(pawn, Square::B8).unwrap();
        assert!(executed.promoted);

        let queen = arbiter.board().piece(pawn).unwrap();
        assert_eq!(queen.piece, Piece::WhiteQueen);
        assert_eq!(queen.square, Square::B8);
        assert!(arbiter.in_check(Colour::Black));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_double_step_sets_target() {
        let mut board = Board::default();
        let pawn = board.id_on(Square::D7).unwrap();
        let mut arbiter = Arbiter::new(&mut board);

        arbiter.attempt_move(pawn, Square::D5).unwrap();
        assert_eq!(arbiter.board().enpassant(), Some(Square::D6));
        assert_eq!(arbiter.board().fifty_move(), 0);

        let knight = arbiter.board().id_on(Square::B1).unwrap();
        arbiter.attempt_move(knight, Square::C3).unwrap();
        assert_eq!(arbiter.board().enpassant(), None);
    }
}
