use tracing::trace;

use super::Arbiter;
use crate::core::*;

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

impl Arbiter<'_> {
    /// Castling availability of one side, from the moved flags alone.
    ///
    /// Whether the king is currently attacked plays no part; this is what the position
    /// string records.
    pub fn castling_rights(&self, colour: Colour) -> Castling {
        self.board.castling() & Castling::for_colour(colour)
    }

    /// Checks every castling condition without touching the board
    pub fn check_castle(&mut self, colour: Colour, side: CastleSide) -> Result<(), RuleError> {
        let refuse = |reason| RuleError::Castle { side, reason };

        let home = colour.home_rank();
        let king = *self.board.king(colour);
        let rook_from = Square::from_parts(side.rook_from(), home);

        if king.square != Square::from_parts(File::FileE, home) {
            return Err(refuse(CastleBlock::Missing));
        }

        let rook = self
            .board
            .on(rook_from)
            .filter(|p| p.piece == Piece::from_parts(colour, PieceType::Rook))
            .copied()
            .ok_or(refuse(CastleBlock::Missing))?;

        if king.has_moved || rook.has_moved {
            return Err(refuse(CastleBlock::Moved));
        }

        let between = king.square.between(rook_from).unwrap_or_default();
        if between.iter().any(|&sq| self.board.id_on(sq).is_some()) {
            return Err(refuse(CastleBlock::Obstructed));
        }

        if self.in_check(colour) {
            return Err(refuse(CastleBlock::Attacked));
        }

        // The king's transit and landing squares; b1/b8 is crossed by the rook only
        let king_to = Square::from_parts(side.king_to(), home);
        let mut path = king.square.between(king_to).unwrap_or_default();
        path.push(king_to);

        for square in path {
            if !self.is_attacked(square, !colour).is_empty() {
                return Err(refuse(CastleBlock::Attacked));
            }
        }

        Ok(())
    }

    /// Castles towards `side`, moving king and rook together.
    ///
    /// The en passant target is cleared and the half-move clock advances by one.
    pub fn castle(&mut self, colour: Colour, side: CastleSide) -> Result<(), RuleError> {
        if let Err(err) = self.check_castle(colour, side) {
            trace!(%colour, %side, %err, "castling rejected");
            return Err(err);
        }

        let home = colour.home_rank();
        let king = self.board.king(colour).id;
        let rook = self
            .board
            .id_on(Square::from_parts(side.rook_from(), home))
            .ok_or(RuleError::Castle {
                side,
                reason: CastleBlock::Missing,
            })?;

        self.board.relocate(king, Square::from_parts(side.king_to(), home));
        self.board.relocate(rook, Square::from_parts(side.rook_to(), home));
        self.board.set_enpassant(None);
        let fifty_move = self.board.fifty_move().saturating_add(1);
        self.board.set_fifty_move(fifty_move);

        Ok(())
    }

    /// `O-O`
    #[inline]
    pub fn castle_short(&mut self, colour: Colour) -> Result<(), RuleError> {
        self.castle(colour, CastleSide::Short)
    }

    /// `O-O-O`
    #[inline]
    pub fn castle_long(&mut self, colour: Colour) -> Result<(), RuleError> {
        self.castle(colour, CastleSide::Long)
    }

    /// The wings `colour` may castle towards right now
    pub fn castle_moves(&mut self, colour: Colour) -> Vec<CastleSide> {
        [CastleSide::Short, CastleSide::Long]
            .into_iter()
            .filter(|&side| self.check_castle(colour, side).is_ok())
            .collect()
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
