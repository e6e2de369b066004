//! # Module: `game`
//!
//! A turn-based game on top of the [`Arbiter`]. Moves come in as short algebraic tokens,
//! are resolved to a piece of the side to move, and applied. After every applied move the
//! side now to move is checked for mate and the enabled draw rules are evaluated.
//!
//! ## Outcome codes
//!
//! | code | meaning         |
//! |------|-----------------|
//! | `0`  | game continues  |
//! | `1`  | white wins      |
//! | `2`  | black wins      |
//! | `3`  | draw            |

pub mod config;
pub mod draw;
pub mod notation;

pub use config::{DrawRules, GameConfig};
pub use notation::{Disambiguator, MoveToken, movetext_tokens};

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::arbiter::Arbiter;
use crate::board::{Board, FenParseError, PieceId, Position};
use crate::core::*;
use draw::{RepetitionKey, insufficient_material};

/******************************************\
|==========================================|
|                 Outcome                  |
|==========================================|
\******************************************/

/// Result of applying one move
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue = 0,
    WhiteWins = 1,
    BlackWins = 2,
    Draw = 3,
}

impl Outcome {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why a drawn game was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate { winner: Colour },
    Draw(DrawReason),
}

impl Termination {
    pub const fn outcome(self) -> Outcome {
        match self {
            Termination::Checkmate { winner: Colour::White } => Outcome::WhiteWins,
            Termination::Checkmate { winner: Colour::Black } => Outcome::BlackWins,
            Termination::Draw(_) => Outcome::Draw,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Termination::Draw(reason) => write!(f, "Draw by {reason}"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Active,
    Ended(Termination),
}

/******************************************\
|==========================================|
|                Play Error                |
|==========================================|
\******************************************/

/// Why a move token was not applied. The game is unchanged in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    #[error("Game has already ended.")]
    GameEnded,

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/******************************************\
|==========================================|
|                   Game                   |
|==========================================|
\******************************************/

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    stm: Colour,
    full_moves: u16,
    history: Vec<String>,
    state: GameState,
    config: GameConfig,
    repetitions: HashMap<RepetitionKey, u8>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game from the standard starting position with the default configuration
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_position(Position::default(), config)
    }

    /// Loads a game from a six-field position string
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        Self::from_fen_with_config(fen, GameConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: GameConfig) -> Result<Self, FenParseError> {
        Ok(Self::from_position(Position::parse(fen)?, config))
    }

    fn from_position(position: Position, config: GameConfig) -> Self {
        let mut game = Game {
            board: position.board,
            stm: position.stm,
            full_moves: position.full_moves,
            history: Vec::new(),
            state: GameState::Active,
            config,
            repetitions: HashMap::new(),
        };

        game.record_position();
        game.state = game.evaluate();
        game
    }

    /******************************************\
    |==========================================|
    |                 Accessors                |
    |==========================================|
    \******************************************/

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move
    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    #[inline]
    pub fn full_moves(&self) -> u16 {
        self.full_moves
    }

    /// Tokens of every applied move, in order
    #[inline]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            GameState::Active => None,
            GameState::Ended(termination) => Some(termination),
        }
    }

    #[inline]
    pub fn has_ended(&self) -> bool {
        matches!(self.state, GameState::Ended(_))
    }

    pub fn outcome(&self) -> Outcome {
        self.termination()
            .map_or(Outcome::Continue, Termination::outcome)
    }

    /// Serializes the current position, all six fields
    pub fn fen(&self) -> String {
        self.board.fen(self.stm, self.full_moves)
    }

    /// Legal destinations of the side to move's piece on `square`, castling included for the
    /// king. Empty once the game has ended.
    pub fn legal_moves(&mut self, square: Square) -> Vec<Square> {
        if self.has_ended() {
            return Vec::new();
        }

        let Some(piece) = self.board.on(square).copied() else {
            return Vec::new();
        };
        if piece.colour() != self.stm {
            return Vec::new();
        }

        let stm = self.stm;
        let mut arbiter = Arbiter::new(&mut self.board);
        let mut moves = arbiter.legal_moves(piece.id);

        if piece.pt() == PieceType::King {
            let home = stm.home_rank();
            moves.extend(
                arbiter
                    .castle_moves(stm)
                    .into_iter()
                    .map(|side| Square::from_parts(side.king_to(), home)),
            );
            moves.sort();
        }

        moves
    }

    /******************************************\
    |==========================================|
    |                   Play                   |
    |==========================================|
    \******************************************/

    /// Applies one move token for the side to move.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess_rules::game::{Game, Outcome, PlayError};
    /// use chess_rules::core::NotationError;
    ///
    /// let mut game = Game::new();
    /// assert_eq!(game.play("e4"), Ok(Outcome::Continue));
    /// assert_eq!(game.play("Qh4"), Err(PlayError::Notation(NotationError::NoPath)));
    /// ```
    pub fn play(&mut self, token: &str) -> Result<Outcome, PlayError> {
        if self.has_ended() {
            return Err(PlayError::GameEnded);
        }

        let stm = self.stm;

        match token.parse::<MoveToken>()? {
            MoveToken::Castle(side) => Arbiter::new(&mut self.board).castle(stm, side)?,
            MoveToken::Move { piece, from, to } => self.resolve(piece, from, to)?,
        }

        self.history.push(token.trim().to_string());
        if stm == Colour::Black {
            self.full_moves = self.full_moves.saturating_add(1);
        }
        self.stm = !stm;

        debug!(token = token.trim(), side = %stm, placement = %self.board.placement(), "move applied");

        self.record_position();
        self.state = self.evaluate();

        if let GameState::Ended(termination) = self.state {
            info!(%termination, moves = self.history.len(), "game over");
        }

        Ok(self.outcome())
    }

    /// Applies every move of a movetext in order, stopping once the game has ended.
    ///
    /// Returns one result per applied token; a rejected token does not stop the sequence.
    pub fn play_movetext(&mut self, movetext: &str) -> Vec<Result<Outcome, PlayError>> {
        let mut results = Vec::new();

        for token in movetext_tokens(movetext) {
            if self.has_ended() {
                break;
            }
            results.push(self.play(token));
        }

        results
    }

    /// Tries every piece matching the token in id order, the first legal one moves
    fn resolve(&mut self, pt: PieceType, from: Disambiguator, to: Square) -> Result<(), PlayError> {
        let stm = self.stm;
        let candidates: Vec<PieceId> = self
            .board
            .pieces(stm)
            .filter(|p| p.pt() == pt && from.matches(p.square))
            .map(|p| p.id)
            .collect();

        if candidates.is_empty() {
            return Err(NotationError::NoSuchPiece.into());
        }

        let mut arbiter = Arbiter::new(&mut self.board);
        let mut rule_error = None;

        for id in candidates {
            match arbiter.attempt_move(id, to) {
                Ok(_) => return Ok(()),
                Err(MoveError::Rule(err)) => {
                    rule_error.get_or_insert(err);
                }
                Err(MoveError::Unreachable) => {}
            }
        }

        Err(match rule_error {
            Some(err) => PlayError::Rule(err),
            None => NotationError::NoPath.into(),
        })
    }

    fn record_position(&mut self) {
        let key = RepetitionKey::new(&self.board, self.stm);
        *self.repetitions.entry(key).or_insert(0) += 1;
    }

    /// Evaluates mate and draws against the side to move
    fn evaluate(&mut self) -> GameState {
        let stm = self.stm;
        let rules = self.config.draw_rules;
        let fifty_move = self.board.fifty_move();
        let limit = self.config.fifty_move_limit;
        let repeated = self
            .repetitions
            .get(&RepetitionKey::new(&self.board, stm))
            .is_some_and(|&count| count >= 3);

        let mut arbiter = Arbiter::new(&mut self.board);

        let termination = if arbiter.is_checkmate(stm) {
            Termination::Checkmate { winner: !stm }
        } else if fifty_move >= limit {
            Termination::Draw(DrawReason::FiftyMoveRule)
        } else if rules.stalemate && arbiter.is_stalemate(stm) {
            Termination::Draw(DrawReason::Stalemate)
        } else if rules.insufficient_material && insufficient_material(arbiter.board()) {
            Termination::Draw(DrawReason::InsufficientMaterial)
        } else if rules.threefold_repetition && repeated {
            Termination::Draw(DrawReason::ThreefoldRepetition)
        } else {
            return GameState::Active;
        };

        GameState::Ended(termination)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
