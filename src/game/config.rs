/******************************************\
|==========================================|
|               Game Config                |
|==========================================|
\******************************************/

/// Settings a [`Game`](super::Game) is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Half-moves without a capture or pawn move after which the game is drawn
    pub fifty_move_limit: u16,

    pub draw_rules: DrawRules,
}

impl GameConfig {
    /// The standard limit of fifty moves per side
    pub const FIFTY_MOVE_LIMIT: u16 = 100;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fifty_move_limit: Self::FIFTY_MOVE_LIMIT,
            draw_rules: DrawRules::default(),
        }
    }
}

/// Draw detectors on top of the fifty-move rule. All of them are off unless enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawRules {
    pub stalemate: bool,

    pub insufficient_material: bool,

    pub threefold_repetition: bool,
}

impl DrawRules {
    pub const NONE: Self = Self {
        stalemate: false,
        insufficient_material: false,
        threefold_repetition: false,
    };

    pub const ALL: Self = Self {
        stalemate: true,
        insufficient_material: true,
        threefold_repetition: true,
    };
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
