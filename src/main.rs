use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chess_rules::board::{Position, START_FEN};
use chess_rules::game::{DrawRules, Game, GameConfig, movetext_tokens};
use chess_rules::utils::perft_divide;

/// Plays chess movetext against the rules and reports each outcome
#[derive(Parser, Debug)]
#[command(name = "chess-rules", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply movetext such as `1. e4 e5 2. Nf3` and print one line per move
    Play {
        /// Move tokens, move numbers and result markers are skipped
        #[arg(required = true)]
        movetext: Vec<String>,

        #[command(flatten)]
        options: GameOptions,
    },

    /// Count the leaf nodes of the legal move tree
    Perft {
        depth: usize,

        /// Starting position
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
}

#[derive(Args, Debug)]
struct GameOptions {
    /// Starting position, the standard one if omitted
    #[arg(long)]
    fen: Option<String>,

    /// Half-moves without capture or pawn move before the game is drawn
    #[arg(long, default_value_t = GameConfig::FIFTY_MOVE_LIMIT)]
    fifty_move_limit: u16,

    /// Draw when the side to move has no legal move
    #[arg(long)]
    stalemate: bool,

    /// Draw when neither side can mate
    #[arg(long)]
    insufficient_material: bool,

    /// Draw on the third occurrence of a position
    #[arg(long)]
    threefold: bool,
}

impl GameOptions {
    fn config(&self) -> GameConfig {
        GameConfig {
            fifty_move_limit: self.fifty_move_limit,
            draw_rules: DrawRules {
                stalemate: self.stalemate,
                insufficient_material: self.insufficient_material,
                threefold_repetition: self.threefold,
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { movetext, options } => play(&movetext.join(" "), &options),
        Command::Perft { depth, fen } => perft(depth, &fen),
    }
}

fn play(movetext: &str, options: &GameOptions) -> ExitCode {
    let config = options.config();
    let game = match &options.fen {
        Some(fen) => Game::from_fen_with_config(fen, config),
        None => Ok(Game::with_config(config)),
    };

    let mut game = match game {
        Ok(game) => game,
        Err(err) => {
            error!(%err, "invalid position");
            return ExitCode::FAILURE;
        }
    };

    let results = game.play_movetext(movetext);

    for (token, result) in movetext_tokens(movetext).zip(results) {
        match result {
            Ok(outcome) => println!("{token}: {outcome}"),
            Err(err) => println!("{token}: {err}"),
        }
    }

    println!("{}", game.fen());
    ExitCode::SUCCESS
}

fn perft(depth: usize, fen: &str) -> ExitCode {
    let position = match Position::parse(fen) {
        Ok(position) => position,
        Err(err) => {
            error!(%err, "invalid position");
            return ExitCode::FAILURE;
        }
    };

    let divide = perft_divide(&position.board, position.stm, depth);
    let total: usize = divide.iter().map(|(_, nodes)| nodes).sum();

    for (label, nodes) in &divide {
        println!("{label}: {nodes}");
    }
    info!(depth, nodes = total, "perft done");
    println!("Nodes: {total}");

    ExitCode::SUCCESS
}
