//! uttt-minimax: Ultimate Tic-Tac-Toe bot.
//!
//! ## Usage
//!
//! - `uttt-minimax` - Play against a referee on stdin/stdout
//! - `uttt-minimax play --depth 6 --fixture start.txt --once` - Answer one turn
//!   from a preset position
//! - `uttt-minimax battle --games 20` - Pit the engine against a random mover
//! - `uttt-minimax connect3` - Play the 10x10 connect-three variant
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` to see them.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use uttt_minimax::battle::battle;
use uttt_minimax::connect3;
use uttt_minimax::constants::{BATTLE_DEPTH, MAX_DEPTH, N_BATTLES};
use uttt_minimax::game::Game;
use uttt_minimax::protocol::Bot;

/// uttt-minimax: a minimax Ultimate Tic-Tac-Toe bot
#[derive(Parser)]
#[command(name = "uttt-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against a referee speaking the turn protocol on stdin/stdout
    Play {
        /// Search depth in plies
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: usize,
        /// Start from the position in this 9x9 diagram file
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        /// Answer a single turn and exit
        #[arg(long)]
        once: bool,
    },
    /// Play the engine against a random mover and report its score
    Battle {
        /// Number of games
        #[arg(short, long, default_value_t = N_BATTLES)]
        games: usize,
        /// Engine search depth in plies
        #[arg(short, long, default_value_t = BATTLE_DEPTH)]
        depth: usize,
        /// Seed for the random mover
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play the 10x10 connect-three variant on stdin/stdout
    Connect3,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            depth,
            fixture,
            once,
        }) => play(depth, fixture, once),
        Some(Commands::Battle { games, depth, seed }) => {
            run_battle(games, depth, seed);
            Ok(())
        }
        Some(Commands::Connect3) => {
            let stdin = io::stdin();
            connect3::run(stdin.lock(), io::stdout()).context("connect-three protocol failed")?;
            Ok(())
        }
        None => play(MAX_DEPTH, None, false),
    }
}

/// Logs go to stderr: stdout carries the protocol.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn play(depth: usize, fixture: Option<PathBuf>, once: bool) -> Result<()> {
    let game = match fixture {
        Some(path) => {
            let diagram = fs::read_to_string(&path)
                .with_context(|| format!("failed to read fixture {}", path.display()))?;
            Game::from_diagram(&diagram)
                .with_context(|| format!("invalid fixture {}", path.display()))?
        }
        None => Game::new(),
    };

    let mut bot = Bot::with_game(game, depth);
    let stdin = io::stdin();
    let turns = bot
        .run(stdin.lock(), io::stdout(), once)
        .context("referee protocol failed")?;
    info!("played {turns} turns");
    Ok(())
}

fn run_battle(games: usize, depth: usize, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let report = battle(games, depth, &mut rng);
    println!(
        "won {} lost {} drew {} of {} games: score {:.1}%",
        report.wins,
        report.losses,
        report.draws,
        report.games(),
        report.score() * 100.0
    );
}
