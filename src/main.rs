//! Command line interface to the Tempo engine.
//!
//! Searches one position and prints the chosen move with search statistics.
//! Set `RUST_LOG=debug` to see every completed iteration.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use tempo_engine::{EngineBuilder, Game, Mode, SearchPosition};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug)]
#[command(name = "tempo", version)]
#[command(about = "Choose a chess move within a time budget")]
struct Args {
    /// FEN of the position to search
    #[arg(default_value = START_FEN)]
    fen: String,

    /// Time left on the mover's clock in milliseconds, shared by --moves-to-go moves
    #[arg(long, default_value_t = 60_000, conflicts_with_all = ["movetime_ms", "depth"])]
    remaining_ms: u64,

    /// Search for exactly this many milliseconds
    #[arg(long, conflicts_with = "depth")]
    movetime_ms: Option<u64>,

    /// Search to a fixed depth with no time limit
    #[arg(long)]
    depth: Option<i32>,

    /// Transposition table size in megabytes
    #[arg(long, default_value_t = 64)]
    hash_mb: usize,

    /// Number of moves the remaining clock time must last
    #[arg(long, default_value_t = 35)]
    moves_to_go: u32,

    /// Disable the transposition table
    #[arg(long)]
    no_tt: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        match (self.depth, self.movetime_ms) {
            (Some(depth), _) => Mode::depth(depth),
            (None, Some(movetime)) => Mode::movetime(Duration::from_millis(movetime)),
            (None, None) => Mode::standard(Duration::from_millis(self.remaining_ms), self.moves_to_go),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{args:?}");

    let mut game = Game::from_fen(&args.fen).context("could not read position")?;
    let mut engine = EngineBuilder::new()
        .transpositions_mb(args.hash_mb)
        .transpositions(!args.no_tt)
        .moves_to_go(args.moves_to_go)
        .build()
        .context("could not build engine")?;

    let mode = args.mode();
    log::info!("searching {} with {:?}", args.fen, mode);
    let result = engine
        .search(&mut game, mode)
        .with_context(|| format!("could not search {}", args.fen))?;

    debug_assert!(game.legal_moves(false).contains(&result.best_move));
    println!("{result}");
    println!("bestmove {}", result.best_move);

    Ok(())
}
