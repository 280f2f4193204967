//! Tempo Engine: a time bounded chess move chooser.
//!
//! Iterative deepening negamax with alpha-beta pruning, quiescence search,
//! a transposition table and heuristic move ordering, over a material and
//! mobility evaluation. Boards, move generation and hashing come from the
//! `chess` crate, reached through the [`SearchPosition`] trait.
//!
//! ```no_run
//! use std::time::Duration;
//! use tempo_engine::{EngineBuilder, Game, Timer};
//!
//! let mut engine = EngineBuilder::new().transpositions_mb(16).build()?;
//! let mut game = Game::start_position();
//! let best_move = engine.choose_move(&mut game, &Timer::start(Duration::from_secs(60)))?;
//! println!("{best_move}");
//! # Ok::<(), tempo_engine::error::Error>(())
//! ```

pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod history;
pub mod moveorder;
pub mod position;
pub mod search;
pub mod timeman;
pub mod transposition;

pub use coretypes::Cp;
pub use engine::{Engine, EngineBuilder};
pub use game::Game;
pub use position::SearchPosition;
pub use search::SearchResult;
pub use timeman::{Mode, Timer};
pub use transposition::TranspositionTable;
