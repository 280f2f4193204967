//! Engine struct acts as a simplified API for the various parts of the Tempo engine.

use std::time::Instant;

use chess::ChessMove;

use crate::coretypes::{PlyKind, MAX_DEPTH};
use crate::error;
use crate::position::SearchPosition;
use crate::search::{self, SearchResult};
use crate::timeman::{Mode, Timer};
use crate::transposition::TranspositionTable;

/// EngineBuilder allows for parameters of an Engine to be set and built once,
/// avoiding repeating costly initialization steps of making then changing an Engine.
///
/// Default values:
///
/// * `transpositions_mb`: 64 megabytes
/// * `transpositions`: true
/// * `moves_to_go`: 35
/// * `max_depth`: 50
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    transpositions_mb: usize,
    transpositions: bool,
    moves_to_go: u32,
    max_depth: PlyKind,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            transpositions_mb: 64,
            transpositions: true,
            moves_to_go: 35,
            max_depth: MAX_DEPTH,
        }
    }

    /// Create and return a new Engine. Its transposition table is allocated once, here.
    pub fn build(&self) -> error::Result<Engine> {
        let tt = match self.transpositions {
            true => Some(TranspositionTable::with_mb(self.transpositions_mb)?),
            false => None,
        };

        Ok(Engine {
            tt,
            moves_to_go: self.moves_to_go,
            max_depth: self.max_depth,
        })
    }

    /// Set the engine's initial transposition table size in megabytes.
    pub fn transpositions_mb(mut self, transpositions_mb: usize) -> Self {
        self.transpositions_mb = transpositions_mb;
        self
    }

    /// Set whether the engine uses a transposition table at all.
    /// Without one, every probe misses and nothing is stored.
    pub fn transpositions(mut self, transpositions: bool) -> Self {
        self.transpositions = transpositions;
        self
    }

    /// Set the number of moves the remaining clock time is assumed to be shared by.
    pub fn moves_to_go(mut self, moves_to_go: u32) -> Self {
        self.moves_to_go = moves_to_go.max(1);
        self
    }

    /// Set the deepest iteration a search may reach.
    pub fn max_depth(mut self, max_depth: PlyKind) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_DEPTH);
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine wraps up all parameters required for running any kind of search.
/// Its transposition table lives for a whole game, so the engine needs to be told
/// when a new game starts.
pub struct Engine {
    tt: Option<TranspositionTable>,
    moves_to_go: u32,
    max_depth: PlyKind,
}

impl Engine {
    /// Returns an engine with default parameters.
    pub fn new() -> error::Result<Self> {
        EngineBuilder::new().build()
    }

    /// Returns reference to engine's transposition table, if it has one.
    pub fn transposition_table(&self) -> Option<&TranspositionTable> {
        self.tt.as_ref()
    }

    pub fn moves_to_go(&self) -> u32 {
        self.moves_to_go
    }

    pub fn max_depth(&self) -> PlyKind {
        self.max_depth
    }

    /// Informs engine that next search will be from a new game.
    pub fn new_game(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
    }

    /// Set a new size for the transposition table in Megabytes, dropping every entry.
    /// Enables the table if the engine was built without one.
    /// Returns the new capacity.
    pub fn set_transpositions_mb(&mut self, new_mb: usize) -> error::Result<usize> {
        let tt = TranspositionTable::with_mb(new_mb)?;
        let capacity = tt.capacity();
        self.tt = Some(tt);
        Ok(capacity)
    }

    /// Run a blocking search of `position`, returning the best move and search statistics.
    /// The position is left as it was given.
    pub fn search<P: SearchPosition>(
        &mut self,
        position: &mut P,
        mode: Mode,
    ) -> error::Result<SearchResult> {
        self.search_from(position, mode, Instant::now())
    }

    /// Decide the move to play in `position` with the time left on `timer`.
    /// Uses `remaining / moves_to_go` of the clock, counted from when the timer started.
    pub fn choose_move<P: SearchPosition>(
        &mut self,
        position: &mut P,
        timer: &Timer,
    ) -> error::Result<ChessMove> {
        let mode = Mode::standard(timer.remaining() + timer.elapsed(), self.moves_to_go);
        self.search_from(position, mode, timer.start_time())
            .map(|result| result.best_move)
    }

    fn search_from<P: SearchPosition>(
        &mut self,
        position: &mut P,
        mode: Mode,
        start_time: Instant,
    ) -> error::Result<SearchResult> {
        let result = search::search(
            position,
            mode,
            self.max_depth,
            self.tt.as_mut(),
            Some(start_time),
        )?;

        log::info!(
            "best move {} score {} depth {} nodes {} elapsed {:?}",
            result.best_move,
            result.score,
            result.depth,
            result.nodes,
            result.elapsed
        );
        Ok(result)
    }
}
