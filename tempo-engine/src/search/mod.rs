//! Search functions.

mod ids;
mod minimax;
mod negamax;

pub use ids::*;
pub use minimax::*;
pub use negamax::*;

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use chess::ChessMove;

use crate::coretypes::{Cp, PlyKind};
use crate::error;
use crate::position::SearchPosition;
use crate::timeman::Mode;
use crate::transposition::TranspositionTable;

/// The results found from running a search on some root position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search.
    pub best_move: ChessMove,
    /// The score of making the best move, relative to the root player.
    pub score: Cp,
    /// Depth of the last iteration. It was only fully searched if `stopped` is false.
    pub depth: PlyKind,
    /// Total number of nodes visited in a search, including main search nodes and quiescence nodes.
    pub nodes: u64,
    /// Total number of nodes visited in a quiescence search.
    pub q_nodes: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
    /// Flag that indicates the last iteration ran out of time before searching every root move.
    pub stopped: bool,

    /// Number of nodes where a beta-cutoff was performed.
    pub cut_nodes: u64,
    /// Number of nodes that improved local alpha value without reaching beta.
    pub pv_nodes: u64,
    /// Number of nodes that did not improve alpha or result in a cutoff.
    pub all_nodes: u64,
    /// Number of times a position was found in the transposition table.
    pub tt_hits: u64,
    /// Number of times a tt hit score could be used and returned immediately.
    pub tt_cuts: u64,
}

impl SearchResult {
    /// Returns a result for `best_move` with no search performed.
    pub fn new(best_move: ChessMove) -> Self {
        Self {
            best_move,
            score: Cp::DRAW,
            depth: 0,
            nodes: 0,
            q_nodes: 0,
            elapsed: Duration::ZERO,
            stopped: false,
            cut_nodes: 0,
            pv_nodes: 0,
            all_nodes: 0,
            tt_hits: 0,
            tt_cuts: 0,
        }
    }

    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes as f64 / secs).round()
        } else {
            0.0
        }
    }

    /// Returns the percentage of tt hits that result in tt cuts.
    pub fn tt_cut_ratio(&self) -> f64 {
        match self.tt_hits {
            0 => 0.0,
            hits => self.tt_cuts as f64 / hits as f64,
        }
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SearchResult {{")?;
        writeln!(f, "    best_move: {}", self.best_move)?;
        writeln!(f, "    score    : {}", self.score)?;
        if let Some(distance) = self.score.mate_distance() {
            writeln!(f, "    mate_ply : {distance}")?;
        }
        writeln!(f, "    depth    : {}", self.depth)?;
        writeln!(f, "    nodes    : {}", self.nodes)?;
        writeln!(f, "    q_nodes  : {}", self.q_nodes)?;
        writeln!(f, "    nps      : {}", self.nps())?;
        writeln!(
            f,
            "    elapsed  : {}.{:03}s",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        )?;
        writeln!(f, "    stopped  : {}", self.stopped)?;
        writeln!(f, "    pv_nodes : {}", self.pv_nodes)?;
        writeln!(f, "    cut_nodes: {}", self.cut_nodes)?;
        writeln!(f, "    all_nodes: {}", self.all_nodes)?;
        writeln!(f, "    tt_hits  : {}", self.tt_hits)?;
        writeln!(f, "    tt_cuts  : {}", self.tt_cuts)?;
        writeln!(f, "    tt_ratio : {:.2}", self.tt_cut_ratio())?;
        write!(f, "}}")
    }
}

/// Tempo Engine primary position search function.
/// Runs an iterative deepening search on `position` until `mode` says to stop,
/// and returns the best move found. The position is restored before returning.
///
/// With `tt` None, every probe is treated as a miss and nothing is stored.
pub fn search<P: SearchPosition>(
    position: &mut P,
    mode: Mode,
    max_depth: PlyKind,
    tt: Option<&mut TranspositionTable>,
    start_time: Option<Instant>,
) -> error::Result<SearchResult> {
    let start_time = start_time.unwrap_or_else(Instant::now);
    ids(position, mode, max_depth, tt, start_time)
}
