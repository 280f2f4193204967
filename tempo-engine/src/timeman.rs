//! Time Management

use std::time::{Duration, Instant};

use crate::coretypes::PlyKind;

/// A player's clock for the move being decided.
/// It is started when the move is requested, with the time left on the clock at that moment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Timer {
    start: Instant,
    clock: Duration,
}

impl Timer {
    /// Start a timer now for a clock with `remaining` time.
    pub fn start(remaining: Duration) -> Self {
        Self::started_at(Instant::now(), remaining)
    }

    /// Timer for a clock with `remaining` time, which began counting at `start`.
    pub fn started_at(start: Instant, remaining: Duration) -> Self {
        Self {
            start,
            clock: remaining,
        }
    }

    /// Instant the move was requested.
    pub fn start_time(&self) -> Instant {
        self.start
    }

    /// Time spent on this move so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left on the clock, never negative.
    pub fn remaining(&self) -> Duration {
        self.clock.saturating_sub(self.elapsed())
    }
}

/// There are 3 supported search modes, Standard, MoveTime, and Depth.
/// Standard mode: a share of the clock, `remaining / moves_to_go`.
/// MoveTime mode: search for a specified time per move.
/// Depth mode: search to a given depth with no time limit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    Standard {
        remaining: Duration,
        moves_to_go: u32,
    },
    MoveTime(Duration),
    Depth(PlyKind),
}

impl Mode {
    /// Returns a new Standard Mode. A `moves_to_go` of 0 is treated as 1.
    pub fn standard(remaining: Duration, moves_to_go: u32) -> Self {
        Self::Standard {
            remaining,
            moves_to_go: moves_to_go.max(1),
        }
    }

    /// Returns a new MoveTime Mode.
    pub fn movetime(movetime: Duration) -> Self {
        Self::MoveTime(movetime)
    }

    /// Returns a new Depth Mode.
    pub fn depth(ply: PlyKind) -> Self {
        Self::Depth(ply)
    }

    /// Time allowed for one search, or None if a search may run as long as it needs.
    pub fn budget(&self) -> Option<Duration> {
        match *self {
            Mode::Standard {
                remaining,
                moves_to_go,
            } => Some(remaining / moves_to_go.max(1)),
            Mode::MoveTime(movetime) => Some(movetime),
            Mode::Depth(_) => None,
        }
    }

    /// Deepest iteration allowed, never exceeding `max_depth` nor going below 1.
    pub fn depth_limit(&self, max_depth: PlyKind) -> PlyKind {
        match *self {
            Mode::Depth(depth) => depth.min(max_depth).max(1),
            _ => max_depth.max(1),
        }
    }

    /// Returns true if a search started at `start_time` has used up its budget.
    pub fn is_out_of_time(&self, start_time: Instant) -> bool {
        self.budget()
            .map_or(false, |budget| start_time.elapsed() >= budget)
    }
}
