//! The fundamental and simple types of `tempo_engine`.

use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use arrayvec::ArrayVec;
use chess::ChessMove;

///////////////
// Constants //
///////////////

// Generous upper bound on the number of legal moves in any chess position (218 measured).
pub const MAX_MOVES: usize = 256;

// The greatest target depth of iterative deepening.
pub const MAX_DEPTH: PlyKind = 50;

// Hard ceiling on distance from root, including quiescence plies.
// A node at this ply returns its static evaluation.
pub const MAX_PLY: PlyKind = 128;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for depth and ply.
/// Signed because remaining depth keeps decreasing below zero in quiescence.
pub type PlyKind = i32;

// Type alias to make changing Cp inner type easy if needed.
pub type CpKind = i32;

/// MoveList holds at most `MAX_MOVES`, enough for any chess position.
pub type MoveList = ArrayVec<ChessMove, MAX_MOVES>;

/// Centipawn-like score, always relative to the player to move at the node it describes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Cp(pub CpKind);

// Mate scores lie in [MATE_BOUND, INFINITY), ordinary evaluations below MAX_EVALUATION.
const MATE_BOUND: CpKind = Cp::INFINITY.0 - MAX_PLY - 1;

/// Largest magnitude `evaluate` can produce.
/// Kings cancel, leaving at most 15 other pieces worth no more than a fully mobile queen.
pub const MAX_EVALUATION: CpKind = 15 * (800 + 27 * 4);

const _: () = assert!(MAX_EVALUATION < MATE_BOUND);

//////////////////////
/// Implementations //
//////////////////////

impl Cp {
    /// Effectively infinite score, used for the root window and mate construction.
    pub const INFINITY: Cp = Cp(50_000);
    pub const DRAW: Cp = Cp(0);

    /// Score of a node whose player to move is checkmated, `ply` plies from root.
    /// Checkmates closer to the root have a greater magnitude.
    pub const fn mated_in(ply: PlyKind) -> Self {
        Self(-(Self::INFINITY.0 - ply - 1))
    }

    /// Returns true if score is a forced checkmate for either player.
    pub const fn is_mate(&self) -> bool {
        self.0 >= MATE_BOUND || self.0 <= -MATE_BOUND
    }

    /// Returns the number of plies from the root to the checkmated node, if this is a mate score.
    pub const fn mate_distance(&self) -> Option<PlyKind> {
        if self.is_mate() {
            Some(Self::INFINITY.0 - self.0.abs() - 1)
        } else {
            None
        }
    }

    /// Converts a root-relative mate score into one relative to a node `ply` plies deep.
    /// Non-mate scores are unchanged.
    pub(crate) const fn to_node_relative(self, ply: PlyKind) -> Self {
        if self.0 >= MATE_BOUND {
            Self(self.0 + ply)
        } else if self.0 <= -MATE_BOUND {
            Self(self.0 - ply)
        } else {
            self
        }
    }

    /// Inverse of `to_node_relative`.
    pub(crate) const fn to_root_relative(self, ply: PlyKind) -> Self {
        if self.0 >= MATE_BOUND {
            Self(self.0 - ply)
        } else if self.0 <= -MATE_BOUND {
            Self(self.0 + ply)
        } else {
            self
        }
    }
}

impl Add for Cp {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Cp {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Cp {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl SubAssign for Cp {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}
impl Neg for Cp {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Cp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_mates_score_higher() {
        for ply in 0..MAX_PLY {
            let near = -Cp::mated_in(ply);
            let far = -Cp::mated_in(ply + 1);
            assert!(near > far);
            assert!(near.is_mate() && far.is_mate());
            assert!(near < Cp::INFINITY);
        }
    }

    #[test]
    fn evaluations_are_not_mates() {
        assert!(!Cp(MAX_EVALUATION).is_mate());
        assert!(!Cp(-MAX_EVALUATION).is_mate());
        assert!(Cp::mated_in(MAX_PLY).is_mate());
    }

    #[test]
    fn mate_distance() {
        assert_eq!(Cp::mated_in(3).mate_distance(), Some(3));
        assert_eq!((-Cp::mated_in(1)).mate_distance(), Some(1));
        assert_eq!(Cp(250).mate_distance(), None);
    }

    #[test]
    fn node_relative_round_trip() {
        let mate = -Cp::mated_in(7);
        let stored = mate.to_node_relative(4);
        assert_eq!(stored, -Cp::mated_in(3));
        assert_eq!(stored.to_root_relative(4), mate);
        assert_eq!(Cp(120).to_node_relative(9), Cp(120));
    }

    #[test]
    fn cp_display_is_signed() {
        assert_eq!(Cp(40).to_string(), "+40");
        assert_eq!(Cp(-40).to_string(), "-40");
    }
}
