//! Tempo Engine error type.
//!
//! Search itself cannot fail: terminal positions are scores and running out of
//! time ends a search normally. Errors only come from setting up a search.

use std::result;

use chess::ChessMove;
use thiserror::Error;

/// Tempo Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// The primary and general error type for the Tempo Engine.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A FEN string could not be parsed into a position.
    #[error("invalid fen \"{fen}\": {reason}")]
    InvalidFen { fen: String, reason: String },

    /// An illegal move was provided, and could not be applied to some base position.
    #[error("illegal move {0}")]
    IllegalMove(ChessMove),

    /// A search was requested for a position where the player to move has no moves.
    #[error("no legal moves in root position")]
    NoLegalMoves,

    /// A transposition table must hold at least one entry.
    #[error("transposition table size must be greater than 0")]
    ZeroTableSize,
}
