//! Minimax implementation.
//!
//! Full width search with no pruning, no transposition table and no time limit.
//! Leaves are scored as `negamax` scores them with an unbounded window.
//! Both searches agree wherever no quiescence node is in check without a capture to make,
//! since only there does standing pat against beta change a node's score.
//! It is far too slow to play with and exists to check the pruning search against.

use std::cmp;

use chess::ChessMove;

use crate::coretypes::{Cp, PlyKind, MAX_PLY};
use crate::error::{self, Error};
use crate::evaluation::evaluate;
use crate::moveorder::order_all_moves;
use crate::position::SearchPosition;

/// Base minimax call. Returns the score and best move for the player to move in `position`.
///
/// Root moves are tried in move ordering order and the first move reaching the best
/// score is returned, so ties resolve the same way as in `negamax`.
pub fn minimax<P: SearchPosition>(
    position: &mut P,
    depth: PlyKind,
) -> error::Result<(Cp, ChessMove)> {
    let moves = order_all_moves(position, position.legal_moves(false), None);
    let mut best: Option<(Cp, ChessMove)> = None;

    for legal_move in moves {
        position.make_move(legal_move);
        let score = -minimax_impl(position, depth.max(1) - 1, 1);
        position.undo_move(legal_move);

        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, legal_move));
        }
    }

    best.ok_or(Error::NoLegalMoves)
}

fn minimax_impl<P: SearchPosition>(position: &mut P, depth: PlyKind, ply: PlyKind) -> Cp {
    if position.is_repeated_position() {
        return Cp::DRAW;
    }
    if ply >= MAX_PLY {
        return evaluate(position);
    }

    let in_check = position.is_in_check();

    // Quiescence: the player may stand pat or make a capture.
    if depth <= 0 {
        let captures = position.legal_moves(true);
        if in_check && captures.is_empty() {
            return Cp::mated_in(ply);
        }

        let mut best_cp = evaluate(position);
        for capture in captures {
            position.make_move(capture);
            best_cp = cmp::max(best_cp, -minimax_impl(position, depth - 1, ply + 1));
            position.undo_move(capture);
        }
        return best_cp;
    }

    let legal_moves = position.legal_moves(false);
    if legal_moves.is_empty() {
        return match in_check {
            true => Cp::mated_in(ply),
            false => Cp::DRAW,
        };
    }

    let mut best_cp = -Cp::INFINITY;
    for legal_move in legal_moves {
        position.make_move(legal_move);
        best_cp = cmp::max(best_cp, -minimax_impl(position, depth - 1, ply + 1));
        position.undo_move(legal_move);
    }
    best_cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use chess::Square;

    #[test]
    fn finds_mate_in_one() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let (score, best_move) = minimax(&mut game, 1).unwrap();
        assert_eq!(best_move, ChessMove::new(Square::A1, Square::A8, None));
        assert_eq!(score, -Cp::mated_in(1));
    }

    #[test]
    fn check_at_the_horizon_scores_as_mate() {
        // Ra8+ leaves black a king move but no capture.
        let mut game = Game::from_fen("7k/8/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let (score, best_move) = minimax(&mut game, 1).unwrap();
        assert_eq!(best_move, ChessMove::new(Square::A1, Square::A8, None));
        assert_eq!(score, -Cp::mated_in(1));

        // One ply deeper the king steps away.
        let (score, _) = minimax(&mut game, 2).unwrap();
        assert!(!score.is_mate());
    }

    #[test]
    fn mated_root_is_an_error() {
        let mut game = Game::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(minimax(&mut game, 2).unwrap_err(), Error::NoLegalMoves);
    }
}
