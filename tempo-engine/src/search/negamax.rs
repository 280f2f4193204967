//! Negamax implementation of Minimax with Alpha-Beta pruning,
//! quiescence search and a transposition table.

use std::cmp;
use std::time::Instant;

use chess::ChessMove;

use crate::coretypes::{Cp, PlyKind, MAX_PLY};
use crate::error::{self, Error};
use crate::evaluation::evaluate;
use crate::moveorder::MovePicker;
use crate::position::SearchPosition;
use crate::search::SearchResult;
use crate::timeman::Mode;
use crate::transposition::{Bound, Entry, TranspositionTable};

/// Fixed depth negamax search of `position`, without iterative deepening or a time limit.
/// Returns the best move and its score relative to the player to move.
pub fn negamax<P: SearchPosition>(
    position: &mut P,
    depth: PlyKind,
    tt: Option<&mut TranspositionTable>,
) -> error::Result<SearchResult> {
    let start_time = Instant::now();
    let mut negamax = Negamax::new(tt, first_legal_move(position)?, Mode::depth(depth), start_time);
    negamax.root(position, depth.max(1));
    Ok(negamax.into_result())
}

/// First move in the position's enumeration order, the answer before any search.
pub(crate) fn first_legal_move<P: SearchPosition>(position: &P) -> error::Result<ChessMove> {
    position
        .legal_moves(false)
        .first()
        .copied()
        .ok_or(Error::NoLegalMoves)
}

/// State of one search invocation. It may run many root searches, one per iteration.
///
/// The result's `best_move` is the root result cell: seeded with a legal move,
/// then overwritten every time alpha improves at the root.
pub(crate) struct Negamax<'tt> {
    tt: Option<&'tt mut TranspositionTable>,
    mode: Mode,
    start_time: Instant,
    result: SearchResult,
}

impl<'tt> Negamax<'tt> {
    pub fn new(
        tt: Option<&'tt mut TranspositionTable>,
        seed_move: ChessMove,
        mode: Mode,
        start_time: Instant,
    ) -> Self {
        Self {
            tt,
            mode,
            start_time,
            result: SearchResult::new(seed_move),
        }
    }

    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn into_result(self) -> SearchResult {
        self.result
    }

    /// Search the root position to `depth` with a full window.
    /// Node statistics accumulate across calls.
    pub fn root<P: SearchPosition>(&mut self, position: &mut P, depth: PlyKind) -> Cp {
        self.result.stopped = false;
        let score = self.node(position, depth, -Cp::INFINITY, Cp::INFINITY, 0);

        self.result.score = score;
        self.result.depth = depth;
        self.result.elapsed = self.start_time.elapsed();
        score
    }

    /// The player to move in `position` is treated as the maxing player.
    /// Returns a fail-hard score within [alpha, beta], except in quiescence
    /// where stand-pat and terminal scores are returned as they are.
    ///
    /// Parameters:
    ///
    /// position: current position to search.
    /// depth: remaining depth to search to, quiescence when 0 or less.
    /// alpha: Best (greatest) guaranteed value for current player.
    /// beta: Best (lowest) guaranteed value for opposite player.
    /// ply: distance from the root.
    fn node<P: SearchPosition>(
        &mut self,
        position: &mut P,
        depth: PlyKind,
        mut alpha: Cp,
        beta: Cp,
        ply: PlyKind,
    ) -> Cp {
        let is_root = ply == 0;
        let quiescence = depth <= 0;

        self.result.nodes += 1;
        if quiescence {
            self.result.q_nodes += 1;
        }

        if !is_root && position.is_repeated_position() {
            return Cp::DRAW;
        }
        if ply >= MAX_PLY {
            return evaluate(position);
        }

        // The table is probed again when storing, never held across recursion.
        let hash = position.position_hash();
        let mut key_move = None;
        if let Some(entry) = self.tt.as_ref().and_then(|tt| tt.probe(hash)) {
            self.result.tt_hits += 1;
            key_move = entry.key_move;

            if !is_root && entry.depth >= depth {
                let score = entry.score.to_root_relative(ply);
                let is_cut = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => score >= beta,
                    Bound::Upper => score <= alpha,
                };
                if is_cut {
                    self.result.tt_cuts += 1;
                    return score;
                }
            }
        }

        let mut stand_pat = None;
        if quiescence {
            let static_eval = evaluate(position);
            if static_eval >= beta {
                return static_eval;
            }
            alpha = cmp::max(alpha, static_eval);
            stand_pat = Some(static_eval);
        }

        // In quiescence only captures are generated, so a check with no capture
        // in reply is scored as mate.
        let moves = position.legal_moves(quiescence);
        if moves.is_empty() {
            return match (position.is_in_check(), stand_pat) {
                (true, _) => Cp::mated_in(ply),
                (false, Some(static_eval)) => static_eval,
                (false, None) => Cp::DRAW,
            };
        }

        let mut best_move = None;
        let mut cutoff = None;
        let mut raised_alpha = false;

        for move_ in MovePicker::new(position, moves, key_move) {
            position.make_move(move_);
            let score = -self.node(position, depth - 1, -beta, -alpha, ply + 1);
            position.undo_move(move_);

            // Fail-hard cutoff, the opponent never allows this node.
            if score >= beta {
                best_move = Some(move_);
                cutoff = Some(score);
                break;
            }

            if score > alpha {
                alpha = score;
                best_move = Some(move_);
                raised_alpha = true;

                if is_root {
                    log::trace!("depth {depth} best move {move_} score {score}");
                    self.result.best_move = move_;
                }
            }

            if is_root && self.mode.is_out_of_time(self.start_time) {
                self.result.stopped = true;
                break;
            }
        }

        let (bound, score) = match cutoff {
            Some(score) => {
                self.result.cut_nodes += 1;
                (Bound::Lower, score)
            }
            None if raised_alpha => {
                self.result.pv_nodes += 1;
                (Bound::Exact, alpha)
            }
            None => {
                self.result.all_nodes += 1;
                (Bound::Upper, alpha)
            }
        };

        if let Some(tt) = self.tt.as_mut() {
            let score = score.to_node_relative(ply);
            tt.store(Entry::new(hash, best_move, depth, score, bound));
        }

        match cutoff {
            Some(_) => beta,
            None => alpha,
        }
    }
}
