//! Iterative Deepening Search.

use std::time::Instant;

use crate::coretypes::PlyKind;
use crate::error;
use crate::position::SearchPosition;
use crate::search::negamax::{first_legal_move, Negamax};
use crate::search::SearchResult;
use crate::timeman::Mode;
use crate::transposition::TranspositionTable;

/// Searches game tree at depths 1, 2, ... using iterative deepening, until the depth limit
/// of `mode` or until its time budget is used up.
///
/// The best root move is replaced whenever alpha improves at the root, including in an
/// iteration cut short by time, so the returned move always comes from the last iteration.
/// Time is only checked at the root between moves, so a search may overrun its budget
/// by the time it takes to finish the root move in progress.
pub fn ids<P: SearchPosition>(
    position: &mut P,
    mode: Mode,
    max_depth: PlyKind,
    tt: Option<&mut TranspositionTable>,
    start_time: Instant,
) -> error::Result<SearchResult> {
    let seed_move = first_legal_move(position)?;
    let depth_limit = mode.depth_limit(max_depth);
    let mut negamax = Negamax::new(tt, seed_move, mode, start_time);

    for depth in 1..=depth_limit {
        negamax.root(position, depth);

        let result = negamax.result();
        log::debug!(
            "depth {} score {} move {} nodes {} nps {} elapsed {:?}{}",
            depth,
            result.score,
            result.best_move,
            result.nodes,
            result.nps(),
            result.elapsed,
            if result.stopped { " (stopped)" } else { "" },
        );

        if result.stopped || mode.is_out_of_time(start_time) {
            break;
        }
    }

    Ok(negamax.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use std::time::Duration;

    #[test]
    fn depth_mode_completes_every_iteration() {
        let mut game = Game::start_position();
        let mut tt = TranspositionTable::with_capacity(1 << 14);
        let result = ids(&mut game, Mode::depth(3), 50, Some(&mut tt), Instant::now()).unwrap();

        assert_eq!(result.depth, 3);
        assert!(!result.stopped);
        assert!(game.legal_moves(false).contains(&result.best_move));
        assert!(result.nodes >= result.q_nodes);
        assert!(result.tt_hits > 0);
    }

    #[test]
    fn zero_budget_still_returns_a_move() {
        let mut game = Game::start_position();
        let result = ids(
            &mut game,
            Mode::movetime(Duration::ZERO),
            50,
            None,
            Instant::now(),
        )
        .unwrap();

        assert_eq!(result.depth, 1);
        assert!(result.stopped);
        assert!(game.legal_moves(false).contains(&result.best_move));
    }

    #[test]
    fn position_restored_after_search() {
        let mut game = Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let hash = game.position_hash();
        ids(&mut game, Mode::depth(2), 50, None, Instant::now()).unwrap();
        assert_eq!(game.position_hash(), hash);
        assert_eq!(game.ply_count(), 0);
    }
}
