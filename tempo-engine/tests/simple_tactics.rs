//! Simple Tactics
//!
//! Tests to ensure engine passes basic strength tests.
//! They should find the best move with a small depth.

use chess::{ChessMove, Square};

use tempo_engine::coretypes::Cp;
use tempo_engine::search::negamax;
use tempo_engine::*;

fn search_depth(fen: &str, depth: i32) -> SearchResult {
    let mut game = Game::from_fen(fen).unwrap();
    let mut engine = EngineBuilder::new().transpositions_mb(4).build().unwrap();
    engine.search(&mut game, Mode::depth(depth)).unwrap()
}

#[test]
fn take_undefended_queen() {
    let pos = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
    let bm = ChessMove::new(Square::E4, Square::D5, None);

    for depth in 1..=3 {
        let result = search_depth(pos, depth);
        assert_eq!(result.best_move, bm);
        assert!(result.score > Cp(0));
    }
}

#[test]
fn do_not_take_defended_pawn_with_queen() {
    // Qxd5 is answered by cxd5.
    let pos = "4k3/8/2p5/3p4/8/8/3Q4/4K3 w - - 0 1";
    let blunder = ChessMove::new(Square::D2, Square::D5, None);

    let mut game = Game::from_fen(pos).unwrap();
    let result = negamax(&mut game, 1, None).unwrap();
    assert_ne!(result.best_move, blunder);
    assert!(result.score > Cp(0));
}

#[test]
fn knight_fork_wins_rook() {
    let pos = "r3k3/8/8/1N6/8/8/8/4K3 w - - 0 1";
    let bm = ChessMove::new(Square::B5, Square::C7, None);
    let result = search_depth(pos, 3);

    assert_eq!(result.best_move, bm);
    assert!(result.score > Cp(0));
}

#[test]
fn recapture_restores_balance() {
    // After 1. e4 d5 2. exd5, black should take back the pawn.
    let pos = "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2";
    let bm = ChessMove::new(Square::D8, Square::D5, None);
    let result = search_depth(pos, 1);
    assert_eq!(result.best_move, bm);
}
