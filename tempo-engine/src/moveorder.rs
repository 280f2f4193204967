//! Move Ordering
//!
//! Functions used for ordering a list of moves from best to worst,
//! or for picking the best move out of a list of moves.
//!
//! Move ordering is important for alpha-beta pruning performance.
//! If the best or good moves are searched early on in an alpha-beta search,
//! pruning occurs more frequently.
//!
//! Priorities, from most to least important:
//! 1. The transposition table move for the position.
//! 2. Captures onto squares the opponent does not defend.
//! 3. Defended captures, preferring valuable victims and cheap attackers.
//! 4. Quiet moves, by the number of opponent pieces attacked from the destination.

use arrayvec::ArrayVec;
use chess::{ChessMove, Piece};

use crate::coretypes::{MoveList, MAX_MOVES};
use crate::position::SearchPosition;

/// Priority of the transposition table move. Greater than any other priority.
pub const TT_MOVE_PRIORITY: i32 = 1_000_000;
/// Priority of a capture onto a square the opponent does not defend.
pub const UNDEFENDED_CAPTURE_PRIORITY: i32 = 1_000;

/// Rank of a piece kind by value, from 1 for a pawn to 6 for a king.
const fn value_rank(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 2,
        Piece::Bishop => 3,
        Piece::Rook => 4,
        Piece::Queen => 5,
        Piece::King => 6,
    }
}

/// Returns the search priority of a legal move in `position`. Greater is searched first.
pub fn score_move<P: SearchPosition>(
    position: &P,
    move_: ChessMove,
    key_move: Option<ChessMove>,
) -> i32 {
    if key_move == Some(move_) {
        return TT_MOVE_PRIORITY;
    }

    let dest = move_.get_dest();
    let (attacker, player) = match position.piece_on(move_.get_source()) {
        Some(piece_color) => piece_color,
        None => return 0,
    };

    match position.captured_piece(move_) {
        Some(_) if !position.is_square_attacked_by_opponent(dest) => UNDEFENDED_CAPTURE_PRIORITY,
        Some(victim) => value_rank(victim) * (7 - value_rank(attacker)) * 10,
        None => {
            let attacks = position.attacked_squares(attacker, dest, position.occupancy(), player);
            let targets = attacks & position.color_occupancy(!player);
            targets.popcnt() as i32
        }
    }
}

/// Moves of one node with their priorities, handed out best first.
///
/// Picking is a selection sort run lazily, so a node that cuts off early
/// never pays for ordering the moves it does not search.
/// Ties go to the move enumerated first.
pub struct MovePicker {
    scored: ArrayVec<(ChessMove, i32), MAX_MOVES>,
}

impl MovePicker {
    /// Scores every move in `moves` for `position`.
    pub fn new<P: SearchPosition>(
        position: &P,
        moves: MoveList,
        key_move: Option<ChessMove>,
    ) -> Self {
        let scored = moves
            .into_iter()
            .map(|move_| (move_, score_move(position, move_, key_move)))
            .collect();
        Self { scored }
    }
}

impl Iterator for MovePicker {
    type Item = ChessMove;

    /// Pick and return the best remaining move without allocation.
    fn next(&mut self) -> Option<ChessMove> {
        let mut best: Option<(usize, i32)> = None;
        for (index, (_, priority)) in self.scored.iter().enumerate() {
            if best.map_or(true, |(_, best_priority)| *priority > best_priority) {
                best = Some((index, *priority));
            }
        }
        best.map(|(index, _)| self.scored.remove(index).0)
    }
}

/// Order all moves in a container completely, from best to worst.
pub fn order_all_moves<P: SearchPosition>(
    position: &P,
    moves: MoveList,
    key_move: Option<ChessMove>,
) -> MoveList {
    MovePicker::new(position, moves, key_move).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use chess::Square;

    fn mv(from: Square, to: Square) -> ChessMove {
        ChessMove::new(from, to, None)
    }

    #[test]
    fn undefended_queen_capture_first() {
        // Black queen on d5 can be taken by the e4 pawn and nothing defends it.
        let game = Game::from_fen("4k3/8/8/3q4/4P3/8/8/R3K2R w KQ - 0 1").unwrap();
        let capture = mv(Square::E4, Square::D5);

        assert_eq!(score_move(&game, capture, None), UNDEFENDED_CAPTURE_PRIORITY);

        for move_ in game.legal_moves(false) {
            if move_ != capture {
                assert!(game.captured_piece(move_).is_none());
                assert!(score_move(&game, move_, None) < UNDEFENDED_CAPTURE_PRIORITY);
            }
        }

        let ordered = order_all_moves(&game, game.legal_moves(false), None);
        assert_eq!(ordered[0], capture);
    }

    #[test]
    fn defended_capture_prefers_cheap_attacker() {
        // Black rook on d5 is defended by the c6 pawn, white can take with pawn or queen.
        let game = Game::from_fen("4k3/8/2p5/3r4/4P3/8/3Q4/4K3 w - - 0 1").unwrap();
        let pawn_takes = score_move(&game, mv(Square::E4, Square::D5), None);
        let queen_takes = score_move(&game, mv(Square::D2, Square::D5), None);

        assert_eq!(pawn_takes, 4 * 6 * 10);
        assert_eq!(queen_takes, 4 * 2 * 10);
        assert!(pawn_takes > queen_takes);
    }

    #[test]
    fn quiet_move_counts_attacked_pieces() {
        // Knight to c7 forks the king on e8 and rook on a8.
        let game = Game::from_fen("r3k3/8/8/1N6/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(score_move(&game, mv(Square::B5, Square::C7), None), 2);
        assert_eq!(score_move(&game, mv(Square::B5, Square::A3), None), 0);
    }

    #[test]
    fn tt_move_dominates() {
        let game = Game::from_fen("4k3/8/8/3q4/4P3/8/8/R3K2R w KQ - 0 1").unwrap();
        let key_move = mv(Square::A1, Square::A2);
        let ordered = order_all_moves(&game, game.legal_moves(false), Some(key_move));

        assert_eq!(score_move(&game, key_move, Some(key_move)), TT_MOVE_PRIORITY);
        assert_eq!(ordered[0], key_move);
        assert_eq!(ordered[1], mv(Square::E4, Square::D5));
    }

    #[test]
    fn picker_is_stable() {
        let game = Game::start_position();
        let moves = game.legal_moves(false);
        let priorities: Vec<i32> = moves
            .iter()
            .map(|move_| score_move(&game, *move_, None))
            .collect();
        let ordered = order_all_moves(&game, moves.clone(), None);

        assert_eq!(ordered.len(), moves.len());
        // Equal priorities keep enumeration order.
        for window in ordered.windows(2) {
            let index = |m: &ChessMove| moves.iter().position(|x| x == m).unwrap();
            let (a, b) = (index(&window[0]), index(&window[1]));
            assert!(priorities[a] > priorities[b] || (priorities[a] == priorities[b] && a < b));
        }
    }
}
