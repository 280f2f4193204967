//! Static evaluation of a position.
//!
//! Each piece is worth its material value plus a bonus for every square it attacks.
//! Pieces of the player to move count positively and opponent pieces negatively,
//! which is the sign convention negamax expects.
//! There are no positional, pawn structure or king safety terms.

use chess::{Piece, NUM_PIECES};

use crate::coretypes::{Cp, CpKind};
use crate::position::SearchPosition;

// Indexed by `Piece::to_index`: Pawn, Knight, Bishop, Rook, Queen, King.
const PIECE_VALUES: [CpKind; NUM_PIECES] = [50, 160, 165, 300, 800, 10_000];
const MOBILITY_BONUS: [CpKind; NUM_PIECES] = [23, 18, 12, 14, 4, 0];

/// Value of a single piece attacking `num_attacks` squares, from its owner's point of view.
pub fn piece_value(piece: Piece, num_attacks: u32) -> Cp {
    let index = piece.to_index();
    Cp(PIECE_VALUES[index] + MOBILITY_BONUS[index] * num_attacks as CpKind)
}

/// Primary evaluate function for engine.
/// Returns a score relative to the player to move.
///
/// Only a piece's own side blocks its rays, so a slider attacks through opponent pieces.
pub fn evaluate<P: SearchPosition>(position: &P) -> Cp {
    let player = position.side_to_move();
    let mut cp = Cp::default();

    for square in position.occupancy() {
        if let Some((piece, color)) = position.piece_on(square) {
            let blockers = position.color_occupancy(color);
            let attacks = position.attacked_squares(piece, square, blockers, color);
            let value = piece_value(piece, attacks.popcnt());

            if color == player {
                cp += value;
            } else {
                cp -= value;
            }
        }
    }

    cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::MAX_EVALUATION;
    use crate::Game;

    /// Returns the FEN of the same position with colors swapped and the board flipped vertically.
    fn mirror_fen(fen: &str) -> String {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let swap_case = |c: char| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        };

        let placement: Vec<String> = fields[0]
            .split('/')
            .rev()
            .map(|rank| rank.chars().map(swap_case).collect())
            .collect();
        let player = if fields[1] == "w" { "b" } else { "w" };
        let castling: String = if fields[2] == "-" {
            "-".to_string()
        } else {
            let mut rights: Vec<char> = fields[2].chars().map(swap_case).collect();
            rights.sort_by_key(|c| (c.is_ascii_lowercase(), *c));
            rights.into_iter().collect()
        };
        let en_passant = fields[3]
            .replace('3', "x")
            .replace('6', "3")
            .replace('x', "6");

        format!(
            "{} {} {} {} {} {}",
            placement.join("/"),
            player,
            castling,
            en_passant,
            fields[4],
            fields[5]
        )
    }

    #[test]
    fn start_position_is_even() {
        assert_eq!(evaluate(&Game::start_position()), Cp(0));
    }

    #[test]
    fn mirrored_positions_evaluate_equally() {
        let fens = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "rnb1k1nr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RN2KBNR b - - 3 11",
            "7k/6p1/3p3p/p3p3/q3Pp1P/3P1P2/2R5/1rRK2Q1 b - - 8 44",
            "5K2/2q1P3/5kp1/7p/8/6PP/8/8 w - - 0 58",
        ];
        for fen in fens {
            let position = Game::from_fen(fen).unwrap();
            let mirrored = Game::from_fen(&mirror_fen(fen)).unwrap();
            assert_eq!(evaluate(&position), evaluate(&mirrored), "{fen}");
        }
    }

    #[test]
    fn score_is_relative_to_player() {
        // White is up a rook. Same placement, different player to move.
        let white = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let black = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        let white_eval = evaluate(&white);

        assert!(white_eval > Cp(0));
        assert_eq!(white_eval, -evaluate(&black));
    }

    #[test]
    fn rook_on_empty_board_counts_attacks() {
        // Kings cancel, leaving the rook: 7 squares up the h-file and 7 along the first rank.
        let position = Game::from_fen("k7/8/8/8/8/8/8/K6R w - - 0 1").unwrap();
        assert_eq!(evaluate(&position), piece_value(Piece::Rook, 14));
        assert!(evaluate(&position).0.abs() <= MAX_EVALUATION);
    }

    #[test]
    fn rays_pass_through_opponent_pieces() {
        // The rook sees past the a5 pawn to a8, the h1 king stops it on the first rank.
        let position = Game::from_fen("k7/8/8/p7/8/8/8/R6K w - - 0 1").unwrap();
        let expected = piece_value(Piece::Rook, 14) - piece_value(Piece::Pawn, 1);
        assert_eq!(evaluate(&position), expected);
        assert_eq!(expected, Cp(423));

        // Own pieces still block.
        let blocked = Game::from_fen("k7/8/8/P7/8/8/8/R6K w - - 0 1").unwrap();
        let expected = piece_value(Piece::Rook, 11) + piece_value(Piece::Pawn, 1);
        assert_eq!(evaluate(&blocked), expected);
    }
}
