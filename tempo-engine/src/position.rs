//! The board interface consumed by search.
//!
//! Search, evaluation and move ordering never touch a board directly. They go
//! through `SearchPosition`, which a host chess library implements. Squares,
//! pieces, colors, bitboards and moves use the `chess` crate's types.
//! [`Game`](crate::Game) is the stock implementation.

use chess::{BitBoard, ChessMove, Color, Piece, Square};

use crate::coretypes::MoveList;

pub trait SearchPosition {
    /// Legal moves of the player to move, in the host's enumeration order.
    /// With `captures_only`, only moves that capture a piece (en passant included).
    fn legal_moves(&self, captures_only: bool) -> MoveList;

    /// Applies a legal move. Must be paired with `undo_move` in stack order.
    fn make_move(&mut self, move_: ChessMove);

    /// Reverts the most recent `make_move`, which must have been `move_`.
    fn undo_move(&mut self, move_: ChessMove);

    /// Returns true if the player to move is in check.
    fn is_in_check(&self) -> bool;

    /// Returns true if this position already occurred earlier in the game or search path.
    fn is_repeated_position(&self) -> bool;

    /// Zobrist style hash, stable under make/undo.
    fn position_hash(&self) -> u64;

    fn side_to_move(&self) -> Color;

    /// Every occupied square.
    fn occupancy(&self) -> BitBoard;

    /// Squares occupied by `color`.
    fn color_occupancy(&self, color: Color) -> BitBoard;

    fn piece_on(&self, square: Square) -> Option<(Piece, Color)>;

    /// Squares attacked by a `color` `piece` standing on `square`, given blockers `occupancy`.
    fn attacked_squares(
        &self,
        piece: Piece,
        square: Square,
        occupancy: BitBoard,
        color: Color,
    ) -> BitBoard;

    /// Returns true if any piece of the player not to move attacks `square`.
    fn is_square_attacked_by_opponent(&self, square: Square) -> bool;

    /// Piece captured by a move, or None for a quiet move.
    fn captured_piece(&self, move_: ChessMove) -> Option<Piece> {
        match self.piece_on(move_.get_dest()) {
            Some((piece, _)) => Some(piece),
            None => {
                let is_pawn = matches!(self.piece_on(move_.get_source()), Some((Piece::Pawn, _)));
                let changes_file = move_.get_source().get_file() != move_.get_dest().get_file();
                (is_pawn && changes_file).then_some(Piece::Pawn)
            }
        }
    }
}
