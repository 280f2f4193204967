//! Game structure, the stock `SearchPosition` host.

use std::fmt::{self, Display};
use std::str::FromStr;

use chess::{BitBoard, Board, ChessMove, Color, MoveGen, Piece, Square, EMPTY};

use crate::coretypes::MoveList;
use crate::error::{self, Error};
use crate::history::History;
use crate::position::SearchPosition;

/// Game contains information for an in progress game:
/// the current board, the boards it was reached from, and the history of
/// position hashes needed to recognize repetitions.
///
/// Moves applied with `make_move` during a search extend the same history,
/// so a position repeated inside the search path is recognized the same way as
/// one repeated in the game itself.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    stack: Vec<Board>,
    history: History,
}

impl Game {
    /// Create a new Game from a base board and a sequence of moves.
    /// This generates the current position by applying the sequence of moves to the base.
    /// If a move in the sequence is illegal, Err is returned.
    pub fn new(base: Board, moves: &[ChessMove]) -> error::Result<Self> {
        let mut game = Self::from(base);
        for move_ in moves {
            game.play(*move_)?;
        }
        Ok(game)
    }

    /// Create a new game in the standard chess start position.
    pub fn start_position() -> Self {
        Self::from(Board::default())
    }

    /// Parse a game with no history from a FEN string.
    pub fn from_fen(fen: &str) -> error::Result<Self> {
        fen.parse()
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies a game move, failing if it is not legal in the current position.
    pub fn play(&mut self, move_: ChessMove) -> error::Result<()> {
        if self.board.legal(move_) {
            self.make_move(move_);
            Ok(())
        } else {
            Err(Error::IllegalMove(move_))
        }
    }

    /// Number of moves made since the base position.
    pub fn ply_count(&self) -> usize {
        self.stack.len()
    }

    fn is_irreversible(&self, move_: ChessMove) -> bool {
        self.captured_piece(move_).is_some()
            || self.board.piece_on(move_.get_source()) == Some(Piece::Pawn)
    }
}

impl SearchPosition for Game {
    fn legal_moves(&self, captures_only: bool) -> MoveList {
        let moves = MoveGen::new_legal(&self.board);
        if captures_only {
            moves
                .filter(|move_| self.captured_piece(*move_).is_some())
                .collect()
        } else {
            moves.collect()
        }
    }

    fn make_move(&mut self, move_: ChessMove) {
        let is_irreversible = self.is_irreversible(move_);
        self.history.push(self.board.get_hash(), is_irreversible);
        self.stack.push(self.board);
        self.board = self.board.make_move_new(move_);
    }

    fn undo_move(&mut self, move_: ChessMove) {
        debug_assert!(
            self.stack
                .last()
                .map_or(false, |prev| prev.make_move_new(move_) == self.board),
            "undo_move {move_} does not match last made move"
        );
        if let Some(prev) = self.stack.pop() {
            self.board = prev;
            self.history.pop();
        }
    }

    fn is_in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_repeated_position(&self) -> bool {
        self.history.contains(self.board.get_hash())
    }

    fn position_hash(&self) -> u64 {
        self.board.get_hash()
    }

    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn occupancy(&self) -> BitBoard {
        *self.board.combined()
    }

    fn color_occupancy(&self, color: Color) -> BitBoard {
        *self.board.color_combined(color)
    }

    fn piece_on(&self, square: Square) -> Option<(Piece, Color)> {
        self.board
            .piece_on(square)
            .zip(self.board.color_on(square))
    }

    fn attacked_squares(
        &self,
        piece: Piece,
        square: Square,
        occupancy: BitBoard,
        color: Color,
    ) -> BitBoard {
        match piece {
            Piece::Pawn => chess::get_pawn_attacks(square, color, !EMPTY),
            Piece::Knight => chess::get_knight_moves(square),
            Piece::Bishop => chess::get_bishop_moves(square, occupancy),
            Piece::Rook => chess::get_rook_moves(square, occupancy),
            Piece::Queen => {
                chess::get_bishop_moves(square, occupancy) | chess::get_rook_moves(square, occupancy)
            }
            Piece::King => chess::get_king_moves(square),
        }
    }

    fn is_square_attacked_by_opponent(&self, square: Square) -> bool {
        let us = self.board.side_to_move();
        let theirs = *self.board.color_combined(!us);
        let occupancy = *self.board.combined();
        let pieces = |piece: Piece| *self.board.pieces(piece) & theirs;

        let diagonal = pieces(Piece::Bishop) | pieces(Piece::Queen);
        let orthogonal = pieces(Piece::Rook) | pieces(Piece::Queen);

        // A pawn of our color on `square` attacks exactly the squares their pawns attack it from.
        let attackers = chess::get_pawn_attacks(square, us, pieces(Piece::Pawn))
            | (chess::get_knight_moves(square) & pieces(Piece::Knight))
            | (chess::get_king_moves(square) & pieces(Piece::King))
            | (chess::get_bishop_moves(square, occupancy) & diagonal)
            | (chess::get_rook_moves(square, occupancy) & orthogonal);

        attackers != EMPTY
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Convert a board to a Game with no past moves.
impl From<Board> for Game {
    fn from(board: Board) -> Self {
        Self {
            board,
            stack: Vec::new(),
            history: History::new(),
        }
    }
}

impl FromStr for Game {
    type Err = Error;
    fn from_str(fen: &str) -> error::Result<Self> {
        Board::from_str(fen)
            .map(Self::from)
            .map_err(|err| Error::InvalidFen {
                fen: fen.to_string(),
                reason: err.to_string(),
            })
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
