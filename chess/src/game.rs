//! Game state machine driving a chess party through square selections

use crate::board::{Board, Piece, PieceId};
use crate::legal::filter_legal_moves;
use crate::movegen::{can_capture_king, generate_for, generate_moves};
use crate::moves::{apply_move, Move};
use crate::types::{Color, Coord, File, Outcome, PieceKind, Rank};

/// A chess party driven by square selections
///
/// Owns the board, the selection state and the game result. A presentation
/// layer feeds it [`select_square()`](Game::select_square) events and reads
/// back the position, the picked-up piece with its legal destinations, the
/// capture lists and the outcome. The engine draws nothing and performs no
/// I/O.
///
/// # Example
///
/// ```
/// # use finchess::game::Game;
/// # use finchess::types::{Color, File, Rank};
/// #
/// let mut game = Game::new();
/// // White plays e4: pick the pawn up, then put it down.
/// game.select_square(File::E, Rank::R2);
/// game.select_square(File::E, Rank::R4);
/// assert_eq!(game.side_to_move(), Color::Black);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    picked_up: Option<PieceId>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a game with the standard starting position, White to move
    pub fn new() -> Game {
        let mut res = Game {
            board: Board::initial(),
            picked_up: None,
            outcome: None,
        };
        res.refresh();
        res
    }

    /// Rebuilds the standard starting game
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Loads a position from a placement string, tolerating malformed input
    ///
    /// See [`Board::from_layout`] for the parsing rules. The side to move is
    /// reset to White; use [`Game::set_side_to_move`] afterwards for a
    /// different starting side. The selection, capture lists, last-move
    /// squares and outcome are all reset, and the loaded position is
    /// immediately generated, filtered and checked for a result.
    pub fn load_position(&mut self, s: &str) {
        self.board = Board::from_layout(s);
        self.picked_up = None;
        self.refresh();
    }

    /// Sets the side to move and recomputes its legal moves
    ///
    /// Drops the selection, if any.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.board.side = color;
        self.picked_up = None;
        self.refresh();
    }

    /// Feeds a square selection into the game
    ///
    /// With nothing picked up, selecting a square holding a piece of the
    /// side to move with at least one legal move picks that piece up and
    /// clears the last-move squares; any other square is a no-op. With a
    /// piece picked up, selecting one of its legal destinations executes
    /// the move and flips the turn; any other square just drops the
    /// selection.
    ///
    /// Once the game has ended the side to move has no legal moves left, so
    /// every selection is a no-op.
    pub fn select_square(&mut self, file: File, rank: Rank) {
        let pos = Coord::from_parts(file, rank);
        match self.picked_up {
            None => self.pick_up(pos),
            Some(id) => {
                let mv = self
                    .board
                    .piece(id)
                    .moves()
                    .iter()
                    .copied()
                    .find(|m| m.dst() == pos);
                self.picked_up = None;
                if let Some(mv) = mv {
                    self.make_move(mv);
                }
            }
        }
    }

    fn pick_up(&mut self, pos: Coord) {
        if let Some(id) = self.board.id_at(pos) {
            let p = self.board.piece(id);
            if p.color() == self.board.side() && !p.moves().is_empty() {
                self.picked_up = Some(id);
                self.board.last_move = None;
            }
        }
    }

    fn make_move(&mut self, mv: Move) {
        apply_move(&mut self.board, mv);
        // The new side to move gets its en passant windows closed before
        // its moves are regenerated.
        let side = self.board.side();
        for p in self.board.pieces.iter_mut() {
            if p.alive && p.color == side {
                p.just_moved = false;
            }
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        generate_moves(&mut self.board);
        filter_legal_moves(&mut self.board);
        self.outcome = self.evaluate_outcome();
    }

    // A side left with no legal move ends the game. One extra generation
    // pass over the opponent decides between a win and stalemate.
    fn evaluate_outcome(&mut self) -> Option<Outcome> {
        let side = self.board.side();
        let stuck = !self
            .board
            .pieces()
            .filter(|(_, p)| p.color() == side)
            .any(|(_, p)| !p.moves().is_empty());
        if !stuck {
            return None;
        }
        generate_for(&mut self.board, side.inv());
        if can_capture_king(&self.board, side.inv()) {
            Some(Outcome::Win(side.inv()))
        } else {
            Some(Outcome::Draw)
        }
    }

    /// Returns the current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns side to move
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side()
    }

    /// Returns the picked-up piece, if any
    ///
    /// The piece's legal destinations are available through
    /// [`Piece::moves()`].
    #[inline]
    pub fn picked_up(&self) -> Option<&Piece> {
        self.picked_up.map(|id| self.board.piece(id))
    }

    /// Returns the origin and destination squares of the last executed move
    #[inline]
    pub fn last_move(&self) -> Option<(Coord, Coord)> {
        self.board.last_move()
    }

    /// Returns the kinds captured by pieces of color `c`, in capture order
    #[inline]
    pub fn taken(&self, c: Color) -> &[PieceKind] {
        self.board.taken(c)
    }

    /// Returns the game result, if the game has ended
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns `true` if the game has ended
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
