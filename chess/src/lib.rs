//! # finchess
//!
//! A chess rules engine driven by square selections.
//!
//! The crate keeps a full game of chess behind a two-tap interface: a side
//! picks one of its pieces up, then puts it down on one of the piece's legal
//! destinations. Move generation, the king-safety filter, captures, castling,
//! en passant, promotion and the checkmate/stalemate verdicts all live behind
//! [`Game::select_square()`]; a presentation layer only draws the observable
//! state back, so the engine fits equally under a GUI, a terminal client or a
//! test harness.
//!
//! # Example
//!
//! ```
//! use finchess::{Color, File, Game, Rank};
//!
//! let mut game = Game::new();
//!
//! // 1. e4: pick the pawn up, then put it down.
//! game.select_square(File::E, Rank::R2);
//! game.select_square(File::E, Rank::R4);
//!
//! // 1... e5
//! game.select_square(File::E, Rank::R7);
//! game.select_square(File::E, Rank::R5);
//!
//! assert_eq!(game.side_to_move(), Color::White);
//! assert!(!game.is_finished());
//! ```

pub use finchess_base::{geometry, types};

pub mod board;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;

pub use board::{Board, Piece, PieceId, PlacementParseError, PrettyStyle};
pub use game::Game;
pub use movegen::MoveList;
pub use moves::{Move, MoveKind};
pub use types::{CastlingSide, Color, Coord, File, Outcome, PieceKind, Rank};
