//! The one-ply legality filter

use crate::board::Board;
use crate::movegen::{can_capture_king, generate_moves};
use crate::moves::{apply_move, undo_move, Move};

/// Strips the moves which leave the mover's king capturable
///
/// For every pseudo-legal move of the side to move, the filter applies the
/// move with the executor, regenerates the opponent's replies and checks
/// whether any of them captures a king of the mover's color; if so, the
/// move is removed from its piece's list. "In check" is never computed
/// directly, it is only inferred through this capture-threat simulation.
///
/// Every simulation is rolled back exactly, so the pieces, their counters
/// and flags, the side to move and the capture lists end up untouched. The
/// opposing side's move lists serve as scratch space for the replies and
/// are left holding the last simulation's output; they must be regenerated
/// before being read.
///
/// # Example
///
/// ```
/// # use finchess::board::Board;
/// # use finchess::legal::filter_legal_moves;
/// # use finchess::movegen::generate_moves;
/// # use finchess::types::{File, Rank};
/// #
/// // The knight on e2 shields its king from the rook and may not move.
/// let mut b = Board::from_placement("4r3/8/8/8/8/8/4N3/4K3").unwrap();
/// generate_moves(&mut b);
/// filter_legal_moves(&mut b);
/// assert!(b.get2(File::E, Rank::R2).unwrap().moves().is_empty());
/// ```
pub fn filter_legal_moves(b: &mut Board) {
    let side = b.side();
    let candidates: Vec<Move> = b
        .pieces()
        .filter(|(_, p)| p.color() == side)
        .flat_map(|(_, p)| p.moves().iter().copied())
        .collect();

    let mut illegal = Vec::new();
    for mv in candidates {
        let u = apply_move(b, mv);
        generate_moves(b);
        if can_capture_king(b, side.inv()) {
            illegal.push(mv);
        }
        undo_move(b, mv, u);
    }

    if illegal.is_empty() {
        return;
    }
    for p in b.pieces.iter_mut() {
        if p.alive && p.color == side {
            p.moves.retain(|m| !illegal.contains(m));
        }
    }
}
