//! Pseudo-legal move generation

use crate::board::{Board, PieceId};
use crate::geometry;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingSide, Color, Coord, PieceKind};

use arrayvec::ArrayVec;
use derive_more::{Deref, DerefMut, IntoIterator};

/// List of moves generated for a single piece
///
/// Wraps [`ArrayVec`], so it is allocated on the stack and dereferences to
/// a slice of [`Move`]. The capacity suffices for any single piece.
#[derive(Default, Debug, Clone, Eq, PartialEq, Deref, DerefMut, IntoIterator)]
#[into_iterator(owned, ref, ref_mut)]
pub struct MoveList(ArrayVec<Move, 32>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

// Returns `false` if a ray must stop at `dst`.
fn try_add(b: &Board, id: PieceId, dst: Coord, out: &mut MoveList) -> bool {
    let piece = b.piece(id);
    match b.id_at(dst) {
        Some(other) if b.piece(other).color() == piece.color() => false,
        Some(victim) => {
            out.push(Move::new(
                id,
                MoveKind::Capture(victim),
                piece.pos(),
                dst,
                piece.kind(),
            ));
            false
        }
        None => {
            out.push(Move::new(id, MoveKind::Quiet, piece.pos(), dst, piece.kind()));
            true
        }
    }
}

fn gen_slider(b: &Board, id: PieceId, out: &mut MoveList) {
    let piece = b.piece(id);
    let src = piece.pos();
    for &(df, dr) in geometry::ray_dirs(piece.kind()) {
        for dist in 1..=7 {
            let dst = match src.try_shift(df * dist, dr * dist) {
                Some(c) => c,
                None => break,
            };
            if !try_add(b, id, dst, out) {
                break;
            }
        }
    }
}

fn gen_knight(b: &Board, id: PieceId, out: &mut MoveList) {
    let src = b.piece(id).pos();
    for &(df, dr) in &geometry::KNIGHT_HOPS {
        if let Some(dst) = src.try_shift(df, dr) {
            try_add(b, id, dst, out);
        }
    }
}

fn gen_castling(b: &Board, id: PieceId, side: CastlingSide, out: &mut MoveList) {
    let king = b.piece(id);
    let rank = king.rank();
    let rook = match b.id_at(Coord::from_parts(geometry::rook_home_file(side), rank)) {
        Some(r) => r,
        None => return,
    };
    let r = b.piece(rook);
    if r.kind() != PieceKind::Rook || r.color() != king.color() || r.times_moved() != 0 {
        return;
    }
    // Any occupant blocks the fixed transit files, whatever its color. King
    // safety on the way is left to the legality filter.
    if geometry::castling_transit_files(side)
        .iter()
        .any(|&f| b.get2(f, rank).is_some())
    {
        return;
    }
    if let Some(dst) = king.pos().try_shift(geometry::king_castling_delta(side), 0) {
        out.push(Move::new(
            id,
            MoveKind::Castle(rook),
            king.pos(),
            dst,
            king.kind(),
        ));
    }
}

fn gen_king(b: &Board, id: PieceId, out: &mut MoveList) {
    let src = b.piece(id).pos();
    for &(df, dr) in &geometry::KING_STEPS {
        if let Some(dst) = src.try_shift(df, dr) {
            try_add(b, id, dst, out);
        }
    }
    if b.piece(id).times_moved() == 0 {
        gen_castling(b, id, CastlingSide::Queen, out);
        gen_castling(b, id, CastlingSide::King, out);
    }
}

fn gen_pawn(b: &Board, id: PieceId, out: &mut MoveList) {
    let pawn = b.piece(id);
    let src = pawn.pos();
    let forward = geometry::pawn_forward_delta(pawn.color());

    if let Some(dst) = src.try_shift(0, forward) {
        if b.get(dst).is_none() {
            out.push(Move::new(id, MoveKind::Quiet, src, dst, pawn.kind()));
        }
    }
    // Only the landing square gates the double step; the square in between
    // is not inspected.
    if pawn.times_moved() == 0 {
        if let Some(dst) = src.try_shift(0, forward * 2) {
            if b.get(dst).is_none() {
                out.push(Move::new(id, MoveKind::Quiet, src, dst, pawn.kind()));
            }
        }
    }

    for df in [-1, 1] {
        let dst = match src.try_shift(df, forward) {
            Some(c) => c,
            None => continue,
        };
        if let Some(victim) = b.id_at(dst) {
            if b.piece(victim).color() != pawn.color() {
                out.push(Move::new(
                    id,
                    MoveKind::Capture(victim),
                    src,
                    dst,
                    pawn.kind(),
                ));
            }
            continue;
        }
        // En passant: an enemy pawn beside us, fresh from its double step,
        // is captured by landing on the empty square behind it.
        if let Some(beside) = src.try_shift(df, 0) {
            if let Some(victim) = b.id_at(beside) {
                let v = b.piece(victim);
                if v.color() != pawn.color()
                    && v.kind() == PieceKind::Pawn
                    && v.times_moved() == 1
                    && v.moved_ranks().abs() == 2
                    && v.just_moved()
                {
                    out.push(Move::new(
                        id,
                        MoveKind::EnPassant(victim),
                        src,
                        dst,
                        pawn.kind(),
                    ));
                }
            }
        }
    }
}

fn gen_piece(b: &Board, id: PieceId) -> MoveList {
    let mut res = MoveList::new();
    match b.piece(id).kind() {
        PieceKind::Pawn => gen_pawn(b, id, &mut res),
        PieceKind::Knight => gen_knight(b, id, &mut res),
        PieceKind::King => gen_king(b, id, &mut res),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => gen_slider(b, id, &mut res),
    }
    res
}

/// Regenerates the move lists of all the side to move's pieces
///
/// Every alive piece of the side to move gets a fresh pseudo-legal
/// destination set, discarding its previous one; pieces of the opposite side
/// keep their lists. Generation is a pure function of the position, so
/// running it twice in a row yields the same sets.
///
/// The resulting lists ignore king safety. Use
/// [`filter_legal_moves()`](crate::legal::filter_legal_moves) to strip the
/// moves which lose the king.
///
/// # Example
///
/// ```
/// # use finchess::board::Board;
/// # use finchess::movegen::generate_moves;
/// # use finchess::types::{File, Rank};
/// #
/// let mut b = Board::initial();
/// generate_moves(&mut b);
/// let pawn = b.get2(File::E, Rank::R2).unwrap();
/// assert_eq!(pawn.moves().len(), 2);
/// ```
pub fn generate_moves(b: &mut Board) {
    generate_for(b, b.side());
}

/// Regenerates the move lists of all alive pieces of color `color`
pub(crate) fn generate_for(b: &mut Board, color: Color) {
    for idx in 0..b.pieces.len() {
        let id = PieceId::from_index(idx);
        let p = b.piece(id);
        if !p.alive || p.color() != color {
            continue;
        }
        let moves = gen_piece(b, id);
        b.piece_mut(id).moves = moves;
    }
}

/// Returns `true` if any generated move of `side`'s pieces captures a king
///
/// Only the lists as they currently stand are consulted; the caller is
/// responsible for having generated them for the position in question.
pub(crate) fn can_capture_king(b: &Board, side: Color) -> bool {
    b.pieces()
        .filter(|(_, p)| p.color() == side)
        .flat_map(|(_, p)| p.moves().iter())
        .any(|m| match m.captured() {
            Some(victim) => b.piece(victim).kind() == PieceKind::King,
            None => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};
    use std::collections::BTreeSet;

    fn dests(b: &Board, file: File, rank: Rank) -> BTreeSet<String> {
        b.get2(file, rank)
            .unwrap()
            .moves()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn set<const N: usize>(items: [&str; N]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial() {
        let mut b = Board::initial();
        generate_moves(&mut b);

        assert_eq!(dests(&b, File::E, Rank::R2), set(["e2e3", "e2e4"]));
        assert_eq!(dests(&b, File::B, Rank::R1), set(["b1a3", "b1c3"]));
        assert_eq!(dests(&b, File::A, Rank::R1), set([]));
        assert_eq!(dests(&b, File::D, Rank::R1), set([]));
        assert_eq!(dests(&b, File::E, Rank::R1), set([]));

        // Pieces of the side not to move are left untouched.
        assert!(b.get2(File::E, Rank::R7).unwrap().moves().is_empty());

        let total: usize = b
            .pieces()
            .filter(|(_, p)| p.color() == Color::White)
            .map(|(_, p)| p.moves().len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_rays() {
        let mut b = Board::from_placement("6k1/8/1q6/8/1R2p3/8/1P6/K7").unwrap();
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::B, Rank::R4),
            set(["b4b5", "b4b6", "b4b3", "b4a4", "b4c4", "b4d4", "b4e4"])
        );

        let rook = b.get2(File::B, Rank::R4).unwrap();
        let cap = rook
            .moves()
            .iter()
            .find(|m| m.dst() == Coord::from_parts(File::B, Rank::R6))
            .unwrap();
        match cap.kind() {
            MoveKind::Capture(victim) => assert_eq!(b.piece(victim).kind(), PieceKind::Queen),
            k => panic!("unexpected move kind: {:?}", k),
        }
        let quiet = rook
            .moves()
            .iter()
            .find(|m| m.dst() == Coord::from_parts(File::B, Rank::R5))
            .unwrap();
        assert_eq!(quiet.kind(), MoveKind::Quiet);

        let mut b = Board::from_placement("8/8/5p2/8/3B4/8/1P6/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::D, Rank::R4),
            set([
                "d4e5", "d4f6", "d4c5", "d4b6", "d4a7", "d4e3", "d4f2", "d4g1", "d4c3",
            ])
        );
    }

    #[test]
    fn test_knight() {
        let mut b = Board::from_placement("8/8/8/8/3N4/1P6/8/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::D, Rank::R4),
            set(["d4b5", "d4c6", "d4e6", "d4f5", "d4f3", "d4e2", "d4c2"])
        );

        let mut b = Board::from_placement("8/8/8/8/8/8/8/N7").unwrap();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::A, Rank::R1), set(["a1b3", "a1c2"]));
    }

    #[test]
    fn test_castling() {
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::E, Rank::R1),
            set(["e1d1", "e1d2", "e1e2", "e1f2", "e1f1", "e1c1", "e1g1"])
        );
        let king = b.get2(File::E, Rank::R1).unwrap();
        let castle = king
            .moves()
            .iter()
            .find(|m| m.dst() == Coord::from_parts(File::G, Rank::R1))
            .unwrap();
        assert_eq!(
            castle.castling_rook(),
            b.id_at(Coord::from_parts(File::H, Rank::R1))
        );

        b.side = Color::Black;
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::E, Rank::R8),
            set(["e8d8", "e8d7", "e8e7", "e8f7", "e8f8", "e8c8", "e8g8"])
        );
    }

    #[test]
    fn test_castling_denied() {
        // A blocked transit file kills that side's candidacy only.
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/RN2K2R").unwrap();
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::E, Rank::R1),
            set(["e1d1", "e1d2", "e1e2", "e1f2", "e1f1", "e1g1"])
        );

        // A rook that has already moved no longer qualifies.
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let rook = b.id_at(Coord::from_parts(File::H, Rank::R1)).unwrap();
        b.piece_mut(rook).times_moved = 1;
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::E, Rank::R1),
            set(["e1d1", "e1d2", "e1e2", "e1f2", "e1f1", "e1c1"])
        );

        // Same for the king, on both sides at once.
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let king = b.id_at(Coord::from_parts(File::E, Rank::R1)).unwrap();
        b.piece_mut(king).times_moved = 2;
        generate_moves(&mut b);
        assert_eq!(
            dests(&b, File::E, Rank::R1),
            set(["e1d1", "e1d2", "e1e2", "e1f2", "e1f1"])
        );

        // The piece on the home file must be a rook of the king's own color.
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2N").unwrap();
        generate_moves(&mut b);
        let d = dests(&b, File::E, Rank::R1);
        assert!(d.contains("e1c1"));
        assert!(!d.contains("e1g1"));

        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2r").unwrap();
        generate_moves(&mut b);
        let d = dests(&b, File::E, Rank::R1);
        assert!(d.contains("e1c1"));
        assert!(!d.contains("e1g1"));
    }

    #[test]
    fn test_pawn() {
        // Only the landing square gates the double step, so the pawn jumps
        // over its blocker.
        let mut b = Board::from_placement("8/8/8/8/8/3p4/3P4/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R2), set(["d2d4"]));

        // Captures go to the forward diagonals.
        let mut b = Board::from_placement("8/8/8/8/2ppp3/3P4/8/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R3), set(["d3c4", "d3e4", "d3d5"]));

        // Friendly pieces are never capture targets.
        let mut b = Board::from_placement("8/8/8/8/2P1P3/3P4/8/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R3), set(["d3d4", "d3d5"]));

        // Black pawns move toward the larger rank indices.
        let mut b = Board::from_placement("8/3p4/8/8/8/8/8/8").unwrap();
        b.side = Color::Black;
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R7), set(["d7d6", "d7d5"]));

        // A pawn on the edge of the board generates nothing.
        let mut b = Board::from_placement("P7/8/8/8/8/8/8/8").unwrap();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::A, Rank::R8), set([]));
    }

    fn ep_board() -> (Board, PieceId) {
        let mut b = Board::from_placement("8/8/8/3Pp3/8/8/8/8").unwrap();
        let id = b.id_at(Coord::from_parts(File::E, Rank::R5)).unwrap();
        let p = b.piece_mut(id);
        p.times_moved = 1;
        p.moved_ranks = -2;
        p.just_moved = true;
        (b, id)
    }

    #[test]
    fn test_enpassant() {
        let (mut b, victim) = ep_board();
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R5), set(["d5d6", "d5d7", "d5e6"]));
        let pawn = b.get2(File::D, Rank::R5).unwrap();
        let ep = pawn
            .moves()
            .iter()
            .find(|m| m.dst() == Coord::from_parts(File::E, Rank::R6))
            .unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassant(victim));

        // The offer expires together with the victim's `just_moved` flag.
        let (mut b, victim) = ep_board();
        b.piece_mut(victim).just_moved = false;
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R5), set(["d5d6", "d5d7"]));

        // A later move of the victim closes the window as well.
        let (mut b, victim) = ep_board();
        b.piece_mut(victim).times_moved = 2;
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R5), set(["d5d6", "d5d7"]));

        // A single-step arrival does not qualify.
        let (mut b, victim) = ep_board();
        b.piece_mut(victim).moved_ranks = -1;
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R5), set(["d5d6", "d5d7"]));

        // Only pawns can be captured en passant.
        let (mut b, victim) = ep_board();
        b.piece_mut(victim).kind = PieceKind::Rook;
        generate_moves(&mut b);
        assert_eq!(dests(&b, File::D, Rank::R5), set(["d5d6", "d5d7"]));

        // An occupant behind the victim turns the move into a plain capture
        // of the occupant.
        let mut b = Board::from_placement("8/8/4n3/3Pp3/8/8/8/8").unwrap();
        let victim = b.id_at(Coord::from_parts(File::E, Rank::R5)).unwrap();
        {
            let p = b.piece_mut(victim);
            p.times_moved = 1;
            p.moved_ranks = -2;
            p.just_moved = true;
        }
        generate_moves(&mut b);
        let pawn = b.get2(File::D, Rank::R5).unwrap();
        let m = pawn
            .moves()
            .iter()
            .find(|m| m.dst() == Coord::from_parts(File::E, Rank::R6))
            .unwrap();
        assert!(matches!(m.kind(), MoveKind::Capture(_)));
    }

    #[test]
    fn test_idempotent() {
        let mut b =
            Board::from_placement("r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R")
                .unwrap();
        generate_moves(&mut b);
        let first = b.clone();
        generate_moves(&mut b);
        assert_eq!(b, first);
    }

    #[test]
    fn test_corners() {
        let mut b = Board::from_placement("q6N/8/8/8/8/8/8/N6q").unwrap();
        for color in [Color::White, Color::Black] {
            b.side = color;
            generate_moves(&mut b);
        }
        for (_, p) in b.pieces() {
            for m in p.moves() {
                assert!(m.dst().file().index() < 8);
                assert!(m.dst().rank().index() < 8);
            }
        }
        assert_eq!(dests(&b, File::H, Rank::R8), set(["h8g6", "h8f7"]));
        assert_eq!(b.get2(File::A, Rank::R8).unwrap().moves().len(), 20);
    }
}
