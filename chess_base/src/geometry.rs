use crate::types::{CastlingSide, Color, File, PieceKind, Rank};

// All offsets are (file delta, rank delta) pairs for `Coord::try_shift`.
// Rank deltas follow the rank indexing: negative moves toward the top of
// the board (Black's back rank).

pub const ROOK_DIRS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub const BISHOP_DIRS: [(isize, isize); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

pub const QUEEN_DIRS: [(isize, isize); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

pub const KNIGHT_HOPS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_STEPS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const fn ray_dirs(kind: PieceKind) -> &'static [(isize, isize)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRS,
        PieceKind::Bishop => &BISHOP_DIRS,
        PieceKind::Queen => &QUEEN_DIRS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}

// Rank delta of a single pawn step.
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

// Promotion fires on either end of the board, whoever reaches it.
pub const fn is_promotion_rank(r: Rank) -> bool {
    matches!(r, Rank::R8 | Rank::R1)
}

pub const fn rook_home_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::Queen => File::A,
        CastlingSide::King => File::H,
    }
}

// File delta of the king's castling move.
pub const fn king_castling_delta(s: CastlingSide) -> isize {
    match s {
        CastlingSide::Queen => -2,
        CastlingSide::King => 2,
    }
}

// Files between the king's home file and the rook that must be empty.
pub const fn castling_transit_files(s: CastlingSide) -> &'static [File] {
    match s {
        CastlingSide::Queen => &[File::B, File::C, File::D],
        CastlingSide::King => &[File::F, File::G],
    }
}
