//! Move representation and the move executor

use crate::board::{Board, PieceId};
use crate::geometry;
use crate::types::{Coord, File, PieceKind};

use std::fmt::{self, Display};

/// Kind of the move
///
/// Captures and special moves carry the identifier of the second piece they
/// involve, so the executor can apply and undo their side effects exactly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square
    Quiet,
    /// Capture of the piece standing on the destination square
    Capture(PieceId),
    /// En passant capture of the given pawn
    ///
    /// The destination square is empty; the captured pawn stands next to it
    /// on the mover's own rank.
    EnPassant(PieceId),
    /// Castling with the given rook
    ///
    /// The destination square is the king's one; the rook relocates next to
    /// it as a side effect.
    Castle(PieceId),
}

impl MoveKind {
    /// Returns `true` if the move takes a piece off the board
    #[inline]
    pub const fn is_capture(&self) -> bool {
        matches!(self, MoveKind::Capture(_) | MoveKind::EnPassant(_))
    }
}

/// A move on the board
///
/// Stores the pre-move square and kind of the mover alongside the
/// destination, which is enough to both execute the move and reverse it
/// later. Moves are produced by the generator and stay valid until the
/// position changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    piece: PieceId,
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    src_kind: PieceKind,
}

impl Move {
    pub(crate) const fn new(
        piece: PieceId,
        kind: MoveKind,
        src: Coord,
        dst: Coord,
        src_kind: PieceKind,
    ) -> Move {
        Move {
            piece,
            kind,
            src,
            dst,
            src_kind,
        }
    }

    /// Returns the identifier of the moved piece
    #[inline]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    /// Returns the kind of `self`
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the kind the moved piece had before the move
    ///
    /// Differs from the piece's current kind only after a promotion.
    #[inline]
    pub const fn src_kind(&self) -> PieceKind {
        self.src_kind
    }

    /// Returns the identifier of the captured piece, if any
    #[inline]
    pub const fn captured(&self) -> Option<PieceId> {
        match self.kind {
            MoveKind::Capture(id) | MoveKind::EnPassant(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the identifier of the rook taking part in castling, if any
    #[inline]
    pub const fn castling_rook(&self) -> Option<PieceId> {
        match self.kind {
            MoveKind::Castle(id) => Some(id),
            _ => None,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Token with the data required to undo a move
///
/// Returned by [`apply_move()`] and consumed by [`undo_move()`]. Tokens must
/// be spent in the reverse order of the moves they were created for.
#[derive(Debug, Copy, Clone)]
pub struct MoveUndo {
    last_move: Option<(Coord, Coord)>,
    moved_ranks: i8,
    just_moved: bool,
}

/// Executes the move `mv` on the board `b`
///
/// The move must have been generated for the current position on `b`,
/// otherwise the board state becomes inconsistent.
///
/// To allow reversing the move, a [`MoveUndo`] instance is returned. See
/// [`undo_move()`] for the details on how to undo a move.
pub fn apply_move(b: &mut Board, mv: Move) -> MoveUndo {
    let mover = b.piece(mv.piece);
    let mover_color = mover.color();
    let old_rank = mover.rank();
    let undo = MoveUndo {
        last_move: b.last_move,
        moved_ranks: mover.moved_ranks,
        just_moved: mover.just_moved,
    };

    match mv.kind {
        MoveKind::Capture(victim) | MoveKind::EnPassant(victim) => {
            let kind = b.piece(victim).kind;
            b.piece_mut(victim).alive = false;
            b.taken_mut(mover_color).push(kind);
        }
        MoveKind::Castle(rook) => {
            // The rook still stands on its home file at this point.
            let file = if b.piece(rook).file() == File::A {
                File::from_index(mv.dst.file().index() + 1)
            } else {
                File::from_index(mv.dst.file().index() - 1)
            };
            b.piece_mut(rook).pos = Coord::from_parts(file, mv.dst.rank());
        }
        MoveKind::Quiet => {}
    }

    b.last_move = Some((mv.src, mv.dst));

    let p = b.piece_mut(mv.piece);
    p.moved_ranks = old_rank.index() as i8 - mv.dst.rank().index() as i8;
    p.pos = mv.dst;
    p.times_moved += 1;
    p.just_moved = true;
    if p.kind == PieceKind::Pawn && geometry::is_promotion_rank(mv.dst.rank()) {
        p.kind = PieceKind::Queen;
    }

    b.side = b.side.inv();

    undo
}

/// Reverses the move `mv` on the board `b`
///
/// `u` must be the token returned by the corresponding [`apply_move()`]
/// call, and the moves made since then must have been undone already. The
/// captured piece (if any) revives on its old square, the castling rook (if
/// any) returns home, and the mover's position, kind, counters and transient
/// flags are restored, so the resulting board compares equal to the one
/// `apply_move()` was called on.
pub fn undo_move(b: &mut Board, mv: Move, u: MoveUndo) {
    b.side = b.side.inv();

    let mover_color = b.piece(mv.piece).color();
    let p = b.piece_mut(mv.piece);
    p.kind = mv.src_kind;
    p.pos = mv.src;
    p.times_moved -= 1;
    p.moved_ranks = u.moved_ranks;
    p.just_moved = u.just_moved;

    b.last_move = u.last_move;

    match mv.kind {
        MoveKind::Capture(victim) | MoveKind::EnPassant(victim) => {
            b.piece_mut(victim).alive = true;
            b.taken_mut(mover_color).pop();
        }
        MoveKind::Castle(rook) => {
            // The rook stands next to the king's destination, so its home
            // file is decided by which side of that square it is on.
            let home = if b.piece(rook).file().index() > mv.dst.file().index() {
                File::A
            } else {
                File::H
            };
            b.piece_mut(rook).pos = Coord::from_parts(home, mv.dst.rank());
        }
        MoveKind::Quiet => {}
    }
}
