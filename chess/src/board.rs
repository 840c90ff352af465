//! Board state and position loading

use crate::movegen::MoveList;
use crate::types::{Color, Coord, File, PieceKind, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a piece placement string in strict mode
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Stable index of a piece in the board's piece collection
///
/// The index stays valid for the whole lifetime of the position: captured
/// pieces keep their slot and are only marked dead, so identifiers held by
/// pending moves survive simulation and rollback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    pub(crate) const fn from_index(val: usize) -> PieceId {
        PieceId(val as u8)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A single chessman and its accumulated move history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) color: Color,
    pub(crate) pos: Coord,
    pub(crate) times_moved: u32,
    pub(crate) moved_ranks: i8,
    pub(crate) just_moved: bool,
    pub(crate) alive: bool,
    pub(crate) moves: MoveList,
}

impl Piece {
    fn new(kind: PieceKind, color: Color, pos: Coord) -> Piece {
        Piece {
            kind,
            color,
            pos,
            times_moved: 0,
            moved_ranks: 0,
            just_moved: false,
            alive: true,
            moves: MoveList::new(),
        }
    }

    /// Returns the current kind (a promoted pawn reads as a queen)
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn pos(&self) -> Coord {
        self.pos
    }

    #[inline]
    pub fn file(&self) -> File {
        self.pos.file()
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.pos.rank()
    }

    /// Returns how many times the piece has moved
    #[inline]
    pub fn times_moved(&self) -> u32 {
        self.times_moved
    }

    /// Returns the rank delta of the piece's most recent move (old minus new)
    #[inline]
    pub fn moved_ranks(&self) -> i8 {
        self.moved_ranks
    }

    /// Returns `true` between the piece's own move and the opponent's reply
    ///
    /// This is the window in which the piece can be captured en passant.
    #[inline]
    pub fn just_moved(&self) -> bool {
        self.just_moved
    }

    /// Returns the piece's generated destination set
    ///
    /// The list holds the piece's legal moves once its side is to move and
    /// the position has been regenerated and filtered. The waiting side's
    /// lists keep scratch from the last filtering pass instead.
    #[inline]
    pub fn moves(&self) -> &MoveList {
        &self.moves
    }
}

/// Piece-list chess board
///
/// Tracks the alive pieces, the side to move, the captured-piece lists and
/// the last-move squares. Unlike a cells array, the collection keeps dead
/// pieces in place, which makes move identifiers stable (see [`PieceId`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) side: Color,
    pub(crate) white_taken: Vec<PieceKind>,
    pub(crate) black_taken: Vec<PieceKind>,
    pub(crate) last_move: Option<(Coord, Coord)>,
}

impl Board {
    /// Returns a board with no pieces, White to move
    pub fn empty() -> Board {
        Board {
            pieces: Vec::new(),
            side: Color::White,
            white_taken: Vec::new(),
            black_taken: Vec::new(),
            last_move: None,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.spawn(PieceKind::Pawn, Color::White, Coord::from_parts(file, Rank::R2));
            res.spawn(PieceKind::Pawn, Color::Black, Coord::from_parts(file, Rank::R7));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            for (file, kind) in [
                (File::A, PieceKind::Rook),
                (File::B, PieceKind::Knight),
                (File::C, PieceKind::Bishop),
                (File::D, PieceKind::Queen),
                (File::E, PieceKind::King),
                (File::F, PieceKind::Bishop),
                (File::G, PieceKind::Knight),
                (File::H, PieceKind::Rook),
            ] {
                res.spawn(kind, color, Coord::from_parts(file, rank));
            }
        }
        res
    }

    /// Builds a board from a placement string, tolerating malformed input
    ///
    /// Parses the piece placement field of a FEN record: `/` starts the next
    /// rank, digits `1`..`8` skip that many files, letters place the matching
    /// piece with uppercase for White and lowercase for Black. Parsing stops
    /// at the first space or once 8 ranks have been consumed. Anything the
    /// parser does not understand is skipped, so bad input silently yields a
    /// partial or even empty board. Use [`Board::from_placement`] to get
    /// diagnostics instead.
    ///
    /// # Example
    ///
    /// ```
    /// # use finchess::board::Board;
    /// #
    /// let board = Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    /// assert_eq!(board, Board::initial());
    ///
    /// // Partial input is fine; the rest of the board stays empty.
    /// let partial = Board::from_layout("4k3/8/q");
    /// assert_eq!(partial.pieces().count(), 2);
    /// ```
    pub fn from_layout(s: &str) -> Board {
        let mut res = Board::empty();
        let mut file = 0_usize;
        let mut rank = 0_usize;
        for c in s.chars() {
            match c {
                ' ' => break,
                '/' => {
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        break;
                    }
                }
                '1'..='8' => file += (c as u8 - b'0') as usize,
                _ => {
                    if let Some(kind) = PieceKind::from_char(c) {
                        if file < 8 {
                            let color = if c.is_ascii_uppercase() {
                                Color::White
                            } else {
                                Color::Black
                            };
                            res.spawn(
                                kind,
                                color,
                                Coord::from_parts(
                                    File::from_index(file),
                                    Rank::from_index(rank),
                                ),
                            );
                        }
                        file += 1;
                    }
                }
            }
        }
        res
    }

    /// Parses a placement string strictly: exactly 8 ranks of 8 files
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this
    /// function instead of `from_str()` for better readability.
    #[inline]
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        Board::from_str(s)
    }

    pub(crate) fn spawn(&mut self, kind: PieceKind, color: Color, pos: Coord) -> PieceId {
        let id = PieceId::from_index(self.pieces.len());
        self.pieces.push(Piece::new(kind, color, pos));
        id
    }

    /// Returns the alive piece on the square with coordinate `c`, if any
    #[inline]
    pub fn get(&self, c: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.alive && p.pos == c)
    }

    /// Returns the alive piece on the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<&Piece> {
        self.get(Coord::from_parts(file, rank))
    }

    #[inline]
    pub(crate) fn id_at(&self, c: Coord) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.alive && p.pos == c)
            .map(PieceId::from_index)
    }

    /// Returns the piece with the given identifier, dead or alive
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Iterates over the alive pieces together with their identifiers
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(idx, p)| (PieceId::from_index(idx), p))
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the kinds captured by pieces of color `c`, in capture order
    #[inline]
    pub fn taken(&self, c: Color) -> &[PieceKind] {
        match c {
            Color::White => &self.white_taken,
            Color::Black => &self.black_taken,
        }
    }

    #[inline]
    pub(crate) fn taken_mut(&mut self, c: Color) -> &mut Vec<PieceKind> {
        match c {
            Color::White => &mut self.white_taken,
            Color::Black => &mut self.black_taken,
        }
    }

    /// Returns the origin and destination squares of the last executed move
    #[inline]
    pub fn last_move(&self) -> Option<(Coord, Coord)> {
        self.last_move
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use finchess::board::{Board, PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl FromStr for Board {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = PlacementParseError;

        let mut res = Board::empty();
        let mut file = 0_usize;
        let mut rank = 0_usize;
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    file += add;
                }
                b'/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    let c = b as char;
                    let kind = PieceKind::from_char(c).ok_or(Error::UnexpectedChar(c))?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    res.spawn(
                        kind,
                        color,
                        Coord::from_parts(File::from_index(file), Rank::from_index(rank)),
                    );
                    file += 1;
                }
            };
        }

        if file < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(rank)));
        }
        if rank < 7 {
            return Err(Error::Underflow);
        }

        Ok(res)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                match self.get2(file, rank) {
                    None => empty += 1,
                    Some(p) => {
                        if empty != 0 {
                            write!(f, "{}", (b'0' + empty) as char)?;
                            empty = 0;
                        }
                        write!(f, "{}", p.kind().as_char(p.color()))?;
                    }
                }
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn piece(p: &Piece) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                match b.get2(file, rank) {
                    Some(p) => write!(f, "{}", Self::piece(p))?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(b.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn piece(p: &Piece) -> char {
        p.kind().as_char(p.color())
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn piece(p: &Piece) -> char {
        p.kind().as_utf8_char(p.color())
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
