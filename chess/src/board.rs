//! Board and related things

use crate::grid::Grid;
use crate::mask::BoardMask;
use crate::piece::{Piece, PieceId};
use crate::types::{Cell, Color, Coord, File, PieceKind, Rank};

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of color {0}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0}")]
    TooManyKings(Color),
    /// A piece and the grid disagree about where the piece stands
    #[error("piece {0} is misplaced")]
    Misplaced(PieceId),
}

/// Chess board
///
/// The board owns every piece created during the match. Pieces are kept in an arena and referred
/// to by [`PieceId`]; the [`Grid`] only stores these handles. Each piece is either on the board
/// (then its coordinate matches the grid slot holding it) or off the board, in which case it was
/// captured or replaced by promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid<PieceId>,
    pieces: Vec<Piece>,
    on_board: BTreeSet<PieceId>,
    captured: Vec<PieceId>,
}

impl Board {
    /// Returns an empty board
    pub fn empty() -> Board {
        Board {
            grid: Grid::new(),
            pieces: Vec::new(),
            on_board: BTreeSet::new(),
            captured: Vec::new(),
        }
    }

    /// Creates a new piece and puts it on `coord`
    ///
    /// If `coord` is already occupied, the old piece is taken off the board without being
    /// recorded as captured.
    pub fn add_piece(&mut self, color: Color, kind: PieceKind, coord: Coord) -> PieceId {
        if let Some(old) = self.remove(coord) {
            self.on_board.remove(&old);
        }
        let id = PieceId::from_index(self.pieces.len());
        self.pieces.push(Piece::new(color, kind));
        self.on_board.insert(id);
        self.place(id, coord);
        id
    }

    /// Returns the piece with handle `id`
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Returns the handle of the piece on `c`, if any
    #[inline]
    pub fn occupant(&self, c: Coord) -> Option<PieceId> {
        self.grid.get(c)
    }

    /// Returns the piece on `c`, if any
    #[inline]
    pub fn piece_at(&self, c: Coord) -> Option<&Piece> {
        self.occupant(c).map(|id| self.piece(id))
    }

    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.grid.is_occupied(c)
    }

    /// Returns the handle grid
    #[inline]
    pub fn grid(&self) -> &Grid<PieceId> {
        &self.grid
    }

    /// Puts piece `id` on `c` and updates its coordinate
    pub(crate) fn place(&mut self, id: PieceId, c: Coord) {
        debug_assert!(self.grid.get(c).is_none(), "square {} is occupied", c);
        self.grid.put(c, id);
        self.piece_mut(id).set_coord(Some(c));
    }

    /// Takes the piece on `c` off the grid, leaving it without a coordinate
    pub(crate) fn remove(&mut self, c: Coord) -> Option<PieceId> {
        let id = self.grid.take(c)?;
        self.piece_mut(id).set_coord(None);
        Some(id)
    }

    /// Moves piece `id` from the on-board set to the captured list
    pub(crate) fn capture(&mut self, id: PieceId) {
        self.on_board.remove(&id);
        self.captured.push(id);
    }

    /// Reverts the latest [`Board::capture()`]
    pub(crate) fn uncapture(&mut self, id: PieceId) {
        let last = self.captured.pop();
        debug_assert_eq!(last, Some(id));
        self.on_board.insert(id);
    }

    /// Replaces piece `id` with a new piece of kind `kind` on the same square
    ///
    /// The replaced piece leaves the board but is not recorded as captured.
    pub(crate) fn replace(&mut self, id: PieceId, kind: PieceKind) -> Option<PieceId> {
        let p = self.piece(id);
        let (color, coord) = (p.color(), p.coord()?);
        Some(self.add_piece(color, kind, coord))
    }

    /// Returns the king of color `c`
    ///
    /// On a valid board, each side has exactly one king.
    pub fn king(&self, c: Color) -> Option<PieceId> {
        self.pieces_of(c)
            .find(|&id| self.piece(id).kind() == PieceKind::King)
    }

    /// Iterates over all the pieces currently on the board
    pub fn pieces_on_board(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.on_board.iter().copied()
    }

    /// Iterates over the pieces of color `c` currently on the board
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces_on_board()
            .filter(move |&id| self.piece(id).color() == c)
    }

    /// Returns the captured pieces, in order of capture
    pub fn captured(&self) -> &[PieceId] {
        &self.captured
    }

    /// Returns the mask of squares occupied by pieces of color `c`
    pub fn occupied_by(&self, c: Color) -> BoardMask {
        self.pieces_of(c)
            .filter_map(|id| self.piece(id).coord())
            .collect()
    }

    /// Returns the view of the board as colors and piece kinds
    pub fn cells(&self) -> Grid<Cell> {
        self.grid.map(|id| self.piece(id).cell())
    }

    /// Checks that the board contains a valid position
    ///
    /// Each side must have exactly one king, and every piece on the board must be stored in the
    /// grid slot matching its coordinate.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces_of(color)
                .filter(|&id| self.piece(id).kind() == PieceKind::King)
                .count();
            match kings {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
        }
        for id in self.pieces_on_board() {
            match self.piece(id).coord() {
                Some(c) if self.grid.get(c) == Some(id) => {}
                _ => return Err(ValidateError::Misplaced(id)),
            }
        }
        if self.grid.iter().count() != self.on_board.len() {
            let stray = self
                .grid
                .iter()
                .map(|(_, id)| id)
                .find(|id| !self.on_board.contains(id));
            if let Some(id) = stray {
                return Err(ValidateError::Misplaced(id));
            }
        }
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style
    ///
    /// Squares from `highlight` are marked with `*`. The resulting wrapper implements
    /// [`fmt::Display`].
    ///
    /// # Example
    ///
    /// ```
    /// # use checkmatch::board::{Board, PrettyStyle};
    /// # use checkmatch::{BoardMask, Color, Coord, PieceKind};
    /// #
    /// let mut b = Board::empty();
    /// b.add_piece(Color::White, PieceKind::King, "e1".parse().unwrap());
    /// b.add_piece(Color::Black, PieceKind::King, "e8".parse().unwrap());
    /// let marks = BoardMask::from_coord("e2".parse().unwrap());
    /// let res = b.pretty(PrettyStyle::Ascii, marks).to_string();
    /// assert!(res.starts_with("8|. . . . k . . . \n"));
    /// assert!(res.contains("2|. . . . .*. . . \n"));
    /// ```
    pub fn pretty(&self, style: PrettyStyle, highlight: BoardMask) -> Pretty<'_> {
        Pretty {
            board: self,
            style,
            highlight,
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
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
    highlight: BoardMask,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const EMPTY: char;

    fn cell(c: Cell) -> char;

    fn fmt(p: &Pretty<'_>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                let coord = Coord::from_parts(file, rank);
                let sym = match p.board.piece_at(coord) {
                    Some(piece) => Self::cell(piece.cell()),
                    None => Self::EMPTY,
                };
                let mark = if p.highlight.has(coord) { '*' } else { ' ' };
                write!(f, "{}{}", sym, mark)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}{}", Self::HORZ_FRAME, Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{} ", file)?;
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
    const EMPTY: char = '.';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const EMPTY: char = '·';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> fmt::Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self, f),
        }
    }
}
