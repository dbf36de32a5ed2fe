use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("row {row} and column {col} are outside the board")]
    OutOfBounds { row: isize, col: isize },
    #[error("square {file}{rank} is outside the board")]
    InvalidSquare { file: char, rank: u8 },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceKindParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// Ranks are indexed from the top of the board, so `R8` has index 0 and `R1` has index 7.
/// This index is the internal row of a square.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R8,
            1 => Rank::R7,
            2 => Rank::R6,
            3 => Rank::R5,
            4 => Rank::R4,
            5 => Rank::R3,
            6 => Rank::R2,
            7 => Rank::R1,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    /// Returns the human rank number, from 1 to 8
    pub const fn number(&self) -> u8 {
        8 - *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=8 => Some(Self::from_index((8 - n) as usize)),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_number((u32::from(c) - u32::from('0')) as u8),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'0' + self.number()) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Internal square coordinate
///
/// Stores a zero-based `(row, column)` pair, where row 0 is rank 8 and column 0 is file `a`.
/// A `Coord` always lies on the board; out-of-range rows and columns are rejected by
/// [`Coord::new()`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank as u8) << 3) | file as u8)
    }

    /// Creates a coordinate from zero-based row and column
    pub fn new(row: isize, col: isize) -> Result<Coord, CoordError> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return Err(CoordError::OutOfBounds { row, col });
        }
        Ok(Coord(((row as u8) << 3) | col as u8))
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked((self.0 & 7) as usize) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked((self.0 >> 3) as usize) }
    }

    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts the coordinate by `delta_row` rows and `delta_col` columns
    ///
    /// Returns `None` if the result falls off the board.
    pub fn try_shift(self, delta_row: isize, delta_col: isize) -> Option<Coord> {
        Coord::new(self.row() as isize + delta_row, self.col() as isize + delta_col).ok()
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{:?})", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Square::from_str(s)?.into())
    }
}

/// User-facing square, as a column letter from `'a'` to `'h'` and a rank number from 1 to 8
///
/// Converts to and from [`Coord`] with `row = 8 - rank` and `col = file - 'a'`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    file: char,
    rank: u8,
}

impl Square {
    pub fn new(file: char, rank: u8) -> Result<Square, CoordError> {
        if File::from_char(file).is_none() || Rank::from_number(rank).is_none() {
            return Err(CoordError::InvalidSquare { file, rank });
        }
        Ok(Square { file, rank })
    }

    pub const fn file(&self) -> char {
        self.file
    }

    pub const fn rank(&self) -> u8 {
        self.rank
    }
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Coord {
        Coord::from_parts(
            File::from_index((sq.file as u8 - b'a') as usize),
            Rank::from_index((8 - sq.rank) as usize),
        )
    }
}

impl From<Coord> for Square {
    fn from(c: Coord) -> Square {
        Square {
            file: c.file().as_char(),
            rank: c.rank().number(),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err(CoordParseError::BadLength),
        };
        let file = File::from_char(file_ch).ok_or(CoordParseError::UnexpectedFileChar(file_ch))?;
        let rank = Rank::from_char(rank_ch).ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?;
        Ok(Coord::from_parts(file, rank).into())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PieceKind {
    pub fn as_char(&self) -> char {
        b"PKNBRQ"[*self as usize] as char
    }

    /// Parses a piece letter, case-insensitively
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'K' => Some(PieceKind::King),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns `true` if a pawn may be promoted to this kind
    pub const fn is_promote_target(&self) -> bool {
        matches!(
            *self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for PieceKind {
    type Err = PieceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                PieceKind::from_char(c).ok_or(PieceKindParseError::UnexpectedChar(c))
            }
            _ => Err(PieceKindParseError::BadLength),
        }
    }
}

/// Contents of an occupied square, as seen from outside the engine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub color: Color,
    pub kind: PieceKind,
}

impl Cell {
    pub const fn from_parts(color: Color, kind: PieceKind) -> Cell {
        Cell { color, kind }
    }

    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char(),
            Color::Black => self.kind.as_char().to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        let idx = self.kind as usize;
        match self.color {
            Color::White => ['♙', '♔', '♘', '♗', '♖', '♕'][idx],
            Color::Black => ['♟', '♚', '♞', '♝', '♜', '♛'][idx],
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    /// Column direction the king travels when castling to this side
    pub const fn direction(&self) -> isize {
        match *self {
            CastlingSide::Queen => -1,
            CastlingSide::King => 1,
        }
    }

    /// File of the corner rook on this side
    pub const fn rook_file(&self) -> File {
        match *self {
            CastlingSide::Queen => File::A,
            CastlingSide::King => File::H,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Self::Checkmate { winner } => Some(winner),
            Self::Stalemate => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            Self::Stalemate => write!(f, "draw by stalemate"),
        }
    }
}
