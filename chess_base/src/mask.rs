use crate::types::{Coord, File, Rank};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of marked squares on the board
///
/// This is the boolean matrix returned by move generation: a square is marked if the piece may
/// move there. Bit `i` corresponds to the coordinate with index `i`, i.e. row `i / 8` and column
/// `i % 8`.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct BoardMask(u64);

impl BoardMask {
    pub const EMPTY: BoardMask = BoardMask(0);

    pub const fn from_raw(val: u64) -> BoardMask {
        BoardMask(val)
    }

    pub const fn from_coord(coord: Coord) -> BoardMask {
        BoardMask(1_u64 << coord.index())
    }

    pub const fn with(self, coord: Coord) -> BoardMask {
        BoardMask(self.0 | (1_u64 << coord.index()))
    }

    pub const fn without(self, coord: Coord) -> BoardMask {
        BoardMask(self.0 & !(1_u64 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    pub fn unset(&mut self, coord: Coord) {
        *self = self.without(coord);
    }

    pub const fn has(&self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Expands the mask into a `[row][column]` matrix
    pub fn to_matrix(&self) -> [[bool; 8]; 8] {
        let mut res = [[false; 8]; 8];
        for coord in *self {
            res[coord.row()][coord.col()] = true;
        }
        res
    }

    pub fn from_matrix(matrix: &[[bool; 8]; 8]) -> BoardMask {
        let mut res = BoardMask::EMPTY;
        for (row, line) in matrix.iter().enumerate() {
            for (col, &marked) in line.iter().enumerate() {
                if marked {
                    res.set(Coord::from_index(row * 8 + col));
                }
            }
        }
        res
    }
}

impl From<BoardMask> for u64 {
    fn from(b: BoardMask) -> u64 {
        b.0
    }
}

impl From<u64> for BoardMask {
    fn from(u: u64) -> BoardMask {
        BoardMask(u)
    }
}

impl FromIterator<Coord> for BoardMask {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        iter.into_iter().fold(BoardMask::EMPTY, BoardMask::with)
    }
}

impl fmt::Debug for BoardMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "BoardMask(")?;
        for (i, coord) in self.into_iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", coord)?;
        }
        write!(f, ")")
    }
}

/// Formats the mask as eight lines from rank 8 down to rank 1, with `x` for marked squares
impl fmt::Display for BoardMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            for file in File::iter() {
                let marked = self.has(Coord::from_parts(file, rank));
                write!(f, "{}", if marked { 'x' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        Some(Coord::from_index(bit as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl IntoIterator for BoardMask {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter() {
        let mask = BoardMask::EMPTY
            .with(Coord::from_parts(File::A, Rank::R4))
            .with(Coord::from_parts(File::E, Rank::R2))
            .with(Coord::from_parts(File::F, Rank::R3));
        assert_eq!(
            mask.into_iter().collect::<Vec<_>>(),
            vec![
                Coord::from_parts(File::A, Rank::R4),
                Coord::from_parts(File::F, Rank::R3),
                Coord::from_parts(File::E, Rank::R2)
            ],
        );
        assert_eq!(mask.len(), 3);
    }

    #[test]
    fn test_bitops() {
        let ca = Coord::from_parts(File::A, Rank::R4);
        let cb = Coord::from_parts(File::E, Rank::R2);
        let cc = Coord::from_parts(File::F, Rank::R3);

        let m1 = BoardMask::EMPTY.with(ca).with(cb);
        let m2 = BoardMask::EMPTY.with(cb).with(cc);
        assert_eq!(m1 & m2, BoardMask::from_coord(cb));
        assert_eq!(m1 | m2, [ca, cb, cc].into_iter().collect());
        assert_eq!(m1 ^ m2, BoardMask::EMPTY.with(ca).with(cc));
        assert_eq!((!m1).len(), 62);
        assert!(m1.without(ca).without(cb).is_empty());
    }

    #[test]
    fn test_matrix() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let h8 = Coord::from_parts(File::H, Rank::R8);
        let mask = BoardMask::EMPTY.with(e2).with(h8);
        let matrix = mask.to_matrix();
        assert!(matrix[6][4]);
        assert!(matrix[0][7]);
        assert_eq!(matrix.iter().flatten().filter(|&&x| x).count(), 2);
        assert_eq!(BoardMask::from_matrix(&matrix), mask);
    }

    #[test]
    fn test_format() {
        let mask = BoardMask::EMPTY
            .with(Coord::from_parts(File::A, Rank::R4))
            .with(Coord::from_parts(File::H, Rank::R8));
        assert_eq!(
            mask.to_string(),
            ".......x\n........\n........\n........\nx.......\n........\n........\n........\n"
        );
        assert_eq!(format!("{:?}", mask), "BoardMask(h8 a4)");
    }
}
