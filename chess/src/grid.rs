//! Fixed-size slot map over board squares

use crate::types::{Coord, File, Rank};

/// Two-dimensional array of optional slots, indexed by [`Coord`]
///
/// The grid knows nothing about chess rules. Every slot holds at most one value, and since a
/// [`Coord`] is always on the board, all accesses are bounds-checked by construction. Raw
/// row/column pairs can be tested with [`Grid::in_bounds()`] before turning them into a
/// coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T: Copy> {
    cells: [[Option<T>; 8]; 8],
}

impl<T: Copy> Grid<T> {
    pub const ROWS: usize = 8;
    pub const COLS: usize = 8;

    pub fn new() -> Self {
        Grid {
            cells: [[None; 8]; 8],
        }
    }

    pub fn in_bounds(row: isize, col: isize) -> bool {
        (0..Self::ROWS as isize).contains(&row) && (0..Self::COLS as isize).contains(&col)
    }

    /// Returns the value occupying `c`, if any
    #[inline]
    pub fn get(&self, c: Coord) -> Option<T> {
        self.cells[c.row()][c.col()]
    }

    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.get(c).is_some()
    }

    /// Puts `value` into `c`, overwriting the slot and returning its previous contents
    #[inline]
    pub fn put(&mut self, c: Coord, value: T) -> Option<T> {
        self.cells[c.row()][c.col()].replace(value)
    }

    /// Empties `c` and returns what was there
    #[inline]
    pub fn take(&mut self, c: Coord) -> Option<T> {
        self.cells[c.row()][c.col()].take()
    }

    /// Iterates over all occupied slots, from rank 8 down to rank 1
    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        Coord::iter().filter_map(move |c| self.get(c).map(|v| (c, v)))
    }

    /// Returns the rows of the grid, starting from rank 8
    pub fn rows(&self) -> &[[Option<T>; 8]; 8] {
        &self.cells
    }

    pub fn map<U: Copy, F: FnMut(T) -> U>(&self, mut f: F) -> Grid<U> {
        let mut res = Grid::new();
        for (c, v) in self.iter() {
            res.put(c, f(v));
        }
        res
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<T> {
        self.get(Coord::from_parts(file, rank))
    }
}

impl<T: Copy> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_take() {
        let mut grid = Grid::<u8>::new();
        let e4 = Coord::from_parts(File::E, Rank::R4);
        assert_eq!(grid.get(e4), None);
        assert_eq!(grid.put(e4, 1), None);
        assert_eq!(grid.put(e4, 2), Some(1));
        assert_eq!(grid.get2(File::E, Rank::R4), Some(2));
        assert!(grid.is_occupied(e4));
        assert_eq!(grid.take(e4), Some(2));
        assert_eq!(grid.take(e4), None);
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn test_bounds() {
        assert!(Grid::<u8>::in_bounds(0, 0));
        assert!(Grid::<u8>::in_bounds(7, 7));
        assert!(!Grid::<u8>::in_bounds(-1, 3));
        assert!(!Grid::<u8>::in_bounds(3, 8));
    }

    #[test]
    fn test_iter_map() {
        let mut grid = Grid::<u8>::new();
        let a1 = Coord::from_parts(File::A, Rank::R1);
        let h8 = Coord::from_parts(File::H, Rank::R8);
        grid.put(a1, 3);
        grid.put(h8, 5);
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec![(h8, 5), (a1, 3)]);
        assert_eq!(grid.rows()[7][0], Some(3));
        let doubled = grid.map(|v| u32::from(v) * 2);
        assert_eq!(doubled.get(h8), Some(10));
        assert_eq!(doubled.iter().count(), 2);
    }
}
