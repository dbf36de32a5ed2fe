//! Pieces and piece handles

use crate::types::{Cell, Color, Coord, PieceKind};

use std::fmt;

/// Handle of a piece inside a [`Board`](crate::board::Board)
///
/// Handles are never reused during a match, so a handle keeps referring to the same piece after
/// it gets captured or promoted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u32);

impl PieceId {
    pub(crate) const fn from_index(val: usize) -> PieceId {
        debug_assert!(val <= u32::MAX as usize);
        PieceId(val as u32)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "#{}", self.0)
    }
}

/// A single chess piece
///
/// Besides color and kind, the piece remembers where it stands (`None` once it leaves the board)
/// and how many times it was moved. Move count is the only thing castling eligibility depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    coord: Option<Coord>,
    move_count: u32,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            coord: None,
            move_count: 0,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn coord(&self) -> Option<Coord> {
        self.coord
    }

    #[inline]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::from_parts(self.color, self.kind)
    }

    #[inline]
    pub fn is_opponent_of(&self, color: Color) -> bool {
        self.color != color
    }

    pub(crate) fn set_coord(&mut self, coord: Option<Coord>) {
        self.coord = coord;
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    pub(crate) fn decrease_move_count(&mut self) {
        self.move_count -= 1;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_count() {
        let mut p = Piece::new(Color::White, PieceKind::Rook);
        assert_eq!(p.move_count(), 0);
        assert_eq!(p.coord(), None);
        p.increase_move_count();
        p.increase_move_count();
        p.decrease_move_count();
        assert_eq!(p.move_count(), 1);
    }

    #[test]
    fn test_format() {
        let p = Piece::new(Color::Black, PieceKind::Bishop);
        assert_eq!(p.to_string(), "b");
        assert!(p.is_opponent_of(Color::White));
        assert!(!p.is_opponent_of(Color::Black));
        assert_eq!(PieceId::from_index(3).to_string(), "#3");
    }

    #[test]
    fn test_id_range() {
        let id = PieceId::from_index(70_000);
        assert_eq!(id.index(), 70_000);
        assert_ne!(id, PieceId::from_index(70_000 - 65_536));
        assert_eq!(id.to_string(), "#70000");
    }
}
