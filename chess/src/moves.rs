//! Moves and their application to the board

use crate::board::Board;
use crate::piece::PieceId;
use crate::types::{CastlingSide, Coord, PieceKind};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Ordinary move or capture, including single pawn moves
    #[default]
    Simple = 0,
    /// Double pawn move
    PawnDouble = 1,
    /// Enpassant
    Enpassant = 2,
    /// Kingside castling
    CastlingKingside = 3,
    /// Queenside castling
    CastlingQueenside = 4,
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

/// Chess move
///
/// The move remembers which piece is moving, so it stays meaningful while the board is being
/// changed by [`make_move_unchecked()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    piece: PieceId,
    src: Coord,
    dst: Coord,
}

impl Move {
    /// Creates a move of piece `piece` to `dst`, deducing its kind from the board
    ///
    /// Returns `None` if the piece is not on the board. The move is not checked for legality.
    pub fn new(b: &Board, piece: PieceId, dst: Coord) -> Option<Move> {
        let p = b.piece(piece);
        let src = p.coord()?;
        let d_row = dst.row() as isize - src.row() as isize;
        let d_col = dst.col() as isize - src.col() as isize;
        let kind = match p.kind() {
            PieceKind::Pawn if d_row.abs() == 2 => MoveKind::PawnDouble,
            PieceKind::Pawn if d_col != 0 && !b.is_occupied(dst) => MoveKind::Enpassant,
            PieceKind::King if d_row == 0 && d_col == 2 => MoveKind::CastlingKingside,
            PieceKind::King if d_row == 0 && d_col == -2 => MoveKind::CastlingQueenside,
            _ => MoveKind::Simple,
        };
        Some(Move {
            kind,
            piece,
            src,
            dst,
        })
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub fn castling_side(&self) -> Option<CastlingSide> {
        CastlingSide::try_from(self.kind).ok()
    }

    /// Returns the square of the piece this move captures, if the move is a capture on `b`
    pub fn capture_coord(&self, b: &Board) -> Option<Coord> {
        let at = match self.kind {
            MoveKind::Enpassant => Coord::from_parts(self.dst.file(), self.src.rank()),
            _ => self.dst,
        };
        b.is_occupied(at).then_some(at)
    }

    /// Squares the king stands on, passes through and lands on while castling
    pub(crate) fn castling_path(&self) -> ArrayVec<Coord, 3> {
        match self.castling_side() {
            Some(side) => (0..3)
                .filter_map(|i| self.src.try_shift(0, i * side.direction()))
                .collect(),
            None => ArrayVec::new(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Data needed to roll back a move made by [`make_move_unchecked()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RawUndo {
    captured: Option<(PieceId, Coord)>,
    rook: Option<(PieceId, Coord, Coord)>,
}

impl RawUndo {
    /// Returns the piece captured by the move
    #[inline]
    pub fn captured(&self) -> Option<PieceId> {
        self.captured.map(|(id, _)| id)
    }
}

/// Makes move `mv` on the board
///
/// Both the moving piece and, for castling, the rook get their move counts increased. A captured
/// piece leaves the board and is appended to the captured list.
///
/// The move must be pseudo-legal. To roll it back, pass the returned [`RawUndo`] to
/// [`unmake_move_unchecked()`] before making any other changes to the board.
pub fn make_move_unchecked(b: &mut Board, mv: Move) -> RawUndo {
    let captured = mv.capture_coord(b).and_then(|at| {
        let victim = b.remove(at)?;
        b.capture(victim);
        Some((victim, at))
    });

    b.remove(mv.src);
    b.piece_mut(mv.piece).increase_move_count();
    b.place(mv.piece, mv.dst);

    let rook = mv.castling_side().and_then(|side| {
        let rook_src = Coord::from_parts(side.rook_file(), mv.src.rank());
        let rook_dst = mv.src.try_shift(0, side.direction())?;
        let rook = b.remove(rook_src)?;
        b.piece_mut(rook).increase_move_count();
        b.place(rook, rook_dst);
        Some((rook, rook_src, rook_dst))
    });

    RawUndo { captured, rook }
}

/// Rolls back move `mv` previously made by [`make_move_unchecked()`]
///
/// The board is restored exactly to the state it had before the move.
pub fn unmake_move_unchecked(b: &mut Board, mv: Move, u: RawUndo) {
    if let Some((rook, rook_src, rook_dst)) = u.rook {
        b.remove(rook_dst);
        b.piece_mut(rook).decrease_move_count();
        b.place(rook, rook_src);
    }

    b.remove(mv.dst);
    b.piece_mut(mv.piece).decrease_move_count();
    b.place(mv.piece, mv.src);

    if let Some((victim, at)) = u.captured {
        b.uncapture(victim);
        b.place(victim, at);
    }
}

/// Move tried on the board
///
/// While the guard is alive, the board is seen in the state after the move. Dropping the guard
/// rolls the move back; [`Trial::commit()`] keeps it.
pub struct Trial<'a> {
    board: &'a mut Board,
    mv: Move,
    undo: RawUndo,
    committed: bool,
}

impl<'a> Trial<'a> {
    /// Makes pseudo-legal move `mv` on `board`
    pub fn new(board: &'a mut Board, mv: Move) -> Trial<'a> {
        let undo = make_move_unchecked(board, mv);
        Trial {
            board,
            mv,
            undo,
            committed: false,
        }
    }

    #[inline]
    pub fn undo(&self) -> &RawUndo {
        &self.undo
    }

    /// Keeps the move on the board
    pub fn commit(mut self) -> RawUndo {
        self.committed = true;
        self.undo
    }
}

impl<'a> Deref for Trial<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> Drop for Trial<'a> {
    fn drop(&mut self) {
        if !self.committed {
            unmake_move_unchecked(self.board, self.mv, self.undo);
        }
    }
}

/// List of moves
///
/// No position reachable in a real game has more than 256 legal moves.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn kings() -> Board {
        let mut b = Board::empty();
        b.add_piece(Color::White, PieceKind::King, c("e1"));
        b.add_piece(Color::Black, PieceKind::King, c("e8"));
        b
    }

    #[test]
    fn test_kinds() {
        let mut b = kings();
        let p = b.add_piece(Color::White, PieceKind::Pawn, c("e5"));
        b.add_piece(Color::Black, PieceKind::Pawn, c("f5"));
        let k = b.king(Color::White).unwrap();

        assert_eq!(Move::new(&b, p, c("e6")).unwrap().kind(), MoveKind::Simple);
        assert_eq!(
            Move::new(&b, p, c("f6")).unwrap().kind(),
            MoveKind::Enpassant
        );
        assert_eq!(
            Move::new(&b, k, c("g1")).unwrap().kind(),
            MoveKind::CastlingKingside
        );
        assert_eq!(
            Move::new(&b, k, c("c1")).unwrap().castling_side(),
            Some(CastlingSide::Queen)
        );
        assert_eq!(Move::new(&b, k, c("d2")).unwrap().castling_side(), None);

        let black = b.add_piece(Color::Black, PieceKind::Pawn, c("a7"));
        let mv = Move::new(&b, black, c("a5")).unwrap();
        assert_eq!(mv.kind(), MoveKind::PawnDouble);
        assert_eq!(mv.to_string(), "a7a5");
    }

    #[test]
    fn test_make_unmake() {
        let mut b = kings();
        let r = b.add_piece(Color::White, PieceKind::Rook, c("a1"));
        let n = b.add_piece(Color::Black, PieceKind::Knight, c("a6"));
        let before = b.clone();

        let mv = Move::new(&b, r, c("a6")).unwrap();
        let u = make_move_unchecked(&mut b, mv);
        assert_eq!(u.captured(), Some(n));
        assert_eq!(b.occupant(c("a6")), Some(r));
        assert_eq!(b.piece(r).move_count(), 1);
        assert_eq!(b.piece(n).coord(), None);
        assert_eq!(b.captured(), &[n]);

        unmake_move_unchecked(&mut b, mv, u);
        assert_eq!(b, before);
    }

    #[test]
    fn test_enpassant() {
        let mut b = kings();
        let p = b.add_piece(Color::Black, PieceKind::Pawn, c("d4"));
        let victim = b.add_piece(Color::White, PieceKind::Pawn, c("c4"));
        let before = b.clone();

        let mv = Move::new(&b, p, c("c3")).unwrap();
        assert_eq!(mv.capture_coord(&b), Some(c("c4")));
        let u = make_move_unchecked(&mut b, mv);
        assert_eq!(u.captured(), Some(victim));
        assert!(!b.is_occupied(c("c4")));
        assert_eq!(b.occupant(c("c3")), Some(p));

        unmake_move_unchecked(&mut b, mv, u);
        assert_eq!(b, before);
    }

    #[test]
    fn test_castling() {
        let mut b = kings();
        let k = b.king(Color::White).unwrap();
        let r = b.add_piece(Color::White, PieceKind::Rook, c("a1"));
        let before = b.clone();

        let mv = Move::new(&b, k, c("c1")).unwrap();
        assert_eq!(mv.castling_path().as_slice(), &[c("e1"), c("d1"), c("c1")]);
        let u = make_move_unchecked(&mut b, mv);
        assert_eq!(u.captured(), None);
        assert_eq!(b.occupant(c("c1")), Some(k));
        assert_eq!(b.occupant(c("d1")), Some(r));
        assert_eq!(b.piece(r).move_count(), 1);
        assert_eq!(b.piece(k).move_count(), 1);

        unmake_move_unchecked(&mut b, mv, u);
        assert_eq!(b, before);
    }

    #[test]
    fn test_trial() {
        let mut b = kings();
        let q = b.add_piece(Color::White, PieceKind::Queen, c("d1"));
        let before = b.clone();
        let mv = Move::new(&b, q, c("d7")).unwrap();

        {
            let trial = Trial::new(&mut b, mv);
            assert_eq!(trial.occupant(c("d7")), Some(q));
        }
        assert_eq!(b, before);

        let u = Trial::new(&mut b, mv).commit();
        assert_eq!(u.captured(), None);
        assert_eq!(b.occupant(c("d7")), Some(q));
        assert_ne!(b, before);
    }
}
