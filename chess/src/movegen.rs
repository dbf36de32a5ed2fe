//! Pseudo-legal move generation
//!
//! Generators mark every square a piece may move to by piece-movement and capture rules alone.
//! Whether the move leaves the mover's own king in check is decided later, by
//! [`Match`](crate::game::Match).

use crate::board::Board;
use crate::geometry;
use crate::mask::BoardMask;
use crate::piece::{Piece, PieceId};
use crate::types::{CastlingSide, Color, Coord, PieceKind};

/// Match state that move generation depends on, besides the board itself
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MoveContext {
    /// Pawn that has just made a double move and may be captured en passant
    pub en_passant: Option<PieceId>,
}

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAG_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const LINE_DIRS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

fn can_land(b: &Board, p: &Piece, c: Coord) -> bool {
    match b.piece_at(c) {
        Some(other) => other.is_opponent_of(p.color()),
        None => true,
    }
}

fn leap(b: &Board, p: &Piece, src: Coord, offsets: &[(isize, isize)]) -> BoardMask {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| src.try_shift(dr, dc))
        .filter(|&c| can_land(b, p, c))
        .collect()
}

fn slide(b: &Board, p: &Piece, src: Coord, dirs: &[(isize, isize)]) -> BoardMask {
    let mut res = BoardMask::EMPTY;
    for &(dr, dc) in dirs {
        let mut cur = src;
        while let Some(c) = cur.try_shift(dr, dc) {
            match b.piece_at(c) {
                Some(other) => {
                    if other.is_opponent_of(p.color()) {
                        res.set(c);
                    }
                    break;
                }
                None => res.set(c),
            }
            cur = c;
        }
    }
    res
}

fn pawn_attacks(color: Color, src: Coord) -> BoardMask {
    let fwd = geometry::pawn_forward_delta(color);
    [-1, 1]
        .iter()
        .filter_map(|&dc| src.try_shift(fwd, dc))
        .collect()
}

fn is_enpassant_victim(b: &Board, p: &Piece, c: Coord, ctx: MoveContext) -> bool {
    match (b.occupant(c), ctx.en_passant) {
        (Some(id), Some(ep)) if id == ep => {
            let victim = b.piece(id);
            victim.kind() == PieceKind::Pawn && victim.is_opponent_of(p.color())
        }
        _ => false,
    }
}

fn pawn(b: &Board, p: &Piece, src: Coord, ctx: MoveContext) -> BoardMask {
    let color = p.color();
    let fwd = geometry::pawn_forward_delta(color);
    let mut res = BoardMask::EMPTY;

    if let Some(one) = src.try_shift(fwd, 0) {
        if !b.is_occupied(one) {
            res.set(one);
            if src.rank() == geometry::pawn_rank(color) {
                if let Some(two) = one.try_shift(fwd, 0) {
                    if !b.is_occupied(two) {
                        res.set(two);
                    }
                }
            }
        }
    }

    for dst in pawn_attacks(color, src) {
        match b.piece_at(dst) {
            Some(other) => {
                if other.is_opponent_of(color) {
                    res.set(dst);
                }
            }
            None => {
                // En passant: the victim stands beside us, on the file we are moving to.
                let side = Coord::from_parts(dst.file(), src.rank());
                if src.rank() == geometry::enpassant_src_rank(color)
                    && is_enpassant_victim(b, p, side, ctx)
                {
                    res.set(dst);
                }
            }
        }
    }

    res
}

/// Returns the rook that king `king` may castle with on side `side`
///
/// Castling is pseudo-legal if both the king and the corner rook of the king's back rank have
/// never moved, the king's destination two files away lies strictly between them, and every
/// square strictly between them is empty. Attacked squares are not considered here.
pub fn castling_rook(b: &Board, king: PieceId, side: CastlingSide) -> Option<PieceId> {
    let k = b.piece(king);
    let src = k.coord()?;
    if k.kind() != PieceKind::King
        || k.move_count() != 0
        || src.rank() != geometry::back_rank(k.color())
    {
        return None;
    }

    let rook_src = Coord::from_parts(side.rook_file(), src.rank());
    let rook_id = b.occupant(rook_src)?;
    let rook = b.piece(rook_id);
    if rook.kind() != PieceKind::Rook || rook.color() != k.color() || rook.move_count() != 0 {
        return None;
    }

    let (king_col, rook_col) = (src.col() as isize, rook_src.col() as isize);
    let dst_col = king_col + 2 * side.direction();
    if (dst_col - rook_col) * side.direction() >= 0 {
        return None;
    }
    let mut between = (king_col.min(rook_col) + 1)..king_col.max(rook_col);
    if between.any(|col| src.try_shift(0, col - king_col).map_or(true, |c| b.is_occupied(c))) {
        return None;
    }
    Some(rook_id)
}

fn king(b: &Board, id: PieceId, p: &Piece, src: Coord) -> BoardMask {
    let mut res = leap(b, p, src, &KING_OFFSETS);
    for side in [CastlingSide::Queen, CastlingSide::King] {
        if castling_rook(b, id, side).is_some() {
            if let Some(dst) = src.try_shift(0, 2 * side.direction()) {
                res.set(dst);
            }
        }
    }
    res
}

/// Returns the squares where piece `id` may move, ignoring checks to its own king
///
/// A piece which is not on the board has no moves.
pub fn pseudo_legal(b: &Board, id: PieceId, ctx: MoveContext) -> BoardMask {
    let p = b.piece(id);
    let src = match p.coord() {
        Some(c) => c,
        None => return BoardMask::EMPTY,
    };
    match p.kind() {
        PieceKind::Pawn => pawn(b, p, src, ctx),
        PieceKind::Knight => leap(b, p, src, &KNIGHT_OFFSETS),
        PieceKind::Bishop => slide(b, p, src, &DIAG_DIRS),
        PieceKind::Rook => slide(b, p, src, &LINE_DIRS),
        PieceKind::Queen => slide(b, p, src, &DIAG_DIRS) | slide(b, p, src, &LINE_DIRS),
        PieceKind::King => king(b, id, p, src),
    }
}

/// Returns the squares attacked by piece `id`
///
/// Unlike [`pseudo_legal()`], pawns attack only their two forward diagonals (whether occupied or
/// not) and kings never attack by castling. For an occupied square of the opposite color, both
/// functions agree.
pub fn attacks(b: &Board, id: PieceId) -> BoardMask {
    let p = b.piece(id);
    let src = match p.coord() {
        Some(c) => c,
        None => return BoardMask::EMPTY,
    };
    match p.kind() {
        PieceKind::Pawn => pawn_attacks(p.color(), src),
        PieceKind::King => leap(b, p, src, &KING_OFFSETS),
        _ => pseudo_legal(b, id, MoveContext::default()),
    }
}

/// Returns `true` if any piece of color `by` attacks `coord`
pub fn is_cell_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    b.pieces_of(by).any(|id| attacks(b, id).has(coord))
}

/// Returns `true` if the king of color `c` is under attack
///
/// Returns `false` if there is no such king.
pub fn is_king_attacked(b: &Board, c: Color) -> bool {
    match b.king(c).and_then(|k| b.piece(k).coord()) {
        Some(pos) => is_cell_attacked(b, pos, c.inv()),
        None => false,
    }
}
