//! Match state machine
//!
//! [`Match`] drives the game half-move by half-move. Every operation either succeeds, or fails
//! with [`MatchError`] and leaves the match exactly as it was.
//!
//! Check detection is done by trial: the candidate move is made on the live board and rolled back
//! by [`Trial`] once the king's safety is known.

use crate::board::{Board, ValidateError};
use crate::geometry;
use crate::grid::Grid;
use crate::mask::BoardMask;
use crate::movegen::{self, MoveContext};
use crate::moves::{Move, MoveKind, MoveList, Trial};
use crate::piece::{Piece, PieceId};
use crate::setup::{self, SetupMode};
use crate::types::{Cell, Color, Coord, Outcome, PieceKind};

use rand::Rng;
use thiserror::Error;

/// Error rejecting an operation on a [`Match`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MatchError {
    #[error("no piece on {0}")]
    NoPieceAtSource(Coord),
    #[error("piece on {0} belongs to the opponent")]
    WrongColorPiece(Coord),
    #[error("piece on {0} has no possible moves")]
    NoLegalMoves(Coord),
    #[error("piece on {src} cannot move to {dst}")]
    IllegalTarget { src: Coord, dst: Coord },
    #[error("move would leave the king in check")]
    SelfCheck,
    #[error("king cannot castle out of, through or into check")]
    CastlingUnderAttack,
    #[error("no pawn is waiting for promotion")]
    NoPendingPromotion,
    #[error("cannot promote {pending} to {kind}")]
    InvalidPromotionChoice { kind: PieceKind, pending: PieceId },
    #[error("match is over: {0}")]
    GameOver(Outcome),
}

/// Error creating a [`Match`] from a board
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum SetupError {
    #[error("bad board: {0}")]
    Board(#[from] ValidateError),
    #[error("opponent king is under attack")]
    OpponentKingAttacked,
}

/// Chess match
///
/// The match owns the board and keeps track of the turn, the side to move and the transient state
/// of special moves: the pawn that may be captured en passant and the pawn waiting for promotion.
///
/// The turn counter starts at 1 and increases after every half-move that doesn't end the match.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    turn: u32,
    side: Color,
    check: bool,
    outcome: Option<Outcome>,
    en_passant: Option<PieceId>,
    promoted: Option<PieceId>,
}

impl Match {
    /// Starts a new match, with randomness taken from the thread-local generator
    pub fn new(mode: SetupMode) -> Match {
        Match::with_rng(mode, &mut rand::thread_rng())
    }

    /// Starts a new match, with randomness taken from `rng`
    pub fn with_rng<R: Rng>(mode: SetupMode, rng: &mut R) -> Match {
        Match {
            board: setup::initial_board(mode, rng),
            turn: 1,
            side: Color::White,
            check: false,
            outcome: None,
            en_passant: None,
            promoted: None,
        }
    }

    /// Creates a match from an arbitrary position, with `side` to move
    ///
    /// The position is checked with [`Board::validate()`], and the king of the side not to move
    /// must not be under attack. The match may be already over if `side` has no legal moves.
    pub fn from_board(board: Board, side: Color) -> Result<Match, SetupError> {
        board.validate()?;
        if movegen::is_king_attacked(&board, side.inv()) {
            return Err(SetupError::OpponentKingAttacked);
        }
        let mut res = Match {
            board,
            turn: 1,
            side,
            check: false,
            outcome: None,
            en_passant: None,
            promoted: None,
        };
        res.check = res.is_in_check(side);
        if !res.has_legal_moves(side) {
            res.outcome = Some(if res.check {
                Outcome::Checkmate { winner: side.inv() }
            } else {
                Outcome::Stalemate
            });
        }
        Ok(res)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the colors and kinds of all the pieces, by square
    pub fn current_board(&self) -> Grid<Cell> {
        self.board.cells()
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.board.piece(id)
    }

    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.side
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Checkmate { .. }))
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.outcome == Some(Outcome::Stalemate)
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the pawn that has just reached the last rank, if its promotion is not resolved yet
    ///
    /// Until [`Match::resolve_promotion()`] is called, the piece stands on the board as a queen.
    #[inline]
    pub fn pending_promotion(&self) -> Option<PieceId> {
        self.promoted
    }

    /// Returns the pawn that may be captured en passant on this half-move
    #[inline]
    pub fn en_passant_vulnerable(&self) -> Option<PieceId> {
        self.en_passant
    }

    /// Iterates over the captured pieces, in order of capture
    pub fn captured_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.board.captured().iter().map(|&id| self.board.piece(id))
    }

    pub fn pieces_on_board(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.board
            .pieces_on_board()
            .map(|id| self.board.piece(id))
    }

    fn context(&self) -> MoveContext {
        MoveContext {
            en_passant: self.en_passant,
        }
    }

    fn ensure_running(&self) -> Result<(), MatchError> {
        match self.outcome {
            Some(outcome) => Err(MatchError::GameOver(outcome)),
            None => Ok(()),
        }
    }

    /// Checks that the side to move may start a move from `src`
    pub fn validate_source(&self, src: Coord) -> Result<PieceId, MatchError> {
        self.ensure_running()?;
        let id = self
            .board
            .occupant(src)
            .ok_or(MatchError::NoPieceAtSource(src))?;
        if self.board.piece(id).color() != self.side {
            return Err(MatchError::WrongColorPiece(src));
        }
        if movegen::pseudo_legal(&self.board, id, self.context()).is_empty() {
            return Err(MatchError::NoLegalMoves(src));
        }
        Ok(id)
    }

    /// Checks that the move from `src` to `dst` is pseudo-legal for the side to move
    pub fn validate_target(&self, src: Coord, dst: Coord) -> Result<Move, MatchError> {
        let id = self.validate_source(src)?;
        if !movegen::pseudo_legal(&self.board, id, self.context()).has(dst) {
            return Err(MatchError::IllegalTarget { src, dst });
        }
        Move::new(&self.board, id, dst).ok_or(MatchError::NoPieceAtSource(src))
    }

    /// Returns the pseudo-legal targets of the piece on `src`
    ///
    /// Moves leaving the king in check are included. Use [`Match::safe_targets()`] to get only the
    /// moves which [`Match::execute()`] accepts.
    pub fn legal_targets(&self, src: Coord) -> Result<BoardMask, MatchError> {
        let id = self.validate_source(src)?;
        Ok(movegen::pseudo_legal(&self.board, id, self.context()))
    }

    /// Returns the targets of the piece on `src` which don't leave its king in check
    pub fn safe_targets(&mut self, src: Coord) -> Result<BoardMask, MatchError> {
        let id = self.validate_source(src)?;
        let mut res = BoardMask::EMPTY;
        for dst in movegen::pseudo_legal(&self.board, id, self.context()) {
            if let Some(mv) = Move::new(&self.board, id, dst) {
                if self.try_move(mv).is_ok() {
                    res.set(dst);
                }
            }
        }
        Ok(res)
    }

    /// Returns all the legal moves of the side to move
    pub fn legal_moves(&mut self) -> MoveList {
        let mut res = MoveList::new();
        if self.outcome.is_some() {
            return res;
        }
        let ctx = self.context();
        let ids: Vec<PieceId> = self.board.pieces_of(self.side).collect();
        for id in ids {
            for dst in movegen::pseudo_legal(&self.board, id, ctx) {
                if let Some(mv) = Move::new(&self.board, id, dst) {
                    if self.try_move(mv).is_ok() {
                        res.push(mv);
                    }
                }
            }
        }
        res
    }

    /// Returns `true` if the king of color `color` is under attack
    pub fn is_in_check(&self, color: Color) -> bool {
        movegen::is_king_attacked(&self.board, color)
    }

    /// Returns `true` if `color` is in check and no move of its pieces escapes the check
    pub fn detect_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    fn has_legal_moves(&mut self, color: Color) -> bool {
        let ctx = self.context();
        let ids: Vec<PieceId> = self.board.pieces_of(color).collect();
        for id in ids {
            for dst in movegen::pseudo_legal(&self.board, id, ctx) {
                if let Some(mv) = Move::new(&self.board, id, dst) {
                    if self.try_move(mv).is_ok() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Makes pseudo-legal move `mv` on the board if it doesn't leave the mover's king in check
    ///
    /// The move stays on the board only while the returned guard is alive or after it is
    /// committed.
    fn try_move(&mut self, mv: Move) -> Result<Trial<'_>, MatchError> {
        let color = self.board.piece(mv.piece()).color();
        if mv
            .castling_path()
            .iter()
            .any(|&c| movegen::is_cell_attacked(&self.board, c, color.inv()))
        {
            return Err(MatchError::CastlingUnderAttack);
        }
        let trial = Trial::new(&mut self.board, mv);
        if movegen::is_king_attacked(&trial, color) {
            return Err(MatchError::SelfCheck);
        }
        Ok(trial)
    }

    /// Makes a move from `src` to `dst` for the side to move
    ///
    /// Returns the captured piece, if any. If a pawn reaches the last rank, it becomes a queen
    /// and stays pending in [`Match::pending_promotion()`] until another choice is made with
    /// [`Match::resolve_promotion()`].
    pub fn execute(&mut self, src: Coord, dst: Coord) -> Result<Option<PieceId>, MatchError> {
        let mv = self.validate_target(src, dst)?;
        let undo = self.try_move(mv)?.commit();

        let mover = self.side;
        let id = mv.piece();
        self.promoted = None;
        if self.board.piece(id).kind() == PieceKind::Pawn
            && dst.rank() == geometry::promote_rank(mover)
        {
            self.board.piece_mut(id).set_kind(PieceKind::Queen);
            self.promoted = Some(id);
        }
        self.en_passant = (mv.kind() == MoveKind::PawnDouble).then_some(id);
        self.conclude(mover);
        Ok(undo.captured())
    }

    /// Replaces the pending pawn with a new piece of kind `kind`
    ///
    /// The position is re-evaluated afterwards, as the choice may change whether the opponent is
    /// in check, mated or stalemated.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<PieceId, MatchError> {
        let pawn = self.promoted.ok_or(MatchError::NoPendingPromotion)?;
        if !kind.is_promote_target() {
            return Err(MatchError::InvalidPromotionChoice {
                kind,
                pending: pawn,
            });
        }
        let new = self
            .board
            .replace(pawn, kind)
            .ok_or(MatchError::NoPendingPromotion)?;
        self.promoted = None;

        let mover = self.board.piece(new).color();
        if self.side != mover {
            self.turn -= 1;
            self.side = mover;
        }
        self.outcome = None;
        self.conclude(mover);
        Ok(new)
    }

    /// Finishes the half-move made by `mover`
    fn conclude(&mut self, mover: Color) {
        let opponent = mover.inv();
        self.check = self.is_in_check(opponent);
        let can_move = self.has_legal_moves(opponent);
        if !can_move {
            if self.check {
                self.outcome = Some(Outcome::Checkmate { winner: mover });
                return;
            }
            self.outcome = Some(Outcome::Stalemate);
        }
        self.turn += 1;
        self.side = opponent;
    }
}
