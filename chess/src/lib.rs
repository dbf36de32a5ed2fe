//! # checkmatch
//!
//! Two-player chess rules engine. It supports the standard setup and the randomized
//! back-rank one (Chess960).
//!
//! The engine keeps the board with its pieces, generates pseudo-legal moves, rejects moves that
//! leave the king in check, detects checkmate and stalemate, and performs castling, en passant
//! and promotion.
//!
//! # Example
//!
//! ```
//! use checkmatch::{Color, Match, MatchError, SetupMode};
//!
//! let mut m = Match::new(SetupMode::Standard);
//! let e2 = "e2".parse().unwrap();
//! let e4 = "e4".parse().unwrap();
//! assert!(m.legal_targets(e2).unwrap().has(e4));
//! assert_eq!(m.execute(e2, e4), Ok(None));
//! assert_eq!(m.current_player(), Color::Black);
//! assert_eq!(
//!     m.execute("d2".parse().unwrap(), "d4".parse().unwrap()),
//!     Err(MatchError::WrongColorPiece("d2".parse().unwrap())),
//! );
//! ```

pub mod board;
pub mod game;
pub mod grid;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod setup;

pub use checkmatch_base::{geometry, mask, types};

pub use board::{Board, PrettyStyle};
pub use game::{Match, MatchError};
pub use grid::Grid;
pub use mask::BoardMask;
pub use moves::{Move, MoveKind};
pub use piece::{Piece, PieceId};
pub use setup::SetupMode;
pub use types::{CastlingSide, Cell, Color, Coord, File, Outcome, PieceKind, Rank, Square};
