//! Initial position

use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, File, PieceKind};

use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Error parsing [`SetupMode`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("unknown setup mode {0:?}")]
pub struct SetupModeParseError(String);

/// How to arrange the back ranks at the start of the match
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SetupMode {
    /// Classical arrangement, `RNBQKBNR`
    #[default]
    Standard,
    /// Chess960 arrangement: a random back rank with bishops on squares of opposite colors and the
    /// king between the rooks
    Randomized,
}

impl FromStr for SetupMode {
    type Err = SetupModeParseError;

    /// Parses the setup mode
    ///
    /// Besides the mode names, answers to the question "play Chess960?" are accepted, so `y` and
    /// `yes` mean [`SetupMode::Randomized`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "classic" | "n" | "no" => Ok(SetupMode::Standard),
            "randomized" | "chess960" | "960" | "y" | "yes" => Ok(SetupMode::Randomized),
            _ => Err(SetupModeParseError(s.to_string())),
        }
    }
}

/// Back rank of the standard setup, from file A to file H
pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Generates a random Chess960 back rank, from file A to file H
pub fn random_back_rank<R: Rng>(rng: &mut R) -> [PieceKind; 8] {
    let mut res = [PieceKind::Bishop; 8];
    let even = rng.gen_range(0..4) * 2;
    let odd = rng.gen_range(0..4) * 2 + 1;

    let mut free: ArrayVec<usize, 8> = (0..8).filter(|&f| f != even && f != odd).collect();
    free.shuffle(rng);
    res[free[0]] = PieceKind::Queen;
    res[free[1]] = PieceKind::Knight;
    res[free[2]] = PieceKind::Knight;

    // The last three files get R, K, R from left to right, so the king ends up between the rooks.
    let mut rest = [free[3], free[4], free[5]];
    rest.sort_unstable();
    res[rest[0]] = PieceKind::Rook;
    res[rest[1]] = PieceKind::King;
    res[rest[2]] = PieceKind::Rook;
    res
}

/// Returns the back rank for `mode`
///
/// `rng` is used only for [`SetupMode::Randomized`].
pub fn back_rank<R: Rng>(mode: SetupMode, rng: &mut R) -> [PieceKind; 8] {
    match mode {
        SetupMode::Standard => STANDARD_BACK_RANK,
        SetupMode::Randomized => random_back_rank(rng),
    }
}

/// Creates the board with the initial position
///
/// Both sides get the same back rank, with a row of pawns in front of it.
pub fn initial_board<R: Rng>(mode: SetupMode, rng: &mut R) -> Board {
    let rank = back_rank(mode, rng);
    let mut b = Board::empty();
    for color in [Color::White, Color::Black] {
        for (file, kind) in File::iter().zip(rank) {
            b.add_piece(color, kind, Coord::from_parts(file, geometry::back_rank(color)));
        }
        for file in File::iter() {
            b.add_piece(
                color,
                PieceKind::Pawn,
                Coord::from_parts(file, geometry::pawn_rank(color)),
            );
        }
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rank;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn files_of(rank: &[PieceKind; 8], kind: PieceKind) -> Vec<usize> {
        (0..8).filter(|&f| rank[f] == kind).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!("standard".parse::<SetupMode>(), Ok(SetupMode::Standard));
        assert_eq!("N".parse::<SetupMode>(), Ok(SetupMode::Standard));
        assert_eq!(" Y\n".parse::<SetupMode>(), Ok(SetupMode::Randomized));
        assert_eq!("Chess960".parse::<SetupMode>(), Ok(SetupMode::Randomized));
        assert!("maybe".parse::<SetupMode>().is_err());
    }

    #[test]
    fn test_standard() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let b = initial_board(SetupMode::Standard, &mut rng);
        assert_eq!(b.validate(), Ok(()));
        assert_eq!(b.pieces_on_board().count(), 32);
        let cells = b.cells();
        let e1 = cells.get2(File::E, Rank::R1).unwrap();
        assert_eq!((e1.color, e1.kind), (Color::White, PieceKind::King));
        let d8 = cells.get2(File::D, Rank::R8).unwrap();
        assert_eq!((d8.color, d8.kind), (Color::Black, PieceKind::Queen));
        let g7 = cells.get2(File::G, Rank::R7).unwrap();
        assert_eq!((g7.color, g7.kind), (Color::Black, PieceKind::Pawn));
        assert!(cells.get2(File::E, Rank::R4).is_none());
    }

    #[test]
    fn test_randomized() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..1000 {
            let rank = random_back_rank(&mut rng);
            let bishops = files_of(&rank, PieceKind::Bishop);
            let rooks = files_of(&rank, PieceKind::Rook);
            let king = files_of(&rank, PieceKind::King);
            assert_eq!(bishops.len(), 2);
            assert_ne!(bishops[0] % 2, bishops[1] % 2);
            assert_eq!(rooks.len(), 2);
            assert_eq!(king.len(), 1);
            assert!(rooks[0] < king[0] && king[0] < rooks[1]);
            assert_eq!(files_of(&rank, PieceKind::Knight).len(), 2);
            assert_eq!(files_of(&rank, PieceKind::Queen).len(), 1);
        }
    }

    #[test]
    fn test_randomized_board() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(960);
        let b = initial_board(SetupMode::Randomized, &mut rng);
        assert_eq!(b.validate(), Ok(()));
        let cells = b.cells();
        for file in File::iter() {
            let white = cells.get2(file, Rank::R1).unwrap();
            let black = cells.get2(file, Rank::R8).unwrap();
            assert_eq!(white.kind, black.kind);
            assert_eq!(white.color, Color::White);
            assert_eq!(black.color, Color::Black);
        }
    }
}
