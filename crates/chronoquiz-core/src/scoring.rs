//! Partial-credit scoring for year guesses.
//!
//! An exact guess earns [`MAX_POINTS`]. Near misses earn 1-5 points depending
//! on how far off they are, with tolerances that widen the further back in
//! time the correct year lies.

use serde::{Deserialize, Serialize};

/// Points for an exact answer.
pub const MAX_POINTS: u8 = 10;

/// Year-range bucket with its own distance-to-points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraBand {
    /// 2000 onwards.
    Contemporary,
    /// 1900-1999.
    Modern,
    /// 1500-1899.
    EarlyModern,
    /// 0-1499.
    Medieval,
    /// 2000 BC up to 1 BC.
    Ancient,
    /// Before 2000 BC.
    Prehistoric,
}

impl EraBand {
    /// The band a correct year falls into.
    pub fn of(correct: i32) -> Self {
        match correct {
            2000.. => EraBand::Contemporary,
            1900..=1999 => EraBand::Modern,
            1500..=1899 => EraBand::EarlyModern,
            0..=1499 => EraBand::Medieval,
            -2000..=-1 => EraBand::Ancient,
            _ => EraBand::Prehistoric,
        }
    }

    /// `(max distance, points)` tiers, tightest first. Distances are inclusive.
    ///
    /// The contemporary band deliberately has no 4- or 3-point tier.
    pub fn tiers(self) -> &'static [(u64, u8)] {
        match self {
            EraBand::Contemporary => &[(1, 5), (2, 2), (5, 1)],
            EraBand::Modern => &[(1, 5), (2, 4), (3, 3), (5, 2), (10, 1)],
            EraBand::EarlyModern => &[(1, 5), (5, 4), (10, 3), (25, 2), (100, 1)],
            EraBand::Medieval => &[(3, 5), (5, 4), (10, 3), (25, 2), (100, 1)],
            EraBand::Ancient => &[(5, 5), (10, 4), (20, 3), (50, 2), (150, 1)],
            EraBand::Prehistoric => &[(10, 5), (50, 4), (100, 3), (250, 2), (500, 1)],
        }
    }
}

/// Score a guess against the correct year. Total over all `i32` pairs.
pub fn score(guess: i32, correct: i32) -> u8 {
    let diff = (i64::from(guess) - i64::from(correct)).unsigned_abs();
    if diff == 0 {
        return MAX_POINTS;
    }

    EraBand::of(correct)
        .tiers()
        .iter()
        .find(|(max_distance, _)| diff <= *max_distance)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}
