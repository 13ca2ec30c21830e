//! Hand-ranking types shared between the evaluator and showdown records.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerId;

/// Categories of poker hands, ordered weakest to strongest. Declaration
/// order doubles as the `Ord` comparison, so reordering these changes
/// hand-strength comparisons.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRankCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeKind,
    Straight,
    Flush,
    FullHouse,
    FourKind,
    StraightFlush,
    RoyalFlush,
}

/// A complete hand ranking: category plus the tie-break vector described
/// in spec §4.2 (category-specific, already ordered so lexicographic
/// comparison of the tuple `(category, tiebreakers)` is correct).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank {
    pub category: HandRankCategory,
    pub tiebreakers: Vec<u8>,
}

impl HandRank {
    pub fn name(&self) -> &'static str {
        match self.category {
            HandRankCategory::HighCard => "High Card",
            HandRankCategory::Pair => "One Pair",
            HandRankCategory::TwoPair => "Two Pair",
            HandRankCategory::ThreeKind => "Three of a Kind",
            HandRankCategory::Straight => "Straight",
            HandRankCategory::Flush => "Flush",
            HandRankCategory::FullHouse => "Full House",
            HandRankCategory::FourKind => "Four of a Kind",
            HandRankCategory::StraightFlush => "Straight Flush",
            HandRankCategory::RoyalFlush => "Royal Flush",
        }
    }
}

/// Result of hand evaluation for one player at showdown.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandResult {
    pub player_id: PlayerId,
    pub rank: HandRank,
    pub best_five: [Card; 5],
}
