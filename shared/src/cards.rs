//! Card types for the Hold'em engine.

use serde::{Deserialize, Serialize};

/// Card rank values (0=Ace, 1=2, ..., 12=King).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRank {
    Ace = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
    Nine = 8,
    Ten = 9,
    Jack = 10,
    Queen = 11,
    King = 12,
}

impl CardRank {
    /// Convert from u8 to CardRank. Panics if value > 12.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CardRank::Ace,
            1 => CardRank::Two,
            2 => CardRank::Three,
            3 => CardRank::Four,
            4 => CardRank::Five,
            5 => CardRank::Six,
            6 => CardRank::Seven,
            7 => CardRank::Eight,
            8 => CardRank::Nine,
            9 => CardRank::Ten,
            10 => CardRank::Jack,
            11 => CardRank::Queen,
            12 => CardRank::King,
            _ => panic!("invalid card rank: {value}"),
        }
    }

    pub fn as_usize(self) -> usize {
        self as usize
    }

    /// Ace-high numeric value (2..=14) used throughout hand evaluation.
    pub fn high_value(self) -> u8 {
        match self {
            CardRank::Ace => 14,
            CardRank::Two => 2,
            CardRank::Three => 3,
            CardRank::Four => 4,
            CardRank::Five => 5,
            CardRank::Six => 6,
            CardRank::Seven => 7,
            CardRank::Eight => 8,
            CardRank::Nine => 9,
            CardRank::Ten => 10,
            CardRank::Jack => 11,
            CardRank::Queen => 12,
            CardRank::King => 13,
        }
    }
}

/// Card suit values (0=Clubs, 1=Diamonds, 2=Hearts, 3=Spades).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSuit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl CardSuit {
    /// Convert from u8 to CardSuit. Panics if value > 3.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CardSuit::Clubs,
            1 => CardSuit::Diamonds,
            2 => CardSuit::Hearts,
            3 => CardSuit::Spades,
            _ => panic!("invalid card suit: {value}"),
        }
    }

    pub fn as_usize(self) -> usize {
        self as usize
    }
}

/// A playing card represented as a compact `u8` value: `suit * 13 + rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card(pub u8);

impl Card {
    pub fn new(rank: CardRank, suit: CardSuit) -> Self {
        Card((suit as u8) * 13 + (rank as u8))
    }

    pub fn rank(self) -> CardRank {
        CardRank::from_u8(self.0 % 13)
    }

    pub fn suit(self) -> CardSuit {
        CardSuit::from_u8(self.0 / 13)
    }

    pub fn rank_str(self) -> &'static str {
        match self.rank() {
            CardRank::Ace => "A",
            CardRank::Two => "2",
            CardRank::Three => "3",
            CardRank::Four => "4",
            CardRank::Five => "5",
            CardRank::Six => "6",
            CardRank::Seven => "7",
            CardRank::Eight => "8",
            CardRank::Nine => "9",
            CardRank::Ten => "T",
            CardRank::Jack => "J",
            CardRank::Queen => "Q",
            CardRank::King => "K",
        }
    }

    pub fn suit_char(self) -> char {
        match self.suit() {
            CardSuit::Clubs => 'c',
            CardSuit::Diamonds => 'd',
            CardSuit::Hearts => 'h',
            CardSuit::Spades => 's',
        }
    }

    /// Two-character notation per spec §6, e.g. "Ah", "Ts", "2c".
    pub fn code(self) -> String {
        format!("{}{}", self.rank_str(), self.suit_char())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_rank_and_suit() {
        for suit in [
            CardSuit::Clubs,
            CardSuit::Diamonds,
            CardSuit::Hearts,
            CardSuit::Spades,
        ] {
            for v in 0u8..13 {
                let rank = CardRank::from_u8(v);
                let c = Card::new(rank, suit);
                assert_eq!(c.rank().as_usize(), rank.as_usize());
                assert_eq!(c.suit().as_usize(), suit.as_usize());
            }
        }
    }

    #[test]
    fn code_matches_spec_notation() {
        assert_eq!(Card::new(CardRank::Ace, CardSuit::Hearts).code(), "Ah");
        assert_eq!(Card::new(CardRank::Ten, CardSuit::Spades).code(), "Ts");
        assert_eq!(Card::new(CardRank::Two, CardSuit::Clubs).code(), "2c");
    }
}
