//! A shuffled 52-card deck with deterministic, seedable dealing (spec §4,
//! "Deck" in the GLOSSARY).

use std::collections::VecDeque;

use holdem_shared::{Card, CardRank, CardSuit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::InvariantError;

/// A shuffled deck, dealt from the front. Reseeded once per hand from the
/// tournament-level PRNG so a whole tournament replays bit-for-bit given
/// the same `seed` (spec §6, "determinism").
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Build and shuffle a fresh 52-card deck using `rng_seed`.
    pub fn new_shuffled(rng_seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let mut cards: Vec<Card> = (0..4)
            .flat_map(|suit| (0..13).map(move |rank| (suit, rank)))
            .map(|(suit, rank)| Card::new(CardRank::from_u8(rank), CardSuit::from_u8(suit)))
            .collect();
        cards.shuffle(&mut rng);
        Deck {
            cards: VecDeque::from(cards),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Deal one card off the top.
    pub fn deal_one(&mut self) -> Result<Card, InvariantError> {
        self.cards
            .pop_front()
            .ok_or(InvariantError::DeckExhausted {
                requested: 1,
                remaining: 0,
            })
    }

    /// Deal `n` cards off the top, in order.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, InvariantError> {
        if self.cards.len() < n {
            return Err(InvariantError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok((0..n).map(|_| self.cards.pop_front().unwrap()).collect())
    }

    /// Burn one card (standard street-transition convention); discarded,
    /// never revealed.
    pub fn burn(&mut self) -> Result<(), InvariantError> {
        self.deal_one().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffled_deck_has_52_unique_cards() {
        let deck = Deck::new_shuffled(42);
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn same_seed_deals_same_order() {
        let mut a = Deck::new_shuffled(7);
        let mut b = Deck::new_shuffled(7);
        assert_eq!(a.deal_n(7).unwrap(), b.deal_n(7).unwrap());
    }

    #[test]
    fn different_seed_usually_deals_different_order() {
        let mut a = Deck::new_shuffled(1);
        let mut b = Deck::new_shuffled(2);
        assert_ne!(a.deal_n(7).unwrap(), b.deal_n(7).unwrap());
    }

    #[test]
    fn exhausted_deck_errors_instead_of_panicking() {
        let mut deck = Deck::new_shuffled(1);
        assert!(deck.deal_n(52).is_ok());
        assert!(matches!(
            deck.deal_one(),
            Err(InvariantError::DeckExhausted { .. })
        ));
    }
}
