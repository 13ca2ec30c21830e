//! Pot types produced by side-pot reconciliation (spec §4.4).

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// One layer of the pot: an amount and the set of players who may
/// contest it. `eligible_players` is non-empty for every pot handed to
/// showdown distribution; ordered in table (clockwise-from-button)
/// order so the odd-chip rule can pick the first entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: u32,
    pub eligible_players: Vec<PlayerId>,
}

impl Pot {
    pub fn new(amount: u32, eligible_players: Vec<PlayerId>) -> Self {
        Self {
            amount,
            eligible_players,
        }
    }
}
