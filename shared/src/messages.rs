//! The public, bot-facing snapshot of table state (spec §3 `PublicGameState`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::HandRecord;
use crate::player::{PlayerId, PlayerPublicInfo};
use crate::pot::Pot;

/// Small blind / big blind amounts in effect for the current hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blinds {
    pub small_blind: u32,
    pub big_blind: u32,
}

/// The deep-copyable snapshot handed to a bot before each decision and
/// broadcast to observers. Deliberately excludes any hole cards except
/// those revealed in `previousHandHistories` at showdown — see the
/// "no cheating surface" invariant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicGameState {
    pub round_number: u32,
    pub player_public_infos: Vec<PlayerPublicInfo>,
    pub button_position: PlayerId,
    pub community_cards: Vec<Card>,
    pub total_pot: u32,
    pub pots: Vec<Pot>,
    pub blinds: Blinds,
    pub blinds_schedule: BTreeMap<u32, Blinds>,
    pub minimum_raise_amount: u32,
    pub current_hand_history: HandRecord,
    pub previous_hand_histories: Vec<HandRecord>,
}
