//! Action and hand-history types (spec §3).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerId;

/// The kind of action a player (or the engine, for blinds) took.
/// `SmallBlind`/`BigBlind` only ever appear in history — a bot's
/// `getAction` is never allowed to return them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    SmallBlind,
    BigBlind,
}

impl ActionType {
    /// Whether a bot is permitted to declare this action type.
    pub fn is_bot_declarable(self) -> bool {
        !matches!(self, ActionType::SmallBlind | ActionType::BigBlind)
    }
}

/// One action taken during a hand: who, what, how much.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    pub player: PlayerId,
    pub action_type: ActionType,
    pub amount: u32,
}

impl Action {
    pub fn new(player: PlayerId, action_type: ActionType, amount: u32) -> Self {
        Self {
            player,
            action_type,
            amount,
        }
    }
}

/// The four betting streets of a hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Number of community cards visible once this street is dealt.
    pub fn community_card_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// The community cards revealed and actions taken on one street.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StreetHistory {
    pub community_cards: Vec<Card>,
    pub actions: Vec<Action>,
}

/// Per-player showdown detail: which hand a player showed and what it
/// was made of.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownPlayerDetail {
    pub player: PlayerId,
    pub hand_name: String,
    pub hole_cards: [Card; 2],
}

/// Recorded only when the hand actually reaches showdown (i.e. more
/// than one player remains after the river). A hand decided by
/// everyone-but-one folding carries no `ShowdownDetails`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownDetails {
    pub players: Vec<PlayerId>,
    pub hole_cards: BTreeMap<PlayerId, [Card; 2]>,
    pub hand_names: BTreeMap<PlayerId, String>,
}

/// The full record of one completed hand, keyed by street.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HandRecord {
    pub per_street: BTreeMap<Street, StreetHistory>,
    pub showdown_details: Option<ShowdownDetails>,
}
