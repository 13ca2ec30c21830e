//! Player identifiers and the public view of player state.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player (seat index) in a tournament.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

impl From<usize> for PlayerId {
    fn from(v: usize) -> Self {
        PlayerId(v)
    }
}

impl From<PlayerId> for usize {
    fn from(player_id: PlayerId) -> Self {
        player_id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public view of one player's state (spec §3 `PlayerPublicInfo`). Never
/// carries hole cards — those are handed to each bot separately by the
/// harness, never embedded in the broadcast snapshot, so that no bot can
/// see another bot's cards before showdown.
///
/// Invariants maintained by the engine: `busted => !active`;
/// `is_all_in => active && stack == 0`; when `!active` (folded),
/// `current_bet` stays frozen at whatever was committed on the current
/// street until it is swept into the pot at street end.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicInfo {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub current_bet: u32,
    pub active: bool,
    pub busted: bool,
    pub is_all_in: bool,
}
