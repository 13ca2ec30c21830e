//! Wire format exchanged with a restricted-mode bot subprocess over
//! stdin/stdout, one JSON object per line.

use holdem_shared::{ActionType, Card, PublicGameState};
use serde::{Deserialize, Serialize};

/// One decision request sent to the child process's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotRequest {
    pub public_state: PublicGameState,
    pub hole_cards: [Card; 2],
}

/// The child's reply, read from its stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    pub action_type: ActionType,
    pub amount: u32,
}
