//! The `Bot` trait and the in-process sample bots used for local runs and
//! unrestricted-mode tests (spec §4.5 "getAction").

use holdem_shared::{ActionType, Card, PlayerId, PublicGameState};
use rand::Rng;

/// A single decision a bot hands back to the harness. `action_type` must
/// be one of the six bot-declarable `ActionType` variants; the
/// `ActionValidator` corrects anything else before it reaches the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotAction {
    pub action_type: ActionType,
    pub amount: u32,
}

/// Interface every bot implements, in-process or sandboxed behind a
/// `BotHarness`. Replaces the source's class-hierarchy dispatch with a
/// single-method trait (spec §9 "Dynamic dispatch over bots"); lookup is
/// by seat index, so implementations hold no reference back into Table.
pub trait Bot: Send {
    fn get_action(&mut self, state: &PublicGameState, hole_cards: [Card; 2]) -> BotAction;
}

/// Always checks if it can, otherwise calls. Never folds or raises.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysCheckBot;

impl Bot for AlwaysCheckBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole_cards: [Card; 2]) -> BotAction {
        BotAction {
            action_type: ActionType::Check,
            amount: 0,
        }
    }
}

/// Always folds when facing a bet, otherwise checks. Useful for the
/// BB-wins-walk and bot-timeout test scenarios.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFoldBot;

impl Bot for AlwaysFoldBot {
    fn get_action(&mut self, _state: &PublicGameState, _hole_cards: [Card; 2]) -> BotAction {
        BotAction {
            action_type: ActionType::Fold,
            amount: 0,
        }
    }
}

/// Probabilistically raises when it can open or face a bet, and calls
/// otherwise. Loosely mirrors the teacher's `SimpleBot` fold-probability
/// curve, inverted into an aggression curve. Bound to one seat at
/// construction so it can find its own entry in the public snapshot.
#[derive(Debug, Clone)]
pub struct LooseAggressiveBot {
    pub seat: PlayerId,
    pub raise_chance: f64,
}

impl LooseAggressiveBot {
    pub fn new(seat: PlayerId) -> Self {
        Self {
            seat,
            raise_chance: 0.4,
        }
    }
}

impl Bot for LooseAggressiveBot {
    fn get_action(&mut self, state: &PublicGameState, _hole_cards: [Card; 2]) -> BotAction {
        let me = state
            .player_public_infos
            .iter()
            .find(|p| p.id == self.seat)
            .expect("harness always includes the acting seat in the snapshot");
        let stack = me.stack;

        let table_current_bet = state
            .player_public_infos
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(0);

        let mut rng = rand::rng();
        if stack > 0 && rng.random::<f64>() < self.raise_chance {
            let action_type = if table_current_bet == 0 {
                ActionType::Bet
            } else {
                ActionType::Raise
            };
            BotAction {
                action_type,
                amount: state.minimum_raise_amount,
            }
        } else {
            BotAction {
                action_type: ActionType::Call,
                amount: 0,
            }
        }
    }
}
