//! `BotHarness`: runs a bot in isolation, deep-copies the public game
//! state before handing it over, enforces the restricted-mode limits,
//! and converts any crash/timeout into the fallback action (spec §4.5).

pub mod protocol;
pub mod restricted;
pub mod unrestricted;

use holdem_shared::{ActionType, Card, PublicGameState};

use crate::bot::{Bot, BotAction};
use crate::validator::{legal_actions, PlayerState, ValidationContext};
use restricted::{FallbackReason, RestrictedBot, RestrictedOutcome};
use unrestricted::UnrestrictedBot;

/// The two harness modes (spec §4.5). Both must produce identical game
/// outcomes given identical bot behavior.
pub enum BotHarness {
    Restricted(RestrictedBot),
    Unrestricted(UnrestrictedBot),
}

impl BotHarness {
    pub fn restricted(path: String, time_limit_ms: u64, memory_limit_mb: u64) -> Self {
        BotHarness::Restricted(RestrictedBot::new(path, time_limit_ms, memory_limit_mb))
    }

    pub fn unrestricted(bot: Box<dyn Bot>) -> Self {
        BotHarness::Unrestricted(UnrestrictedBot::new(bot))
    }

    /// Produce a deep copy of `state` (plain struct clone — the shared
    /// types are an acyclic graph, so this is a straightforward
    /// structural clone per spec §4.1) and the actor's hole cards, run
    /// the bot, and fall back to check/fold on any limit violation.
    /// Returns the decision plus, when a fallback fired, the reason to
    /// record in `illegal_moves.log`.
    pub fn decide(
        &mut self,
        state: &PublicGameState,
        hole_cards: [Card; 2],
        player: PlayerState,
        context: ValidationContext,
    ) -> (BotAction, Option<String>) {
        let state_copy = state.clone();
        match self {
            BotHarness::Unrestricted(bot) => (bot.decide(&state_copy, hole_cards), None),
            BotHarness::Restricted(bot) => match bot.decide(&state_copy, hole_cards) {
                RestrictedOutcome::Decided(action) => (action, None),
                RestrictedOutcome::Fallback(reason) => {
                    (fallback_action(player, context), Some(describe(&reason)))
                }
            },
        }
    }
}

fn fallback_action(player: PlayerState, context: ValidationContext) -> BotAction {
    let legal = legal_actions(player, context);
    if legal.can_check {
        BotAction {
            action_type: ActionType::Check,
            amount: 0,
        }
    } else {
        BotAction {
            action_type: ActionType::Fold,
            amount: 0,
        }
    }
}

fn describe(reason: &FallbackReason) -> String {
    match reason {
        FallbackReason::Timeout => "timeout".to_string(),
        FallbackReason::MemoryLimitExceeded { rss_bytes } => {
            format!("memory limit exceeded: {rss_bytes} bytes resident")
        }
        FallbackReason::ProcessCrashed => "process crashed".to_string(),
        FallbackReason::MalformedResponse(detail) => format!("malformed response: {detail}"),
        FallbackReason::SpawnFailed(detail) => format!("failed to spawn bot process: {detail}"),
    }
}
