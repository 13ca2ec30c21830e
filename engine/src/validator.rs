//! `ActionValidator`: corrects a bot's declared action into a legal one
//! and exposes the legal-action set for a given context (spec §4.3).

use holdem_shared::ActionType;

/// The chips a player has already committed this street, plus their
/// remaining stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub stack: u32,
    pub current_bet: u32,
}

/// Betting context on the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// The highest `current_bet` across players on this street.
    pub current_bet: u32,
    /// Size of the last full bet-or-raise increment; BB until the first
    /// postflop bet, BB preflop.
    pub minimum_raise_amount: u32,
}

/// What a bot declared: a bot-choosable action type plus an amount
/// whose meaning depends on the type (spec §4.3 "Semantics").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredAction {
    pub action_type: ActionType,
    pub amount: u32,
}

/// The validator's corrected, always-legal action. `amount` is:
/// - ignored (0) for `Fold`/`Check`
/// - the chips moved to the pot for `Call`/`AllIn`
/// - the absolute chips placed on the street for `Bet`
/// - the additional chips raised **above `context.current_bet`** for
///   `Raise` (spec §4.3/§6: "the additional chips beyond the ... current
///   street currentBet" — the street's currentBet, not the actor's own)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectedAction {
    pub action_type: ActionType,
    pub amount: u32,
}

impl CorrectedAction {
    /// Chips the actor must move from stack to pot to execute this
    /// action, given their current street state.
    pub fn chips_to_commit(&self, player: PlayerState, context: ValidationContext) -> u32 {
        match self.action_type {
            ActionType::Fold | ActionType::Check => 0,
            ActionType::Call | ActionType::AllIn => self.amount,
            ActionType::Bet => self.amount.saturating_sub(player.current_bet),
            ActionType::Raise => (context.current_bet + self.amount)
                .saturating_sub(player.current_bet),
            ActionType::SmallBlind | ActionType::BigBlind => self.amount,
        }
    }

    /// The actor's `current_bet` after this action is applied.
    pub fn resulting_current_bet(&self, player: PlayerState, context: ValidationContext) -> u32 {
        match self.action_type {
            ActionType::Fold | ActionType::Check => player.current_bet,
            ActionType::Call | ActionType::AllIn => player.current_bet + self.amount,
            ActionType::Bet => self.amount,
            ActionType::Raise => context.current_bet + self.amount,
            ActionType::SmallBlind | ActionType::BigBlind => player.current_bet + self.amount,
        }
    }

    /// Whether this action is a full raise that reopens the betting
    /// round (i.e. the increment over `context.current_bet` is at least
    /// `minimum_raise_amount`).
    pub fn reopens_action(&self, player: PlayerState, context: ValidationContext) -> bool {
        match self.action_type {
            ActionType::Bet => self.amount >= context.minimum_raise_amount.max(1),
            ActionType::Raise => self.amount >= context.minimum_raise_amount,
            ActionType::AllIn => {
                let by = self
                    .resulting_current_bet(player, context)
                    .saturating_sub(context.current_bet);
                by >= context.minimum_raise_amount
            }
            _ => false,
        }
    }
}

/// Predicate bundle a bot can use to self-validate before declaring
/// (spec §4.3 `legalActions`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalActions {
    pub can_check: bool,
    pub can_call: Option<u32>,
    pub can_bet: Option<(u32, u32)>,
    pub can_raise: Option<(u32, u32)>,
    pub can_fold: bool,
}

pub fn legal_actions(player: PlayerState, context: ValidationContext) -> LegalActions {
    let amount_to_call = context.current_bet.saturating_sub(player.current_bet);

    let can_check = amount_to_call == 0;
    let can_call = if amount_to_call > 0 && player.stack > 0 {
        Some(amount_to_call.min(player.stack))
    } else {
        None
    };

    let can_bet = if context.current_bet == 0 && player.stack > 0 {
        let min = context.minimum_raise_amount.min(player.stack);
        Some((min, player.stack))
    } else {
        None
    };

    let can_raise = if context.current_bet > 0 && player.stack > amount_to_call {
        let max_amount = player.stack - amount_to_call;
        let min = context.minimum_raise_amount.min(max_amount);
        Some((min, max_amount))
    } else {
        None
    };

    LegalActions {
        can_check,
        can_call,
        can_bet,
        can_raise,
        can_fold: true,
    }
}

/// Apply the eight correction rules of spec §4.3, in order, returning an
/// action that is always legal for `player` under `context`.
pub fn validate(
    declared: DeclaredAction,
    player: PlayerState,
    context: ValidationContext,
) -> CorrectedAction {
    let amount_to_call = context.current_bet.saturating_sub(player.current_bet);

    // Rule 1: unknown/non-bot-declarable action types.
    let mut action_type = declared.action_type;
    if !action_type.is_bot_declarable() {
        action_type = if amount_to_call > 0 {
            ActionType::Fold
        } else {
            ActionType::Check
        };
    }

    // Rule 2: fold with nothing to call is an anti-mistake check.
    if action_type == ActionType::Fold && amount_to_call == 0 {
        action_type = ActionType::Check;
    }

    // Rule 3: check facing a bet is a fold.
    if action_type == ActionType::Check && amount_to_call > 0 {
        action_type = ActionType::Fold;
    }

    if action_type == ActionType::Fold || action_type == ActionType::Check {
        return CorrectedAction {
            action_type,
            amount: 0,
        };
    }

    // Rule 4: call, capped to stack (becomes all-in if short).
    if action_type == ActionType::Call {
        return if player.stack <= amount_to_call {
            CorrectedAction {
                action_type: ActionType::AllIn,
                amount: player.stack,
            }
        } else {
            CorrectedAction {
                action_type: ActionType::Call,
                amount: amount_to_call,
            }
        };
    }

    // Rule 5: a `bet` declared while facing a live bet is really a raise
    // attempt, unless the actor can't afford any legal raise at all.
    if action_type == ActionType::Bet && context.current_bet > 0 {
        if player.stack <= amount_to_call {
            return CorrectedAction {
                action_type: ActionType::Fold,
                amount: 0,
            };
        }
        action_type = ActionType::Raise;
    }

    if action_type == ActionType::AllIn {
        return CorrectedAction {
            action_type: ActionType::AllIn,
            amount: player.stack,
        };
    }

    match action_type {
        ActionType::Bet => {
            // Amount is the absolute total placed on the street.
            let total = declared.amount.max(context.minimum_raise_amount);
            let max_total = player.stack + player.current_bet;
            if total >= max_total {
                return CorrectedAction {
                    action_type: ActionType::AllIn,
                    amount: player.stack,
                };
            }
            CorrectedAction {
                action_type: ActionType::Bet,
                amount: total,
            }
        }
        ActionType::Raise => {
            // Declared amount means "additional chips above context.current_bet"
            // (spec §4.3/§6), not chips above the actor's own current_bet.
            let max_amount = player.stack.saturating_sub(amount_to_call);
            let amount = declared.amount.max(context.minimum_raise_amount);
            if amount >= max_amount {
                return CorrectedAction {
                    action_type: ActionType::AllIn,
                    amount: player.stack,
                };
            }
            CorrectedAction {
                action_type: ActionType::Raise,
                amount,
            }
        }
        other => CorrectedAction {
            action_type: other,
            amount: declared.amount,
        },
    }
}

/// Defensive boundary (spec §7 class 3): `validate` must never hand back
/// an action outside `legal_actions`. Returns the legal-action snapshot
/// as the error payload when it does, so the caller can surface it
/// verbatim in `InvariantError::IllegalActionEscaped`.
pub fn assert_legal(
    action: CorrectedAction,
    player: PlayerState,
    context: ValidationContext,
) -> Result<(), LegalActions> {
    let legal = legal_actions(player, context);
    let ok = match action.action_type {
        ActionType::Fold => true,
        ActionType::Check => legal.can_check,
        ActionType::Call => legal.can_call == Some(action.amount),
        ActionType::AllIn => action.amount == player.stack,
        ActionType::Bet => legal
            .can_bet
            .is_some_and(|(min, max)| action.amount >= min && action.amount <= max),
        ActionType::Raise => legal
            .can_raise
            .is_some_and(|(min, max)| action.amount >= min && action.amount <= max),
        ActionType::SmallBlind | ActionType::BigBlind => false,
    };
    if ok {
        Ok(())
    } else {
        Err(legal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current_bet: u32, min_raise: u32) -> ValidationContext {
        ValidationContext {
            current_bet,
            minimum_raise_amount: min_raise,
        }
    }

    fn player(stack: u32, current_bet: u32) -> PlayerState {
        PlayerState { stack, current_bet }
    }

    #[test]
    fn fold_with_nothing_to_call_becomes_check() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Fold,
                amount: 0,
            },
            player(1000, 0),
            ctx(0, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Check);
    }

    #[test]
    fn check_facing_bet_becomes_fold() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Check,
                amount: 0,
            },
            player(1000, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Fold);
    }

    #[test]
    fn short_call_becomes_all_in() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Call,
                amount: 0,
            },
            player(15, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::AllIn);
        assert_eq!(corrected.amount, 15);
    }

    #[test]
    fn undersized_raise_is_bumped_to_minimum() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Raise,
                amount: 5,
            },
            player(1000, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Raise);
        assert_eq!(corrected.amount, 20); // bumped up to minimum_raise_amount
    }

    #[test]
    fn raise_exceeding_stack_becomes_all_in() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Raise,
                amount: 500,
            },
            player(100, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::AllIn);
        assert_eq!(corrected.amount, 100);
    }

    #[test]
    fn bet_facing_a_bet_reinterpreted_as_raise() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Bet,
                amount: 60,
            },
            player(1000, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Raise);
        assert_eq!(corrected.amount, 60);
    }

    #[test]
    fn bet_facing_bet_with_no_raise_room_folds() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Bet,
                amount: 60,
            },
            player(10, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Fold);
    }

    #[test]
    fn unknown_action_type_falls_back_by_pending_bet() {
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::SmallBlind,
                amount: 0,
            },
            player(1000, 0),
            ctx(20, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Fold);

        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::BigBlind,
                amount: 0,
            },
            player(1000, 0),
            ctx(0, 20),
        );
        assert_eq!(corrected.action_type, ActionType::Check);
    }

    #[test]
    fn minimum_raise_correction_matches_worked_example() {
        // Current bet 50, minimumRaise 20: ('raise', 5) -> ('raise', 20);
        // if stack < 70 -> ('all-in', stack).
        let context = ctx(50, 20);
        let corrected = validate(
            DeclaredAction {
                action_type: ActionType::Raise,
                amount: 5,
            },
            player(1000, 0),
            context,
        );
        assert_eq!(corrected.action_type, ActionType::Raise);
        assert_eq!(corrected.amount, 20);
        assert_eq!(corrected.chips_to_commit(player(1000, 0), context), 70);
        assert_eq!(corrected.resulting_current_bet(player(1000, 0), context), 70);

        let corrected_short = validate(
            DeclaredAction {
                action_type: ActionType::Raise,
                amount: 5,
            },
            player(60, 0),
            context,
        );
        assert_eq!(corrected_short.action_type, ActionType::AllIn);
        assert_eq!(corrected_short.amount, 60);
    }

    #[test]
    fn validate_always_produces_a_legal_action() {
        let contexts = [ctx(0, 20), ctx(20, 20), ctx(50, 20)];
        let players = [player(1000, 0), player(15, 0), player(60, 30)];
        let declared = [
            DeclaredAction { action_type: ActionType::Fold, amount: 0 },
            DeclaredAction { action_type: ActionType::Check, amount: 0 },
            DeclaredAction { action_type: ActionType::Call, amount: 0 },
            DeclaredAction { action_type: ActionType::Bet, amount: 7 },
            DeclaredAction { action_type: ActionType::Raise, amount: 7 },
            DeclaredAction { action_type: ActionType::AllIn, amount: 0 },
        ];
        for &context in &contexts {
            for &p in &players {
                for &d in &declared {
                    let corrected = validate(d, p, context);
                    assert!(
                        assert_legal(corrected, p, context).is_ok(),
                        "declared {d:?} under player {p:?}, context {context:?} corrected to \
                         {corrected:?} which escaped legal_actions"
                    );
                }
            }
        }
    }
}
