//! The betting-round loop (spec §4.6 "Betting round").

use std::collections::VecDeque;

use holdem_shared::{Action, HandRecord, Street};

use super::Table;
use crate::error::InvariantError;
use crate::harness::BotHarness;
use crate::logging::{EngineLogger, IllegalMoveLogEntry};
use crate::validator::{assert_legal, validate, DeclaredAction};

impl Table {
    /// Indices of players still eligible to act (not folded, not
    /// busted, not all-in), in clockwise order starting right after
    /// `from`.
    fn actionable_order_from(&self, from: usize) -> VecDeque<usize> {
        let n = self.players.len();
        let mut order = VecDeque::new();
        for i in 1..=n {
            let idx = (from + i) % n;
            let p = &self.players[idx];
            if !p.folded && !p.busted && !p.all_in {
                order.push_back(idx);
            }
        }
        order
    }

    /// Indices of players who still owe chips to match the street's
    /// current bet, in clockwise order starting right after `from`. Used
    /// to rebuild the pending queue after a reopening bet/raise — the
    /// aggressor (and anyone else already matched) must not be asked
    /// again absent a further raise (spec §4.6).
    fn unmatched_order_from(&self, from: usize) -> VecDeque<usize> {
        let n = self.players.len();
        let current_bet = self.context().current_bet;
        let mut order = VecDeque::new();
        for i in 1..=n {
            let idx = (from + i) % n;
            let p = &self.players[idx];
            if !p.folded && !p.busted && !p.all_in && self.round_bets[idx] < current_bet {
                order.push_back(idx);
            }
        }
        order
    }

    pub(super) fn run_betting_round(
        &mut self,
        street: Street,
        harnesses: &mut [BotHarness],
        record: &mut HandRecord,
        logger: &mut EngineLogger,
    ) -> Result<(), InvariantError> {
        let first_actor_anchor = match street {
            Street::Preflop => self.next_non_busted(self.next_non_busted(self.button)),
            _ => self.button,
        };
        let mut pending = self.actionable_order_from(first_actor_anchor);
        // Preflop option: the queue built above already ends on the BB
        // (the player right after whom we anchored), so it cannot close
        // before BB has acted once.

        let mut actions_taken = 0usize;
        const MAX_ACTIONS_PER_ROUND: usize = 10_000;

        while let Some(actor_idx) = pending.pop_front() {
            actions_taken += 1;
            if actions_taken > MAX_ACTIONS_PER_ROUND {
                return Err(InvariantError::BettingRoundDidNotTerminate(actions_taken));
            }

            let p = &self.players[actor_idx];
            if p.folded || p.busted || p.all_in {
                continue;
            }

            let player_state = self.player_state_of(actor_idx);
            let context = self.context();
            let public_state = self.public_state(record);
            let hole_cards = self.players[actor_idx].hole_cards;
            let player_id = self.players[actor_idx].id;

            let (bot_action, fallback_reason) =
                harnesses[actor_idx].decide(&public_state, hole_cards, player_state, context);

            let declared = DeclaredAction {
                action_type: bot_action.action_type,
                amount: bot_action.amount,
            };
            let corrected = validate(declared, player_state, context);
            assert_legal(corrected, player_state, context)
                .map_err(InvariantError::IllegalActionEscaped)?;

            if corrected.action_type != declared.action_type || corrected.amount != declared.amount
            {
                logger.log_illegal_move(IllegalMoveLogEntry {
                    round: self.round_number,
                    hand: self.round_number,
                    street,
                    player: player_id,
                    declared_type: declared.action_type,
                    declared_amount: declared.amount,
                    corrected_type: corrected.action_type,
                    corrected_amount: corrected.amount,
                    reason: fallback_reason
                        .unwrap_or_else(|| "action validator correction".to_string()),
                });
            }

            let reopens = corrected.reopens_action(player_state, context);
            self.apply_action(actor_idx, corrected, record);

            if reopens {
                self.ledger_mark_aggressor_and_requeue(actor_idx, &mut pending);
            }

            if self.active_player_count() <= 1 {
                break;
            }
        }

        Ok(())
    }

    fn ledger_mark_aggressor_and_requeue(&mut self, actor_idx: usize, pending: &mut VecDeque<usize>) {
        pending.clear();
        pending.extend(self.unmatched_order_from(actor_idx));
    }

    fn apply_action(
        &mut self,
        actor_idx: usize,
        corrected: crate::validator::CorrectedAction,
        record: &mut HandRecord,
    ) {
        use holdem_shared::ActionType;

        let player_state = self.player_state_of(actor_idx);
        let context = self.context();
        let chips = corrected.chips_to_commit(player_state, context);
        let player_id = self.players[actor_idx].id;

        match corrected.action_type {
            ActionType::Fold => {
                self.players[actor_idx].folded = true;
                self.ledger.mark_folded(player_id);
            }
            ActionType::Check => {}
            ActionType::Call | ActionType::Bet | ActionType::Raise | ActionType::AllIn => {
                self.players[actor_idx].stack -= chips;
                self.round_bets[actor_idx] += chips;
                self.ledger.record_contribution(player_id, chips);
                if self.players[actor_idx].stack == 0 {
                    self.players[actor_idx].all_in = true;
                }
                // A full-size-or-larger all-in reopens action exactly like an
                // ordinary bet/raise (validator.rs::reopens_action) and must
                // bump minimum_raise_amount the same way, or a subsequent
                // re-raise is floored against a stale, too-small increment.
                if matches!(
                    corrected.action_type,
                    ActionType::Bet | ActionType::Raise | ActionType::AllIn
                ) {
                    let by = self.round_bets[actor_idx].saturating_sub(
                        self.round_bets
                            .iter()
                            .enumerate()
                            .filter(|&(i, _)| i != actor_idx)
                            .map(|(_, &v)| v)
                            .max()
                            .unwrap_or(0),
                    );
                    if by >= self.minimum_raise_amount {
                        self.minimum_raise_amount = by;
                    }
                }
            }
            ActionType::SmallBlind | ActionType::BigBlind => unreachable!(
                "blinds are posted in setup_hand, never declared by a bot action"
            ),
        }

        let street_history = record
            .per_street
            .entry(self.street)
            .or_insert_with(Default::default);
        street_history.actions.push(Action::new(
            player_id,
            corrected.action_type,
            chips,
        ));
    }
}
