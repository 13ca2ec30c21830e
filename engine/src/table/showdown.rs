//! SHOWDOWN (spec §4.6): deal any remaining board cards, reveal hole
//! cards where contested, resolve each pot in order via the hand
//! evaluator, and split ties with the odd chip going to the first
//! eligible player clockwise from the button.

use std::collections::BTreeMap;

use holdem_shared::{HandRecord, PlayerId, ShowdownDetails, ShowdownPlayerDetail};

use super::Table;
use crate::error::InvariantError;
use crate::eval::determine_winners;
use crate::logging::EngineLogger;

impl Table {
    pub(super) fn run_showdown(
        &mut self,
        record: &mut HandRecord,
        logger: &mut EngineLogger,
    ) -> Result<BTreeMap<PlayerId, (String, u32)>, InvariantError> {
        // Deal out any streets skipped because every remaining player was
        // already all-in (spec §4.6 "Showdown": the board always runs out
        // when more than one player is live).
        let active = self.active_player_count();
        if active > 1 {
            let mut street = self.street;
            while let Some(next) = street.next() {
                self.advance_street(next, record)?;
                street = next;
            }
        }

        if let Some((refunded_player, refund_amount)) = self.ledger.take_uncalled_bet_refund() {
            if let Some(idx) = self.players.iter().position(|p| p.id == refunded_player) {
                self.players[idx].stack += refund_amount;
            }
        }
        let seating_order: Vec<PlayerId> = self
            .seating_order_from(self.next_non_busted(self.button) % self.players.len().max(1))
            .into_iter()
            .map(|i| self.players[i].id)
            .collect();
        let pots = self.ledger.reconcile(&seating_order);

        let mut winners: BTreeMap<PlayerId, (String, u32)> = BTreeMap::new();

        if active == 1 {
            let winner_idx = self
                .players
                .iter()
                .position(|p| !p.folded)
                .expect("exactly one active player");
            let winner_id = self.players[winner_idx].id;
            let total: u32 = pots.iter().map(|p| p.amount).sum();
            self.players[winner_idx].stack += total;
            winners.insert(winner_id, ("uncontested".to_string(), total));
            logger.log_showdown(self.round_number, &winners, None);
            return Ok(winners);
        }

        let contestants: Vec<(PlayerId, [holdem_shared::Card; 2])> = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .map(|p| (p.id, p.hole_cards))
            .collect();

        let mut hand_names: BTreeMap<PlayerId, String> = BTreeMap::new();
        for &(pid, hole) in &contestants {
            let rank = crate::eval::evaluate_best_hand(hole, &self.community);
            hand_names.insert(pid, rank.name().to_string());
        }

        for pot in &pots {
            let eligible: Vec<(PlayerId, [holdem_shared::Card; 2])> = contestants
                .iter()
                .filter(|(pid, _)| pot.eligible_players.contains(pid))
                .copied()
                .collect();
            if eligible.is_empty() {
                return Err(InvariantError::NoEligiblePlayersAtShowdown(
                    winners.len(),
                ));
            }
            let results = determine_winners(&eligible, &self.community);
            let n = results.len() as u32;
            let share = pot.amount / n;
            let mut remainder = pot.amount % n;

            let ordered: Vec<PlayerId> = seating_order
                .iter()
                .filter(|p| results.iter().any(|r| r.player_id == **p))
                .copied()
                .collect();

            for pid in ordered {
                let extra = if remainder > 0 {
                    remainder -= 1;
                    1
                } else {
                    0
                };
                let amount = share + extra;
                if let Some(idx) = self.players.iter().position(|p| p.id == pid) {
                    self.players[idx].stack += amount;
                }
                let entry = winners
                    .entry(pid)
                    .or_insert_with(|| (hand_names[&pid].clone(), 0));
                entry.1 += amount;
            }
        }

        record.showdown_details = Some(ShowdownDetails {
            players: contestants.iter().map(|(pid, _)| *pid).collect(),
            hole_cards: contestants.iter().copied().collect(),
            hand_names: hand_names.clone(),
        });

        let details: Vec<ShowdownPlayerDetail> = contestants
            .iter()
            .map(|&(pid, hole)| ShowdownPlayerDetail {
                player: pid,
                hand_name: hand_names[&pid].clone(),
                hole_cards: hole,
            })
            .collect();
        logger.log_showdown(self.round_number, &winners, Some(&details));

        Ok(winners)
    }
}
