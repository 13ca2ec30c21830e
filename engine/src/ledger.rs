//! `PotLedger`: tracks per-player contributions for a hand and, on
//! demand, decomposes them into an ordered sequence of pots with
//! per-pot eligibility (spec §4.4).

use std::collections::BTreeMap;

use holdem_shared::{PlayerId, Pot};

/// Accumulates chips committed by each player during a hand and
/// reconciles them into pots at street boundaries or at showdown.
#[derive(Debug, Default, Clone)]
pub struct PotLedger {
    /// Cumulative contribution per player across the whole hand so far.
    contributions: BTreeMap<PlayerId, u32>,
    folded: std::collections::BTreeSet<PlayerId>,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` more chips committed by `player` (call, bet,
    /// raise, blind, or all-in).
    pub fn record_contribution(&mut self, player: PlayerId, amount: u32) {
        *self.contributions.entry(player).or_insert(0) += amount;
    }

    pub fn mark_folded(&mut self, player: PlayerId) {
        self.folded.insert(player);
    }

    pub fn contribution_of(&self, player: PlayerId) -> u32 {
        self.contributions.get(&player).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.contributions.values().sum()
    }

    /// Uncalled-bet refund (spec §4.4): if exactly one player's
    /// contribution strictly exceeds every other player's, the excess
    /// above the second-highest contribution is not contestable and is
    /// returned. Returns `Some((player, refund_amount))` and reduces
    /// that player's recorded contribution by `refund_amount` so the
    /// subsequent `reconcile` call never produces a singleton-eligible
    /// pot for it.
    pub fn take_uncalled_bet_refund(&mut self) -> Option<(PlayerId, u32)> {
        let mut sorted: Vec<(PlayerId, u32)> =
            self.contributions.iter().map(|(&p, &a)| (p, a)).collect();
        sorted.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let (top_player, top_amount) = *sorted.first()?;
        let second_amount = sorted.get(1).map(|&(_, a)| a).unwrap_or(0);
        if top_amount <= second_amount || top_amount == 0 {
            return None;
        }
        let refund = top_amount - second_amount;
        self.contributions.insert(top_player, second_amount);
        Some((top_player, refund))
    }

    /// Decompose contributions into pots per spec §4.4: group by
    /// distinct contribution level, each layer's amount is
    /// `width * count(contribution >= level)` over every contributor
    /// (folded contributions stay in the pot), and eligibility is the
    /// subset of that count who have not folded. `seating_order` lists
    /// players in clockwise order starting from the player immediately
    /// after the button, used only to produce deterministic eligibility
    /// ordering (first-in-order wins ties for the odd chip downstream).
    pub fn reconcile(&self, seating_order: &[PlayerId]) -> Vec<Pot> {
        let mut levels: Vec<u32> = self
            .contributions
            .values()
            .copied()
            .filter(|&v| v > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for level in levels {
            let width = level - prev;
            let contributors_at_level: Vec<PlayerId> = self
                .contributions
                .iter()
                .filter(|&(_, &amount)| amount >= level)
                .map(|(&p, _)| p)
                .collect();
            let amount = width * contributors_at_level.len() as u32;

            let mut eligible: Vec<PlayerId> = seating_order
                .iter()
                .filter(|p| contributors_at_level.contains(p) && !self.folded.contains(p))
                .copied()
                .collect();
            // seating_order should already contain every contributor, but
            // guard against callers passing a partial order.
            for p in &contributors_at_level {
                if !self.folded.contains(p) && !eligible.contains(p) {
                    eligible.push(*p);
                }
            }

            if amount > 0 {
                pots.push(Pot::new(amount, eligible));
            }
            prev = level;
        }
        pots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: usize) -> PlayerId {
        PlayerId(n)
    }

    #[test]
    fn three_way_all_in_side_pots() {
        let mut ledger = PotLedger::new();
        ledger.record_contribution(pid(0), 100);
        ledger.record_contribution(pid(1), 300);
        ledger.record_contribution(pid(2), 500);

        let refund = ledger.take_uncalled_bet_refund();
        assert_eq!(refund, Some((pid(2), 200)));

        let order = vec![pid(0), pid(1), pid(2)];
        let pots = ledger.reconcile(&order);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[0].eligible_players, vec![pid(0), pid(1), pid(2)]);
        assert_eq!(pots[1].amount, 400);
        assert_eq!(pots[1].eligible_players, vec![pid(1), pid(2)]);

        let total_awarded: u32 = pots.iter().map(|p| p.amount).sum::<u32>() + refund.unwrap().1;
        assert_eq!(total_awarded, 900);
    }

    #[test]
    fn folded_contribution_stays_in_pot_but_not_eligible() {
        let mut ledger = PotLedger::new();
        ledger.record_contribution(pid(0), 50);
        ledger.record_contribution(pid(1), 50);
        ledger.record_contribution(pid(2), 50);
        ledger.mark_folded(pid(0));

        let order = vec![pid(0), pid(1), pid(2)];
        let pots = ledger.reconcile(&order);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible_players, vec![pid(1), pid(2)]);
    }

    #[test]
    fn no_refund_when_top_two_are_tied() {
        let mut ledger = PotLedger::new();
        ledger.record_contribution(pid(0), 200);
        ledger.record_contribution(pid(1), 200);
        assert_eq!(ledger.take_uncalled_bet_refund(), None);
    }
}
