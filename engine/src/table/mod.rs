//! `Table`/`HandDriver`: the per-hand state machine
//! (spec §4.6: SETUP → PREFLOP → FLOP → TURN → RIVER → SHOWDOWN → FINALIZE).

mod betting;
mod showdown;

use std::collections::BTreeMap;

use holdem_shared::{
    Action, ActionType, Blinds, Card, HandRecord, PlayerId, PlayerPublicInfo, PublicGameState,
    Street, StreetHistory,
};

use crate::config::{BlindLevel, TournamentConfig};
use crate::deck::Deck;
use crate::error::InvariantError;
use crate::harness::BotHarness;
use crate::ledger::PotLedger;
use crate::logging::EngineLogger;

/// Private, table-owned per-player state (spec §3 "Table (private) state").
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub hole_cards: [Card; 2],
    pub folded: bool,
    pub all_in: bool,
    pub busted: bool,
}

/// The result of playing exactly one hand to completion (spec §6
/// "Hand-result record").
#[derive(Debug, Clone)]
pub struct HandOutcome {
    pub record: HandRecord,
    pub winners: BTreeMap<PlayerId, (String, u32)>,
    pub eligible_for_showdown: Vec<PlayerId>,
    pub showdown: bool,
    pub eliminated: Vec<PlayerId>,
}

/// Owns everything private to a single table across a hand: the deck,
/// hole cards, the pot ledger, and history. `PublicGameState` handed to
/// bots is always a deep copy (spec §4.1 "Ownership").
pub struct Table {
    pub players: Vec<Player>,
    pub deck: Deck,
    pub community: Vec<Card>,
    pub street: Street,
    pub button: usize,
    pub round_bets: Vec<u32>,
    pub minimum_raise_amount: u32,
    pub ledger: PotLedger,
    pub blinds: Blinds,
    pub blinds_schedule: BTreeMap<u32, BlindLevel>,
    pub round_number: u32,
    pub previous_hand_histories: Vec<HandRecord>,
}

impl Table {
    pub fn new(players: Vec<Player>, config: &TournamentConfig) -> Self {
        let blinds_level = config.blinds_for_round(1);
        let n = players.len();
        Table {
            players,
            deck: Deck::new_shuffled(0),
            community: Vec::new(),
            street: Street::Preflop,
            button: 0,
            round_bets: vec![0; n],
            minimum_raise_amount: blinds_level.bb,
            ledger: PotLedger::new(),
            blinds: Blinds {
                small_blind: blinds_level.sb,
                big_blind: blinds_level.bb,
            },
            blinds_schedule: config.blinds_schedule.clone(),
            round_number: 1,
            previous_hand_histories: Vec::new(),
        }
    }

    fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }

    fn seating_order_from(&self, start: usize) -> Vec<usize> {
        let n = self.players.len();
        (0..n).map(|i| (start + i) % n).collect()
    }

    fn next_non_busted(&self, from: usize) -> usize {
        let n = self.players.len();
        let mut idx = (from + 1) % n;
        for _ in 0..n {
            if !self.players[idx].busted {
                return idx;
            }
            idx = (idx + 1) % n;
        }
        from
    }

    fn player_state_of(&self, idx: usize) -> crate::validator::PlayerState {
        crate::validator::PlayerState {
            stack: self.players[idx].stack,
            current_bet: self.round_bets[idx],
        }
    }

    fn context(&self) -> crate::validator::ValidationContext {
        crate::validator::ValidationContext {
            current_bet: self.round_bets.iter().copied().max().unwrap_or(0),
            minimum_raise_amount: self.minimum_raise_amount,
        }
    }

    /// SETUP (spec §4.6): shuffle, deal hole cards, post blinds.
    fn setup_hand(&mut self, hand_seed: u64, record: &mut HandRecord) -> Result<(), InvariantError> {
        self.deck = Deck::new_shuffled(hand_seed);
        self.community.clear();
        self.street = Street::Preflop;
        self.round_bets = vec![0; self.players.len()];
        self.minimum_raise_amount = self.blinds.big_blind;
        self.ledger = PotLedger::new();

        for p in &mut self.players {
            p.folded = p.busted;
            p.all_in = false;
        }

        let n = self.players.len();
        let deal_order = self.seating_order_from(self.button);
        for &idx in &deal_order {
            if self.players[idx].busted {
                continue;
            }
            let c1 = self.deck.deal_one()?;
            let c2 = self.deck.deal_one()?;
            self.players[idx].hole_cards = [c1, c2];
        }

        let (sb_idx, bb_idx) = if n == 2 {
            (self.button, self.next_non_busted(self.button))
        } else {
            let sb = self.next_non_busted(self.button);
            let bb = self.next_non_busted(sb);
            (sb, bb)
        };

        let mut street_history = StreetHistory::default();
        self.post_blind(sb_idx, ActionType::SmallBlind, self.blinds.small_blind, &mut street_history);
        self.post_blind(bb_idx, ActionType::BigBlind, self.blinds.big_blind, &mut street_history);
        record.per_street.insert(Street::Preflop, street_history);

        Ok(())
    }

    fn post_blind(
        &mut self,
        idx: usize,
        kind: ActionType,
        amount: u32,
        street_history: &mut StreetHistory,
    ) {
        let paid = amount.min(self.players[idx].stack);
        self.players[idx].stack -= paid;
        self.round_bets[idx] += paid;
        self.ledger.record_contribution(self.players[idx].id, paid);
        if self.players[idx].stack == 0 {
            self.players[idx].all_in = true;
        }
        street_history
            .actions
            .push(Action::new(self.players[idx].id, kind, paid));
    }

    /// Deep-copyable snapshot handed to bots and recorded for observers
    /// (spec §3 `PublicGameState`).
    pub fn public_state(&self, current_hand_history: &HandRecord) -> PublicGameState {
        let player_public_infos = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| PlayerPublicInfo {
                id: p.id,
                name: p.name.clone(),
                stack: p.stack,
                current_bet: self.round_bets[idx],
                active: !p.folded,
                busted: p.busted,
                is_all_in: p.all_in,
            })
            .collect();

        let seating_order: Vec<PlayerId> = self
            .seating_order_from(self.next_non_busted(self.button) % self.players.len().max(1))
            .into_iter()
            .map(|i| self.players[i].id)
            .collect();
        let pots = self.ledger.reconcile(&seating_order);
        let total_pot: u32 = pots.iter().map(|p| p.amount).sum();

        let blinds_schedule = self
            .blinds_schedule
            .iter()
            .map(|(&k, &v)| {
                (
                    k,
                    Blinds {
                        small_blind: v.sb,
                        big_blind: v.bb,
                    },
                )
            })
            .collect();

        PublicGameState {
            round_number: self.round_number,
            player_public_infos,
            button_position: self.players[self.button].id,
            community_cards: self.community.clone(),
            total_pot,
            pots,
            blinds: self.blinds,
            blinds_schedule,
            minimum_raise_amount: self.minimum_raise_amount,
            current_hand_history: current_hand_history.clone(),
            previous_hand_histories: self.previous_hand_histories.clone(),
        }
    }

    /// Play exactly one hand end to end: SETUP through FINALIZE.
    pub fn play_hand(
        &mut self,
        harnesses: &mut [BotHarness],
        hand_seed: u64,
        logger: &mut EngineLogger,
    ) -> Result<HandOutcome, InvariantError> {
        let chips_before: u64 = self.players.iter().map(|p| p.stack as u64).sum();

        let mut record = HandRecord::default();
        self.setup_hand(hand_seed, &mut record)?;

        let mut street = Street::Preflop;
        loop {
            if self.active_player_count() > 1 {
                self.run_betting_round(street, harnesses, &mut record, logger)?;
            }
            if self.active_player_count() <= 1 {
                break;
            }
            match street.next() {
                Some(next) => {
                    self.advance_street(next, &mut record)?;
                    street = next;
                }
                None => break,
            }
        }

        let eligible_for_showdown: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .map(|p| p.id)
            .collect();
        let showdown_outcome = self.run_showdown(&mut record, logger)?;
        let showdown = record.showdown_details.is_some();

        let chips_after: u64 = self.players.iter().map(|p| p.stack as u64).sum();
        if chips_after != chips_before {
            return Err(InvariantError::ChipConservation {
                expected: chips_before,
                observed: chips_after,
            });
        }

        let eliminated = self.finalize();
        self.previous_hand_histories.push(record.clone());

        Ok(HandOutcome {
            record,
            winners: showdown_outcome,
            eligible_for_showdown,
            showdown,
            eliminated,
        })
    }

    /// Street transition (spec §4.6): reconcile is implicit (the ledger
    /// already holds every contribution), deal burn + community cards,
    /// reset `current_bet`/`minimum_raise_amount` for the new street.
    fn advance_street(&mut self, next: Street, record: &mut HandRecord) -> Result<(), InvariantError> {
        self.deck.burn()?;
        let to_deal = next.community_card_count() - self.community.len();
        let dealt = self.deck.deal_n(to_deal)?;
        self.community.extend(dealt);

        self.round_bets = vec![0; self.players.len()];
        self.minimum_raise_amount = self.blinds.big_blind;
        self.street = next;

        record.per_street.insert(
            next,
            StreetHistory {
                community_cards: self.community.clone(),
                actions: Vec::new(),
            },
        );
        Ok(())
    }

    /// FINALIZE (spec §4.6): bust zero-stack players, roll history,
    /// advance the button, and step the blinds schedule.
    fn finalize(&mut self) -> Vec<PlayerId> {
        let mut eliminated = Vec::new();
        for p in &mut self.players {
            if p.stack == 0 && !p.busted {
                p.busted = true;
                eliminated.push(p.id);
            }
        }
        self.button = self.next_non_busted(self.button);
        self.round_number += 1;
        let level = self
            .blinds_schedule
            .range(..=self.round_number)
            .next_back()
            .map(|(_, v)| *v)
            .unwrap_or(BlindLevel {
                sb: self.blinds.small_blind,
                bb: self.blinds.big_blind,
            });
        self.blinds = Blinds {
            small_blind: level.sb,
            big_blind: level.bb,
        };
        eliminated
    }

    pub fn remaining_players(&self) -> usize {
        self.players.iter().filter(|p| !p.busted).count()
    }
}
