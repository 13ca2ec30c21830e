//! Tournament orchestration: build the table and bot harnesses from a
//! `TournamentConfig`, then drive hands until a stopping condition is
//! reached (spec §4.6 "Tournament loop", §6).

use holdem_shared::{Blinds, PlayerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bot::{AlwaysCheckBot, AlwaysFoldBot, Bot, LooseAggressiveBot};
use crate::config::{BotKind, TournamentConfig};
use crate::error::{ConfigurationError, InvariantError};
use crate::harness::BotHarness;
use crate::logging::EngineLogger;
use crate::table::{HandOutcome, Player, Table};

/// Summary returned once the tournament loop stops.
#[derive(Debug, Clone)]
pub struct TournamentResult {
    pub hands_played: u32,
    pub standings: Vec<(PlayerId, String, u32)>,
    pub champion: Option<PlayerId>,
}

pub struct Tournament {
    table: Table,
    harnesses: Vec<BotHarness>,
    max_rounds: Option<u32>,
    hand_rng: StdRng,
}

impl Tournament {
    pub fn new(config: &TournamentConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let players: Vec<Player> = config
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| Player {
                id: PlayerId(i),
                name: p.name.clone(),
                stack: config.starting_stack,
                hole_cards: [holdem_shared::Card::new(
                    holdem_shared::CardRank::Two,
                    holdem_shared::CardSuit::Clubs,
                ); 2],
                folded: false,
                all_in: false,
                busted: false,
            })
            .collect();

        let mut harnesses = Vec::with_capacity(config.players.len());
        for (i, p) in config.players.iter().enumerate() {
            harnesses.push(build_harness(PlayerId(i), &p.bot, config)?);
        }

        let table = Table::new(players, config);
        let seed = config.seed.unwrap_or(0);

        Ok(Self {
            table,
            harnesses,
            max_rounds: config.max_rounds,
            hand_rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Run hands until either `max_rounds` is reached or at most one
    /// player has chips left (spec §4.6 "Tournament loop" stopping rule).
    pub fn run(&mut self, logger: &mut EngineLogger) -> Result<TournamentResult, InvariantError> {
        let mut hands_played = 0u32;

        loop {
            if self.table.remaining_players() <= 1 {
                break;
            }
            if let Some(max) = self.max_rounds {
                if hands_played >= max {
                    break;
                }
            }

            let hand_seed = self.hand_rng.random::<u64>();
            let outcome: HandOutcome =
                self.table.play_hand(&mut self.harnesses, hand_seed, logger)?;
            hands_played += 1;
            tracing::debug!(hand = hands_played, winners = ?outcome.winners, "hand complete");
        }

        let standings: Vec<(PlayerId, String, u32)> = self
            .table
            .players
            .iter()
            .map(|p| (p.id, p.name.clone(), p.stack))
            .collect();
        let champion = standings
            .iter()
            .filter(|(_, _, stack)| *stack > 0)
            .max_by_key(|(_, _, stack)| *stack)
            .map(|(id, _, _)| *id)
            .filter(|_| self.table.remaining_players() == 1);

        Ok(TournamentResult {
            hands_played,
            standings,
            champion,
        })
    }

    pub fn current_blinds(&self) -> Blinds {
        self.table.blinds
    }
}

fn build_harness(
    seat: PlayerId,
    kind: &BotKind,
    config: &TournamentConfig,
) -> Result<BotHarness, ConfigurationError> {
    Ok(match kind {
        BotKind::AlwaysCheck => BotHarness::unrestricted(Box::new(AlwaysCheckBot)),
        BotKind::AlwaysFold => BotHarness::unrestricted(Box::new(AlwaysFoldBot)),
        BotKind::LooseAggressive => {
            BotHarness::unrestricted(Box::new(LooseAggressiveBot::new(seat)))
        }
        BotKind::External { path } => {
            if config.restricted {
                BotHarness::restricted(path.clone(), config.time_limit_ms, config.memory_limit_mb)
            } else {
                return Err(ConfigurationError::ExternalBotRequiresRestrictedMode {
                    path: path.clone(),
                });
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlindLevel, PlayerConfig};
    use std::collections::BTreeMap;

    fn two_player_config() -> TournamentConfig {
        let mut blinds_schedule = BTreeMap::new();
        blinds_schedule.insert(1, BlindLevel { sb: 10, bb: 20 });
        TournamentConfig {
            players: vec![
                PlayerConfig {
                    name: "A".into(),
                    bot: BotKind::AlwaysCheck,
                },
                PlayerConfig {
                    name: "B".into(),
                    bot: BotKind::AlwaysFold,
                },
            ],
            starting_stack: 200,
            blinds_schedule,
            max_rounds: Some(5),
            seed: Some(1),
            restricted: false,
            time_limit_ms: 1000,
            memory_limit_mb: 100,
        }
    }

    #[test]
    fn runs_until_max_rounds_or_one_player_left() {
        let config = two_player_config();
        let mut tournament = Tournament::new(&config).unwrap();
        let mut logger = EngineLogger::discard();
        let result = tournament.run(&mut logger).unwrap();
        assert!(result.hands_played <= 5);
        assert!(result.hands_played > 0);
    }

    #[test]
    fn identical_seed_and_bots_reproduce_identical_standings() {
        let config = two_player_config();
        let mut first = Tournament::new(&config).unwrap();
        let mut second = Tournament::new(&config).unwrap();
        let mut logger = EngineLogger::discard();

        let result_a = first.run(&mut logger).unwrap();
        let result_b = second.run(&mut logger).unwrap();

        assert_eq!(result_a.hands_played, result_b.hands_played);
        assert_eq!(result_a.standings, result_b.standings);
        assert_eq!(result_a.champion, result_b.champion);
    }
}
