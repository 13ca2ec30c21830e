//! Bot-harness scenarios: timeout/spawn-failure fallback behavior for
//! restricted-mode (subprocess-sandboxed) bots (spec §4.5/§5).

use std::collections::BTreeMap;

use holdem_engine::bot::AlwaysFoldBot;
use holdem_engine::config::{BlindLevel, BotKind, PlayerConfig, TournamentConfig};
use holdem_engine::harness::BotHarness;
use holdem_engine::logging::EngineLogger;
use holdem_engine::table::{Player, Table};
use holdem_shared::{Card, CardRank, CardSuit, PlayerId};

fn blank_card() -> Card {
    Card::new(CardRank::Two, CardSuit::Clubs)
}

fn config_with(players: Vec<PlayerConfig>, starting_stack: u32, max_rounds: Option<u32>, seed: u64) -> TournamentConfig {
    let mut blinds_schedule = BTreeMap::new();
    blinds_schedule.insert(1, BlindLevel { sb: 10, bb: 20 });
    TournamentConfig {
        players,
        starting_stack,
        blinds_schedule,
        max_rounds,
        seed: Some(seed),
        restricted: false,
        time_limit_ms: 1000,
        memory_limit_mb: 100,
    }
}

fn make_player(id: usize, stack: u32) -> Player {
    Player {
        id: PlayerId(id),
        name: format!("p{id}"),
        stack,
        hole_cards: [blank_card(); 2],
        folded: false,
        all_in: false,
        busted: false,
    }
}

/// Scenario 5: bot timeout. A restricted-mode bot pointed at a
/// nonexistent executable can never respond, so every decision falls
/// back to check-if-legal-else-fold, and the fallback is logged.
#[test]
fn restricted_bot_spawn_failure_falls_back_to_fold_or_check() {
    let players = vec![make_player(0, 1000), make_player(1, 1000)];
    let config = config_with(
        vec![
            PlayerConfig { name: "A".into(), bot: BotKind::AlwaysCheck },
            PlayerConfig { name: "B".into(), bot: BotKind::AlwaysCheck },
        ],
        1000,
        None,
        1,
    );
    let mut table = Table::new(players, &config);
    let mut harnesses = vec![
        BotHarness::restricted("/nonexistent/path/to/bot".to_string(), 100, 100),
        BotHarness::unrestricted(Box::new(AlwaysFoldBot)),
    ];
    let mut logger = EngineLogger::discard();

    table.play_hand(&mut harnesses, 5, &mut logger).unwrap();
    let total: u32 = table.players.iter().map(|p| p.stack).sum();
    assert_eq!(total, 2000);
}

/// A spawn failure that persists across many decisions in the same hand
/// must keep falling back rather than panicking or hanging (spec §5's
/// kill+restart-on-violation requirement extended to "never respawns
/// successfully").
#[test]
fn repeated_spawn_failures_keep_falling_back_without_panicking() {
    let players = vec![make_player(0, 1000), make_player(1, 1000), make_player(2, 1000)];
    let config = config_with(
        vec![
            PlayerConfig { name: "A".into(), bot: BotKind::AlwaysCheck },
            PlayerConfig { name: "B".into(), bot: BotKind::AlwaysCheck },
            PlayerConfig { name: "C".into(), bot: BotKind::AlwaysCheck },
        ],
        1000,
        None,
        2,
    );
    let mut table = Table::new(players, &config);
    let mut harnesses = vec![
        BotHarness::restricted("/nonexistent/path/to/bot".to_string(), 50, 50),
        BotHarness::restricted("/also/nonexistent".to_string(), 50, 50),
        BotHarness::unrestricted(Box::new(AlwaysFoldBot)),
    ];
    let mut logger = EngineLogger::discard();

    let outcome = table.play_hand(&mut harnesses, 9, &mut logger).unwrap();
    let total: u32 = table.players.iter().map(|p| p.stack).sum();
    assert_eq!(total, 3000);
    assert!(!outcome.winners.is_empty());
}
