//! Headless CLI entry point: load a tournament config, run it to
//! completion, and print the final standings.
//!
//! Usage:
//!   holdem-engine [--config PATH] [--illegal-moves-log PATH] [--showdown-log PATH]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use holdem_engine::config::TournamentConfig;
use holdem_engine::logging::{init_tracing, EngineLogger};
use holdem_engine::tournament::Tournament;

#[derive(Parser, Debug, Clone)]
#[command(name = "holdem-engine", version, about = "No-Limit Hold'em tournament engine", long_about = None)]
struct Cli {
    /// Path to the tournament config TOML. Created with defaults if missing.
    #[arg(long, default_value = "tournament.toml")]
    config: PathBuf,

    /// Path to the illegal-moves audit log.
    #[arg(long, default_value = "illegal_moves.log")]
    illegal_moves_log: PathBuf,

    /// Path to the showdown audit log.
    #[arg(long, default_value = "showdown.log")]
    showdown_log: PathBuf,

    /// Output JSON instead of human-readable standings.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Override the config's seed for this run (not persisted).
    #[arg(long)]
    seed: Option<u64>,

    /// Override the config's maxRounds for this run (not persisted).
    #[arg(long)]
    max_rounds: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = TournamentConfig::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.max_rounds = Some(max_rounds);
    }

    tracing::info!(config = %cli.config.display(), players = config.players.len(), "starting tournament");

    let mut tournament = Tournament::new(&config).context("building tournament from config")?;
    let mut logger = EngineLogger::open(&cli.illegal_moves_log, &cli.showdown_log)
        .context("opening audit logs")?;

    let result = tournament.run(&mut logger).context("running tournament")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_standings(&result))?);
    } else {
        println!("hands played: {}", result.hands_played);
        for (id, name, stack) in &result.standings {
            println!("  seat {id}: {name} — {stack} chips");
        }
        if let Some(champion) = result.champion {
            println!("champion: seat {champion}");
        }
    }

    Ok(())
}

fn json_standings(result: &holdem_engine::tournament::TournamentResult) -> serde_json::Value {
    serde_json::json!({
        "hands_played": result.hands_played,
        "standings": result.standings.iter().map(|(id, name, stack)| {
            serde_json::json!({ "seat": id.0, "name": name, "stack": stack })
        }).collect::<Vec<_>>(),
        "champion": result.champion.map(|c| c.0),
    })
}
