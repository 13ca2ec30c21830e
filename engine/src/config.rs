//! Tournament configuration, loaded from TOML (spec §6).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// One entry of a blinds schedule: small/big blind amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    pub sb: u32,
    pub bb: u32,
}

/// What kind of bot occupies a seat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BotKind {
    AlwaysCheck,
    AlwaysFold,
    LooseAggressive,
    /// An external subprocess bot; `path` is the executable invoked under
    /// restricted mode.
    External { path: String },
}

/// One seat's static configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name: String,
    pub bot: BotKind,
}

/// Full tournament configuration persisted as TOML (spec §6). Field
/// names are `camelCase` on the wire to match the casing convention used
/// throughout spec §6 (`startingStack`, `blindsSchedule`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentConfig {
    pub players: Vec<PlayerConfig>,
    pub starting_stack: u32,
    pub blinds_schedule: BTreeMap<u32, BlindLevel>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_restricted")]
    pub restricted: bool,
    #[serde(default = "default_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "default_memory_limit_mb")]
    pub memory_limit_mb: u64,
}

fn default_restricted() -> bool {
    true
}

fn default_time_limit_ms() -> u64 {
    1000
}

fn default_memory_limit_mb() -> u64 {
    500
}

impl Default for TournamentConfig {
    fn default() -> Self {
        let mut blinds_schedule = BTreeMap::new();
        blinds_schedule.insert(1, BlindLevel { sb: 10, bb: 20 });
        TournamentConfig {
            players: vec![
                PlayerConfig {
                    name: "Alice".into(),
                    bot: BotKind::AlwaysCheck,
                },
                PlayerConfig {
                    name: "Bob".into(),
                    bot: BotKind::LooseAggressive,
                },
            ],
            starting_stack: 1000,
            blinds_schedule,
            max_rounds: None,
            seed: None,
            restricted: default_restricted(),
            time_limit_ms: default_time_limit_ms(),
            memory_limit_mb: default_memory_limit_mb(),
        }
    }
}

impl TournamentConfig {
    /// Load configuration from `path`. If the file does not exist, create
    /// it with reasonable defaults and return the default config.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigurationError> {
        let cfg = if path.exists() {
            let s = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str(&s).map_err(|source| ConfigurationError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    let _ = fs::create_dir_all(parent);
                }
            }
            let cfg = TournamentConfig::default();
            if let Ok(toml_text) = toml::to_string_pretty(&cfg) {
                let _ = fs::write(path, toml_text);
            }
            cfg
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the constraints spec §6 places on a tournament config.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.players.len() < 2 {
            return Err(ConfigurationError::TooFewPlayers(self.players.len()));
        }
        if self.starting_stack == 0 {
            return Err(ConfigurationError::NonPositiveStartingStack(
                self.starting_stack,
            ));
        }
        if !self.blinds_schedule.contains_key(&0) && !self.blinds_schedule.contains_key(&1) {
            return Err(ConfigurationError::MissingInitialBlindLevel(
                self.blinds_schedule.keys().copied().collect(),
            ));
        }
        for (round, level) in &self.blinds_schedule {
            if level.sb >= level.bb {
                return Err(ConfigurationError::InvalidBlindLevel {
                    round: *round,
                    sb: level.sb,
                    bb: level.bb,
                });
            }
        }
        Ok(())
    }

    /// The blind level in effect for `round_number`: the entry at the
    /// greatest schedule key `<= round_number` (spec §5 FINALIZE step).
    pub fn blinds_for_round(&self, round_number: u32) -> BlindLevel {
        self.blinds_schedule
            .range(..=round_number)
            .next_back()
            .map(|(_, level)| *level)
            .unwrap_or_else(|| {
                self.blinds_schedule
                    .values()
                    .next()
                    .copied()
                    .unwrap_or(BlindLevel { sb: 10, bb: 20 })
            })
    }
}
