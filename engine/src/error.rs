//! Error taxonomy (spec §7).
//!
//! Three classes: configuration errors (construction time, fatal before
//! any hand is played), invariant violations (a hand was in progress and
//! something the engine guarantees broke — these halt the tournament),
//! and everything else, which is propagated as `anyhow::Error` at the
//! call sites that don't need a typed variant (IO, bot subprocess
//! failures that are already handled by the harness's fallback path).

use thiserror::Error;

/// Errors raised while loading or validating a `TournamentConfig`.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("tournament needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("startingStack must be positive, got {0}")]
    NonPositiveStartingStack(u32),

    #[error("blindsSchedule must have an entry for round 1 (or a key of 0), got keys {0:?}")]
    MissingInitialBlindLevel(Vec<u32>),

    #[error("blindsSchedule entry for round {round} has SB {sb} >= BB {bb}")]
    InvalidBlindLevel { round: u32, sb: u32, bb: u32 },

    #[error("unknown bot kind {0:?}")]
    UnknownBotKind(String),

    #[error("external bot at {path:?} configured but restricted mode is disabled")]
    ExternalBotRequiresRestrictedMode { path: String },
}

/// An engine invariant was violated mid-hand. These are bugs, not
/// recoverable conditions — the tournament halts and the condition is
/// logged verbatim.
#[derive(Debug, Error)]
pub enum InvariantError {
    #[error("chip conservation violated: expected total {expected}, observed {observed}")]
    ChipConservation { expected: u64, observed: u64 },

    #[error("deck exhausted: requested {requested} cards with {remaining} left")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("action validator returned an action outside the legal set: {0:?}")]
    IllegalActionEscaped(crate::validator::LegalActions),

    #[error("betting round failed to terminate after {0} actions")]
    BettingRoundDidNotTerminate(usize),

    #[error("showdown was reached with no eligible players for pot index {0}")]
    NoEligiblePlayersAtShowdown(usize),
}
