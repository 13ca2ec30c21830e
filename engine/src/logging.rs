//! Tracing setup plus the two append-only JSON-lines audit logs spec §6
//! requires: `illegal_moves.log` and `showdown.log`.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use holdem_shared::{ActionType, PlayerId, ShowdownPlayerDetail, Street};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber that writes structured log lines to
/// stderr, honoring `RUST_LOG` the way the rest of the ecosystem does.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone, Serialize)]
pub struct IllegalMoveLogEntry {
    /// Tournament round number, which doubles as the sequential hand
    /// count (this engine plays exactly one hand per round).
    pub round: u32,
    pub hand: u32,
    pub street: Street,
    pub player: PlayerId,
    pub declared_type: ActionType,
    pub declared_amount: u32,
    pub corrected_type: ActionType,
    pub corrected_amount: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
struct ShowdownLogEntry<'a> {
    round: u32,
    winners: &'a BTreeMap<PlayerId, (String, u32)>,
    details: Option<&'a [ShowdownPlayerDetail]>,
}

/// Append-only writer for the two audit logs (spec §6). Every correction
/// a bot's declared action receives, and every showdown's result, is
/// recorded as one JSON object per line.
pub struct EngineLogger {
    illegal_moves: Option<File>,
    showdowns: Option<File>,
}

impl EngineLogger {
    pub fn open(illegal_moves_path: &Path, showdown_path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            illegal_moves: Some(open_append(illegal_moves_path)?),
            showdowns: Some(open_append(showdown_path)?),
        })
    }

    /// A logger that discards everything, for tests and tools that don't
    /// care about the audit trail.
    pub fn discard() -> Self {
        Self {
            illegal_moves: None,
            showdowns: None,
        }
    }

    pub fn log_illegal_move(&mut self, entry: IllegalMoveLogEntry) {
        tracing::warn!(
            player = ?entry.player,
            declared = ?entry.declared_type,
            corrected = ?entry.corrected_type,
            reason = %entry.reason,
            "bot action corrected"
        );
        if let Some(f) = self.illegal_moves.as_mut() {
            write_json_line(f, &entry);
        }
    }

    pub fn log_showdown(
        &mut self,
        round: u32,
        winners: &BTreeMap<PlayerId, (String, u32)>,
        details: Option<&[ShowdownPlayerDetail]>,
    ) {
        tracing::info!(round, ?winners, "hand resolved");
        if let Some(f) = self.showdowns.as_mut() {
            write_json_line(
                f,
                &ShowdownLogEntry {
                    round,
                    winners,
                    details,
                },
            );
        }
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn write_json_line<T: Serialize>(f: &mut File, value: &T) {
    if let Ok(line) = serde_json::to_string(value) {
        let _ = writeln!(f, "{line}");
    }
}
