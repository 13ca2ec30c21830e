//! Restricted-mode `BotHarness`: one bot per OS subprocess, communicating
//! over stdin/stdout, with a wall-clock deadline and a polled memory
//! ceiling (spec §4.5, §5).

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use holdem_shared::{Card, PublicGameState};

use super::protocol::{BotRequest, BotResponse};
use crate::bot::BotAction;

/// Why a restricted bot's decision fell back to the default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Timeout,
    MemoryLimitExceeded { rss_bytes: u64 },
    ProcessCrashed,
    MalformedResponse(String),
    SpawnFailed(String),
}

/// Outcome of one restricted-mode decision.
pub enum RestrictedOutcome {
    Decided(BotAction),
    Fallback(FallbackReason),
}

struct RunningChild {
    child: Child,
    stdin: ChildStdin,
    stdout: Arc<Mutex<BufReader<std::process::ChildStdout>>>,
}

/// Owns one external bot subprocess for the lifetime of the tournament,
/// restarting it whenever it times out, crashes, or breaches its memory
/// ceiling.
pub struct RestrictedBot {
    path: String,
    time_limit: Duration,
    memory_limit_bytes: u64,
    running: Option<RunningChild>,
}

impl RestrictedBot {
    pub fn new(path: String, time_limit_ms: u64, memory_limit_mb: u64) -> Self {
        Self {
            path,
            time_limit: Duration::from_millis(time_limit_ms),
            memory_limit_bytes: memory_limit_mb * 1024 * 1024,
            running: None,
        }
    }

    fn ensure_started(&mut self) -> Result<(), FallbackReason> {
        if self.running.is_some() {
            return Ok(());
        }
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FallbackReason::SpawnFailed(e.to_string()))?;
        let stdin = child.stdin.take().expect("piped stdin");
        let stdout = child.stdout.take().expect("piped stdout");
        self.running = Some(RunningChild {
            child,
            stdin,
            stdout: Arc::new(Mutex::new(BufReader::new(stdout))),
        });
        Ok(())
    }

    fn kill_current(&mut self) {
        if let Some(mut running) = self.running.take() {
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }

    #[cfg(target_os = "linux")]
    fn resident_set_size(pid: u32) -> Option<u64> {
        let status = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                let kb: u64 = rest.trim().trim_end_matches(" kB").trim().parse().ok()?;
                return Some(kb * 1024);
            }
        }
        None
    }

    #[cfg(not(target_os = "linux"))]
    fn resident_set_size(_pid: u32) -> Option<u64> {
        None
    }

    /// Run one decision. On any limit violation, crash, or malformed
    /// reply the subprocess is killed (restarted on the next call) and
    /// the caller is told why, so it can log the fallback.
    pub fn decide(&mut self, state: &PublicGameState, hole_cards: [Card; 2]) -> RestrictedOutcome {
        if let Err(reason) = self.ensure_started() {
            return RestrictedOutcome::Fallback(reason);
        }
        let running = self.running.as_mut().expect("just ensured started");
        let pid = running.child.id();

        let request = BotRequest {
            public_state: state.clone(),
            hole_cards,
        };
        let line = match serde_json::to_string(&request) {
            Ok(s) => s,
            Err(e) => return RestrictedOutcome::Fallback(FallbackReason::MalformedResponse(e.to_string())),
        };
        if writeln!(running.stdin, "{line}").is_err() || running.stdin.flush().is_err() {
            self.kill_current();
            return RestrictedOutcome::Fallback(FallbackReason::ProcessCrashed);
        }

        let stdout = running.stdout.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut buf = String::new();
            let result = stdout.lock().unwrap().read_line(&mut buf);
            let _ = tx.send(result.map(|n| (n, buf)));
        });

        let deadline = Instant::now() + self.time_limit;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.kill_current();
                return RestrictedOutcome::Fallback(FallbackReason::Timeout);
            }
            if let Some(rss) = Self::resident_set_size(pid) {
                if rss > self.memory_limit_bytes {
                    self.kill_current();
                    return RestrictedOutcome::Fallback(FallbackReason::MemoryLimitExceeded {
                        rss_bytes: rss,
                    });
                }
            }
            let poll = Duration::from_millis(20).min(remaining);
            match rx.recv_timeout(poll) {
                Ok(Ok((0, _))) | Ok(Err(_)) => {
                    self.kill_current();
                    return RestrictedOutcome::Fallback(FallbackReason::ProcessCrashed);
                }
                Ok(Ok((_, line))) => {
                    return match serde_json::from_str::<BotResponse>(line.trim()) {
                        Ok(resp) => RestrictedOutcome::Decided(BotAction {
                            action_type: resp.action_type,
                            amount: resp.amount,
                        }),
                        Err(e) => {
                            self.kill_current();
                            RestrictedOutcome::Fallback(FallbackReason::MalformedResponse(
                                e.to_string(),
                            ))
                        }
                    };
                }
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.kill_current();
                    return RestrictedOutcome::Fallback(FallbackReason::ProcessCrashed);
                }
            }
        }
    }
}

impl Drop for RestrictedBot {
    fn drop(&mut self) {
        self.kill_current();
    }
}
