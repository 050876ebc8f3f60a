use game_core::TICK_MS;
use game_types::GamePhase;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::Command;

/// Drives the per-phase countdown. Exactly one interval task is alive at
/// a time: arming a phase always cancels the previous task first, so a
/// dead phase can never keep ticking. The task only emits
/// `Command::Tick` values tagged with its phase; the remaining-time
/// bookkeeping lives in the session.
pub struct PhaseTimer {
    handle: Option<JoinHandle<()>>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn arm(&mut self, phase: GamePhase, tx: UnboundedSender<Command>) {
        self.cancel();
        debug!(?phase, "arming phase timer");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
            // The first interval tick resolves immediately; skip it so the
            // phase gets its full duration.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Command::Tick { phase }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
