//! Cancellable one-second repeating tick.
//!
//! At most one tick task exists per [`Ticker`]. Starting cancels the
//! previous task first, and each start gets its own channel, so a tick
//! produced by a cancelled task can never reach the engine.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

struct ActiveTick {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<()>,
}

pub struct Ticker {
    period: Duration,
    active: Option<ActiveTick>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Spawn the repeating task. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.cancel();
        let (tx, rx) = mpsc::channel(1);
        let period = self.period;
        let handle = tokio::spawn(async move {
            // First tick one full period from now, not immediately.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.active = Some(ActiveTick { handle, rx });
    }

    /// Abort the running task. Safe to call when nothing is running.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
            tracing::trace!("tick task cancelled");
        }
    }

    /// Wait for the next tick. `None` when no task is active.
    pub async fn next(&mut self) -> Option<()> {
        match self.active.as_mut() {
            Some(active) => active.rx.recv().await,
            None => None,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
