//! Engine plus tick task: the single owner of a running countdown.

use super::engine::{PomodoroEngine, PomodoroSnapshot, PomodoroState};
use super::mode::PomodoroMode;
use super::ticker::Ticker;
use crate::events::Event;

/// Result of one awaited tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Still counting down.
    Counting(PomodoroSnapshot),
    /// The session ran out; the engine already moved to the next mode.
    Completed(Event),
}

/// Drives a [`PomodoroEngine`] from a [`Ticker`].
///
/// Every command that stops the countdown also cancels the tick task,
/// so there is never more than one countdown in flight.
#[derive(Default)]
pub struct PomodoroTimer {
    engine: PomodoroEngine,
    ticker: Ticker,
}

impl PomodoroTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: PomodoroEngine, ticker: Ticker) -> Self {
        Self { engine, ticker }
    }

    pub fn state(&self) -> PomodoroState {
        self.engine.state()
    }

    pub fn snapshot(&self) -> PomodoroSnapshot {
        self.engine.snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Start the countdown. Needs a tokio runtime for the tick task.
    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start()?;
        self.ticker.start();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.ticker.cancel();
        self.engine.pause()
    }

    pub fn reset(&mut self) -> Event {
        self.ticker.cancel();
        self.engine.reset()
    }

    pub fn skip(&mut self) -> Event {
        self.ticker.cancel();
        self.engine.skip()
    }

    pub fn set_mode(&mut self, mode: PomodoroMode) -> Event {
        self.ticker.cancel();
        self.engine.set_mode(mode)
    }

    /// Wait for the next tick and apply it. `None` if no countdown is active.
    pub async fn tick(&mut self) -> Option<TickOutcome> {
        if !self.ticker.is_active() {
            return None;
        }
        self.ticker.next().await?;
        match self.engine.tick() {
            Some(event) => {
                self.ticker.cancel();
                Some(TickOutcome::Completed(event))
            }
            None if self.engine.is_running() => Some(TickOutcome::Counting(self.engine.snapshot())),
            None => {
                self.ticker.cancel();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn runs_study_session_to_completion() {
        let mut timer = PomodoroTimer::new();
        assert!(timer.start().is_some());

        let mut counting = 0;
        let mut completions = Vec::new();
        while let Some(outcome) = timer.tick().await {
            match outcome {
                TickOutcome::Counting(_) => counting += 1,
                TickOutcome::Completed(event) => completions.push(event),
            }
        }

        assert_eq!(counting, 1499);
        assert_eq!(completions.len(), 1);
        assert!(!timer.is_ticking());
        let state = timer.state();
        assert_eq!(state.mode, PomodoroMode::ShortBreak);
        assert_eq!(state.remaining_secs, 300);
        assert!(!state.running);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_tick_task() {
        let mut timer = PomodoroTimer::new();
        timer.start();
        timer.tick().await;
        timer.tick().await;
        assert!(timer.pause().is_some());
        assert!(!timer.is_ticking());
        assert!(timer.tick().await.is_none());
        assert_eq!(timer.state().remaining_secs, 1498);

        timer.start();
        assert!(matches!(timer.tick().await, Some(TickOutcome::Counting(_))));
        assert_eq!(timer.state().remaining_secs, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn set_mode_cancels_tick_task() {
        let mut timer = PomodoroTimer::new();
        timer.start();
        timer.tick().await;
        timer.set_mode(PomodoroMode::LongBreak);
        assert!(!timer.is_ticking());
        assert!(timer.tick().await.is_none());
        assert_eq!(timer.state().remaining_secs, 900);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_one_countdown() {
        let mut timer = PomodoroTimer::new();
        assert!(timer.start().is_some());
        assert!(timer.start().is_none());
        timer.tick().await;
        assert_eq!(timer.state().remaining_secs, 1499);
    }
}
