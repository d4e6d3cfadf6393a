//! Pomodoro engine.
//!
//! A pure state machine over [`PomodoroState`]. It does not own a timer;
//! whoever drives it calls `tick()` once per second while it is running
//! (see [`PomodoroTimer`](super::PomodoroTimer)).
//!
//! ## State Transitions
//!
//! ```text
//! study ──(0s)──> short-break ──(0s)──> study
//!                 long-break  ──(0s)──> study
//! ```
//!
//! `running` is layered on every mode. Reaching zero always clears it.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{format_clock, PomodoroMode};
use crate::events::Event;

/// Transient countdown state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub mode: PomodoroMode,
    pub remaining_secs: u32,
    pub running: bool,
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self {
            mode: PomodoroMode::Study,
            remaining_secs: PomodoroMode::Study.duration_secs(),
            running: false,
        }
    }
}

/// What the UI needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomodoroSnapshot {
    pub mode: PomodoroMode,
    pub label: String,
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub running: bool,
    /// `MM:SS`
    pub clock: String,
    /// 0.0 .. 1.0 through the current session.
    pub progress: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PomodoroEngine {
    state: PomodoroState,
}

impl PomodoroEngine {
    /// Fresh engine: study mode, full duration, stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a state. `remaining_secs` is clamped to the mode's duration.
    pub fn with_state(state: PomodoroState) -> Self {
        let remaining_secs = state.remaining_secs.min(state.mode.duration_secs());
        Self {
            state: PomodoroState {
                remaining_secs,
                running: state.running && remaining_secs > 0,
                ..state
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PomodoroState {
        self.state
    }

    pub fn mode(&self) -> PomodoroMode {
        self.state.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn snapshot(&self) -> PomodoroSnapshot {
        let total = self.state.mode.duration_secs();
        let progress = if total == 0 {
            0.0
        } else {
            1.0 - (self.state.remaining_secs as f64 / total as f64)
        };
        PomodoroSnapshot {
            mode: self.state.mode,
            label: self.state.mode.label().to_string(),
            remaining_secs: self.state.remaining_secs,
            total_secs: total,
            running: self.state.running,
            clock: format_clock(self.state.remaining_secs),
            progress,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        if self.state.remaining_secs == 0 {
            // A finished session must be advanced before it can run again.
            self.advance();
        }
        self.state.running = true;
        tracing::debug!(mode = %self.state.mode, remaining = self.state.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        tracing::debug!(remaining = self.state.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Reload the current mode, or advance silently if the session already ran out.
    pub fn reset(&mut self) -> Event {
        self.state.running = false;
        if self.state.remaining_secs == 0 {
            return self.advance();
        }
        self.state.remaining_secs = self.state.mode.duration_secs();
        Event::TimerReset {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Stop, switch to `mode` and reload its full duration.
    pub fn set_mode(&mut self, mode: PomodoroMode) -> Event {
        let from = self.state.mode;
        self.state = PomodoroState {
            mode,
            remaining_secs: mode.duration_secs(),
            running: false,
        };
        tracing::debug!(%from, to = %mode, "mode changed");
        Event::ModeChanged {
            from,
            to: mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Manual "skip to next mode". No completion notification.
    pub fn skip(&mut self) -> Event {
        self.advance()
    }

    /// One second of countdown. Returns `Some(SessionCompleted)` when the session ends.
    ///
    /// Ticks outside an active countdown are ignored.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running {
            tracing::debug!("tick ignored, timer not running");
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return None;
        }

        self.state.running = false;
        let finished = self.state.mode;
        let next = finished.next();
        self.set_mode(next);
        tracing::info!(%finished, %next, "session completed");
        Some(Event::SessionCompleted {
            finished,
            next,
            message: finished.completion_message().to_string(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let next = self.state.mode.next();
        self.set_mode(next)
    }
}
