use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::PomodoroMode;

/// Every timer state change produces an Event.
/// The UI layer renders them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Explicit mode selection or a manual skip. Never carries a notification.
    ModeChanged {
        from: PomodoroMode,
        to: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. Emitted once per natural completion,
    /// after which the engine already sits in `next`.
    SessionCompleted {
        finished: PomodoroMode,
        next: PomodoroMode,
        message: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Notification text, if this event should be announced to the user.
    pub fn notification(&self) -> Option<&str> {
        match self {
            Event::SessionCompleted { message, .. } => Some(message),
            _ => None,
        }
    }
}
