use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Study countdown length in seconds.
pub const STUDY_SECS: u32 = 25 * 60;
/// Short break length in seconds.
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
/// Long break length in seconds.
pub const LONG_BREAK_SECS: u32 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PomodoroMode {
    Study,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    pub const ALL: [PomodoroMode; 3] = [
        PomodoroMode::Study,
        PomodoroMode::ShortBreak,
        PomodoroMode::LongBreak,
    ];

    /// Fixed countdown length. Not user-adjustable.
    pub fn duration_secs(&self) -> u32 {
        match self {
            PomodoroMode::Study => STUDY_SECS,
            PomodoroMode::ShortBreak => SHORT_BREAK_SECS,
            PomodoroMode::LongBreak => LONG_BREAK_SECS,
        }
    }

    /// Mode that follows a finished session.
    ///
    /// Long break is only reachable through explicit selection.
    pub fn next(&self) -> PomodoroMode {
        match self {
            PomodoroMode::Study => PomodoroMode::ShortBreak,
            PomodoroMode::ShortBreak | PomodoroMode::LongBreak => PomodoroMode::Study,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PomodoroMode::Study => "Study",
            PomodoroMode::ShortBreak => "Short Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, PomodoroMode::Study)
    }

    /// Text shown when a session of this mode runs out.
    pub fn completion_message(&self) -> &'static str {
        match self {
            PomodoroMode::Study => "Study session complete! Time for a short break.",
            PomodoroMode::ShortBreak => "Short break over. Back to studying!",
            PomodoroMode::LongBreak => "Long break over. Ready for the next study session?",
        }
    }
}

impl fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PomodoroMode::Study => "study",
            PomodoroMode::ShortBreak => "short-break",
            PomodoroMode::LongBreak => "long-break",
        };
        f.write_str(s)
    }
}

impl FromStr for PomodoroMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" | "focus" => Ok(PomodoroMode::Study),
            "short-break" | "short" | "short_break" => Ok(PomodoroMode::ShortBreak),
            "long-break" | "long" | "long_break" => Ok(PomodoroMode::LongBreak),
            other => Err(format!(
                "unknown mode '{other}' (expected study, short-break or long-break)"
            )),
        }
    }
}

/// Format seconds as `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
