//! Daily completion streak.
//!
//! A streak counts consecutive calendar days with at least one completed
//! task. The state is persisted with the planner document and only ever
//! changes through the three operations here:
//!
//! - [`StreakState::record_completion`] once per task completion event
//! - [`StreakState::reconcile_on_load`] once at startup
//! - [`StreakState::check_milestone`] after every count change

use serde::{Deserialize, Serialize};

use crate::day::CalendarDay;

/// Streak counts that trigger a celebration.
pub const MILESTONES: [u32; 5] = [5, 10, 20, 50, 100];

/// Persisted streak state.
///
/// `count == 0` exactly when `last_completion_date` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub last_completion_date: Option<CalendarDay>,
    /// Guards against a second milestone reward on the same day.
    #[serde(default)]
    pub last_rewarded_day: Option<CalendarDay>,
}

/// What a call to [`StreakState::record_completion`] did to the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already completed something today.
    Unchanged,
    /// Completion yesterday, count went up by one.
    Extended,
    /// No usable previous day, count restarted at 1.
    Started,
}

/// A reached milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub days: u32,
}

impl Milestone {
    pub fn message(&self) -> String {
        match self.days {
            100 => "100-day streak! Legendary consistency.".to_string(),
            50 => "50-day streak! Half way to a hundred.".to_string(),
            days => format!("{days}-day streak! Keep it going."),
        }
    }
}

/// Outcome of recording a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub state: StreakState,
    pub change: StreakChange,
    pub milestone: Option<Milestone>,
}

impl StreakState {
    /// Record one task completion on `today`.
    ///
    /// Must be called once per completion event, never batch-applied.
    pub fn record_completion(&mut self, today: CalendarDay) -> StreakUpdate {
        let change = match self.last_completion_date {
            Some(last) if last == today => StreakChange::Unchanged,
            Some(last) if last.is_yesterday_of(&today) => StreakChange::Extended,
            // No previous day, a gap, or a date in the future after clock skew.
            _ => StreakChange::Started,
        };

        let milestone = match change {
            StreakChange::Unchanged => None,
            StreakChange::Extended => {
                self.count = self.count.saturating_add(1);
                self.last_completion_date = Some(today);
                self.check_milestone(self.count, today)
            }
            StreakChange::Started => {
                self.count = 1;
                self.last_completion_date = Some(today);
                self.check_milestone(self.count, today)
            }
        };

        if change != StreakChange::Unchanged {
            tracing::info!(count = self.count, ?change, %today, "streak updated");
        }

        StreakUpdate {
            state: self.clone(),
            change,
            milestone,
        }
    }

    /// Drop a streak that lapsed while the app was closed.
    ///
    /// Only resets, never increments. A stored state where `count` and
    /// `last_completion_date` disagree about whether a streak exists is
    /// reset as well. Returns `true` when state changed.
    pub fn reconcile_on_load(&mut self, today: CalendarDay) -> bool {
        match self.last_completion_date {
            Some(last) if last.is_strictly_before(&today.yesterday()) => {
                tracing::info!(previous = self.count, %last, %today, "streak lapsed, resetting");
                *self = StreakState::default();
                true
            }
            None if self.count != 0 => {
                tracing::warn!(count = self.count, "streak count without a completion date, resetting");
                *self = StreakState::default();
                true
            }
            Some(last) if self.count == 0 => {
                tracing::warn!(%last, "completion date on an empty streak, clearing");
                self.last_completion_date = None;
                true
            }
            _ => false,
        }
    }

    /// Mark and return a milestone if `count` is one and none was rewarded today.
    pub fn check_milestone(&mut self, count: u32, today: CalendarDay) -> Option<Milestone> {
        if self.last_rewarded_day == Some(today) || !MILESTONES.contains(&count) {
            return None;
        }
        self.last_rewarded_day = Some(today);
        tracing::info!(days = count, "streak milestone reached");
        Some(Milestone { days: count })
    }

    pub fn is_active_on(&self, today: CalendarDay) -> bool {
        self.last_completion_date == Some(today)
    }
}
