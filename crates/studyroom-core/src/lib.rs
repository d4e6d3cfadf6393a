//! # Studyroom Core Library
//!
//! Core logic for the Studyroom study planner. The CLI binary is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak**: daily completion streak with once-per-day milestones,
//!   compared on whole calendar days
//! - **Timer**: a pure Pomodoro state machine plus a cancellable one-second
//!   tick task that drives it
//! - **Planner**: the single owner of the persisted document (tasks, goals,
//!   notes, theme, profile, streak)
//! - **Storage**: key/value backends for the document and TOML configuration
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: Pomodoro state machine
//! - [`PomodoroTimer`]: engine driven by a [`Ticker`]
//! - [`StreakState`]: streak record/reconcile/milestone operations
//! - [`Planner`]: document owner, persists on every mutation
//! - [`Config`]: application configuration management

pub mod day;
pub mod error;
pub mod events;
pub mod planner;
pub mod storage;
pub mod streak;
pub mod timer;

pub use day::CalendarDay;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use planner::{
    AcademicProfile, Goal, NewTask, Planner, PlannerDocument, Priority, Task, TaskOrder,
    TaskPatch, TaskStatus, Theme,
};
pub use storage::{Config, FileStorage, MemoryStorage, StorageBackend};
pub use streak::{Milestone, StreakChange, StreakState, StreakUpdate};
pub use timer::{
    PomodoroEngine, PomodoroMode, PomodoroSnapshot, PomodoroState, PomodoroTimer, TickOutcome,
    Ticker,
};
