mod driver;
mod engine;
mod mode;
mod ticker;

pub use driver::{PomodoroTimer, TickOutcome};
pub use engine::{PomodoroEngine, PomodoroSnapshot, PomodoroState};
pub use mode::{format_clock, PomodoroMode, LONG_BREAK_SECS, SHORT_BREAK_SECS, STUDY_SECS};
pub use ticker::{Ticker, TICK_PERIOD};
