pub mod config;
pub mod goal;
pub mod notes;
pub mod profile;
pub mod streak;
pub mod task;
pub mod theme;
pub mod timer;

use serde::Serialize;
use studyroom_core::{CalendarDay, FileStorage, Planner};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the planner in the data directory, reconciling the streak for `today`.
pub fn open_planner(today: CalendarDay) -> Result<Planner<FileStorage>, Box<dyn std::error::Error>> {
    Ok(Planner::open_default(today)?)
}

/// Tell the user when the last write did not reach disk.
pub fn report_save(planner: &Planner<FileStorage>) {
    if let Some(e) = planner.last_save_error() {
        tracing::warn!(error = %e, "changes kept for this run only, save failed");
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
