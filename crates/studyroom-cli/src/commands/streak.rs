use clap::Subcommand;
use studyroom_core::streak::MILESTONES;
use studyroom_core::CalendarDay;

use super::{open_planner, print_json, report_save, CmdResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the current streak
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreakAction, today: CalendarDay) -> CmdResult {
    // Opening reconciles a lapsed streak, which may itself write.
    let planner = open_planner(today)?;
    let streak = planner.streak();

    match action {
        StreakAction::Show { json: true } => print_json(streak)?,
        StreakAction::Show { json: false } => {
            println!("Streak: {} day(s)", streak.count);
            match streak.last_completion_date {
                Some(last) if streak.is_active_on(today) => println!("Last completion: {last} (today)"),
                Some(last) => println!("Last completion: {last} - complete a task today to keep it"),
                None => println!("No completions yet."),
            }
            if let Some(next) = MILESTONES.iter().find(|m| **m > streak.count) {
                println!("Next milestone: {next} days");
            }
        }
    }

    report_save(&planner);
    Ok(())
}
