use clap::Subcommand;
use studyroom_core::CalendarDay;

use super::{open_planner, print_json, report_save, CmdResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create or change the hours goal for a subject
    Set { subject: String, hours: f64 },
    /// Log study hours against a subject
    Log { subject: String, hours: f64 },
    /// List goals and progress
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove a subject goal
    Remove { subject: String },
}

pub fn run(action: GoalAction, today: CalendarDay) -> CmdResult {
    let mut planner = open_planner(today)?;

    match action {
        GoalAction::Set { subject, hours } => {
            planner.set_goal(&subject, hours)?;
            println!("Goal set: {} -> {hours}h", subject.trim());
        }
        GoalAction::Log { subject, hours } => {
            if planner.log_hours(&subject, hours)? {
                if let Some(goal) = planner.goal(subject.trim()) {
                    println!(
                        "{}: {:.1}/{:.1}h ({:.0}%)",
                        subject.trim(),
                        goal.hours_logged,
                        goal.total_goal,
                        goal.progress_pct()
                    );
                }
            } else {
                println!("No goal for subject: {subject}");
            }
        }
        GoalAction::List { json: true } => print_json(&planner.document().goals)?,
        GoalAction::List { json: false } => {
            let goals = &planner.document().goals;
            if goals.is_empty() {
                println!("No goals.");
            }
            for (subject, goal) in goals {
                let left = if goal.is_met() {
                    "done".to_string()
                } else {
                    format!("{:.1}h left", goal.remaining_hours())
                };
                println!(
                    "{subject:<20} {:>6.1}/{:<6.1}h {:>4.0}%  {left}",
                    goal.hours_logged,
                    goal.total_goal,
                    goal.progress_pct()
                );
            }
        }
        GoalAction::Remove { subject } => {
            if planner.remove_goal(&subject) {
                println!("Goal removed: {subject}");
            } else {
                println!("No goal for subject: {subject}");
            }
        }
    }

    report_save(&planner);
    Ok(())
}
