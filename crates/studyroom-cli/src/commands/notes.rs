use clap::Subcommand;
use studyroom_core::CalendarDay;

use super::{open_planner, report_save, CmdResult};

#[derive(Subcommand)]
pub enum NotesAction {
    /// Print the notes
    Show,
    /// Replace the notes
    Set { text: String },
    /// Append a line to the notes
    Append { text: String },
    /// Clear the notes
    Clear,
}

pub fn run(action: NotesAction, today: CalendarDay) -> CmdResult {
    let mut planner = open_planner(today)?;

    match action {
        NotesAction::Show => println!("{}", planner.document().notes),
        NotesAction::Set { text } => planner.set_notes(&text),
        NotesAction::Append { text } => {
            let current = &planner.document().notes;
            let notes = if current.is_empty() {
                text
            } else {
                format!("{current}\n{text}")
            };
            planner.set_notes(&notes);
        }
        NotesAction::Clear => planner.set_notes(""),
    }

    report_save(&planner);
    Ok(())
}
