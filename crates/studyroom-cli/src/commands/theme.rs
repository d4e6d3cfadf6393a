use clap::Subcommand;
use studyroom_core::{CalendarDay, Theme};

use super::{open_planner, report_save, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Set light or dark
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction, today: CalendarDay) -> CmdResult {
    let mut planner = open_planner(today)?;

    match action {
        ThemeAction::Show => println!("{}", planner.document().theme),
        ThemeAction::Set { theme } => {
            planner.set_theme(theme);
            println!("{theme}");
        }
        ThemeAction::Toggle => println!("{}", planner.toggle_theme()),
    }

    report_save(&planner);
    Ok(())
}
