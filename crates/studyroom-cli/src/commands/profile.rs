use clap::Subcommand;
use studyroom_core::CalendarDay;

use super::{open_planner, print_json, report_save, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show name and academic profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set the display name
    Name { name: String },
    /// Set major and level
    Academic {
        #[arg(long)]
        major: String,
        #[arg(long)]
        level: String,
    },
}

pub fn run(action: ProfileAction, today: CalendarDay) -> CmdResult {
    let mut planner = open_planner(today)?;

    match action {
        ProfileAction::Show { json } => {
            let doc = planner.document();
            if json {
                print_json(&serde_json::json!({
                    "userName": doc.user_name,
                    "profile": doc.profile,
                }))?;
            } else {
                let name = if doc.user_name.is_empty() { "(unset)" } else { doc.user_name.as_str() };
                println!("Name:  {name}");
                println!("Major: {}", doc.profile.major);
                println!("Level: {}", doc.profile.level);
            }
        }
        ProfileAction::Name { name } => {
            planner.set_user_name(&name)?;
            println!("Name set: {}", planner.document().user_name);
        }
        ProfileAction::Academic { major, level } => {
            planner.set_profile(&major, &level);
            println!("Profile updated");
        }
    }

    report_save(&planner);
    Ok(())
}
