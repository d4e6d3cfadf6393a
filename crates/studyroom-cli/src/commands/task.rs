//! Task management commands for CLI.

use clap::Subcommand;
use studyroom_core::{CalendarDay, Config, NewTask, Priority, Task, TaskOrder, TaskPatch, TaskStatus};

use super::{open_planner, print_json, report_save, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Deadline (YYYY-MM-DD), defaults to today
        #[arg(long)]
        deadline: Option<CalendarDay>,
        /// Subject the task belongs to
        #[arg(long, default_value = "")]
        subject: String,
        /// Free-form category (homework, exam, reading, ...)
        #[arg(long, default_value = "")]
        category: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Sort by priority instead of the configured default
        #[arg(long)]
        by_priority: bool,
        /// Only pending tasks
        #[arg(long)]
        pending: bool,
        /// Only tasks for this subject
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Edit a task
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        deadline: Option<CalendarDay>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Mark a task completed
    Complete { id: u64 },
    /// Mark a completed task pending again
    Reopen { id: u64 },
    /// Delete a task
    Delete { id: u64 },
    /// Tasks due on a day (defaults to today), or in a whole month with --month
    Due {
        day: Option<CalendarDay>,
        /// Show the month containing the day instead
        #[arg(long)]
        month: bool,
        #[arg(long)]
        json: bool,
    },
    /// Pending tasks due within the next days
    Upcoming {
        /// How many days ahead to look, today included
        #[arg(long, default_value_t = 7)]
        days: i64,
        #[arg(long)]
        json: bool,
    },
    /// Pending tasks past their deadline
    Overdue {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TaskAction, today: CalendarDay) -> CmdResult {
    let mut planner = open_planner(today)?;

    match action {
        TaskAction::Add {
            title,
            deadline,
            subject,
            category,
            priority,
        } => {
            let task = planner.add_task(NewTask {
                title,
                subject,
                category,
                deadline: deadline.unwrap_or(today),
                priority,
            })?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List {
            by_priority,
            pending,
            subject,
            json,
        } => {
            let order = if by_priority {
                TaskOrder::Priority
            } else {
                Config::load_or_default().task_order()
            };
            let tasks: Vec<&Task> = planner
                .tasks_sorted(order)
                .into_iter()
                .filter(|t| !pending || !t.is_completed())
                .filter(|t| {
                    subject
                        .as_deref()
                        .map_or(true, |s| t.subject.eq_ignore_ascii_case(s))
                })
                .collect();
            print_tasks(&tasks, today, json)?;
        }
        TaskAction::Edit {
            id,
            title,
            deadline,
            subject,
            category,
            priority,
        } => {
            let patch = TaskPatch {
                title,
                subject,
                category,
                deadline,
                priority,
            };
            if planner.update_task(id, patch)? {
                println!("Task updated: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Complete { id } => match planner.complete_task(id, today) {
            Some(update) => {
                println!("Task completed: {id}");
                println!("Streak: {} day(s)", update.state.count);
                if let Some(milestone) = update.milestone {
                    if Config::load_or_default().notifications.milestones {
                        println!("{}", milestone.message());
                    }
                }
            }
            None => println!("Nothing to complete: {id}"),
        },
        TaskAction::Reopen { id } => {
            if planner.reopen_task(id) {
                println!("Task reopened: {id}");
            } else {
                println!("Nothing to reopen: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if planner.delete_task(id) {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Due { day, month, json } => {
            let day = day.unwrap_or(today);
            let tasks = if month {
                planner.tasks_in_month(day.year(), day.month())
            } else {
                planner.tasks_due_on(day)
            };
            print_tasks(&tasks, today, json)?;
        }
        TaskAction::Upcoming { days, json } => {
            print_tasks(&planner.upcoming_tasks(today, days), today, json)?;
        }
        TaskAction::Overdue { json } => {
            print_tasks(&planner.overdue_tasks(today), today, json)?;
        }
    }

    report_save(&planner);
    Ok(())
}

fn print_tasks(tasks: &[&Task], today: CalendarDay, json: bool) -> CmdResult {
    if json {
        return print_json(tasks);
    }
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    for task in tasks {
        let mark = match task.status {
            TaskStatus::Completed => "x",
            TaskStatus::Pending if task.is_overdue(today) => "!",
            TaskStatus::Pending => " ",
        };
        let subject = if task.subject.is_empty() {
            String::new()
        } else {
            format!(" [{}]", task.subject)
        };
        println!(
            "[{mark}] {:>3}  {}  {:<6}  {}{subject}",
            task.id, task.deadline, task.priority.to_string(), task.title
        );
    }
    Ok(())
}
