//! Study tasks with deadline and priority.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::day::CalendarDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lower ranks sort first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}' (expected high, medium or low)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub category: String,
    pub deadline: CalendarDay,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Pending and due before `today`.
    pub fn is_overdue(&self, today: CalendarDay) -> bool {
        !self.is_completed() && self.deadline.is_strictly_before(&today)
    }
}

/// Input for creating a task. The planner assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub subject: String,
    pub category: String,
    pub deadline: CalendarDay,
    pub priority: Priority,
}

/// Partial edit. `None` leaves the field untouched. Status is changed
/// through complete/reopen only, so the streak stays consistent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<CalendarDay>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    /// Earliest deadline first, then priority.
    Deadline,
    /// Highest priority first, then deadline.
    Priority,
}

impl TaskOrder {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let by_deadline = a.deadline.cmp(&b.deadline);
        let by_priority = a.priority.rank().cmp(&b.priority.rank());
        match self {
            TaskOrder::Deadline => by_deadline.then(by_priority),
            TaskOrder::Priority => by_priority.then(by_deadline),
        }
        .then(a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, deadline: &str, priority: Priority) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            subject: String::new(),
            category: String::new(),
            deadline: CalendarDay::parse(deadline).unwrap(),
            priority,
            status: TaskStatus::Pending,
        }
    }

    #[test]
    fn serde_matches_document_format() {
        let t = task(3, "2024-05-01", Priority::High);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["deadline"], "2024-05-01");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn orderings() {
        let mut tasks = vec![
            task(1, "2024-05-03", Priority::High),
            task(2, "2024-05-01", Priority::Low),
            task(3, "2024-05-01", Priority::High),
        ];
        tasks.sort_by(|a, b| TaskOrder::Deadline.compare(a, b));
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        tasks.sort_by(|a, b| TaskOrder::Priority.compare(a, b));
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn overdue_only_when_pending() {
        let today = CalendarDay::parse("2024-05-02").unwrap();
        let mut t = task(1, "2024-05-01", Priority::Low);
        assert!(t.is_overdue(today));
        t.status = TaskStatus::Completed;
        assert!(!t.is_overdue(today));
        assert!(!task(2, "2024-05-02", Priority::Low).is_overdue(today));
    }

    #[test]
    fn priority_parse() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("m".parse::<Priority>(), Ok(Priority::Medium));
        assert!("urgent".parse::<Priority>().is_err());
    }
}
