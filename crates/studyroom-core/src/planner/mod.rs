//! The planner: owner of the persisted document.
//!
//! There is exactly one [`Planner`] per process. [`Planner::open`] loads the
//! document and reconciles the streak before anything can read it; every
//! mutation afterwards is written back before the method returns.
//!
//! Storage problems never escape as errors. Entries of the stored document
//! that do not parse are dropped one by one and the rest is kept; an
//! unreadable document is replaced by defaults. In both cases the stored
//! text is first copied to [`BACKUP_KEY`]. A failed save is logged and kept
//! in [`Planner::last_save_error`] while the in-memory state stays
//! authoritative for the rest of the session.

mod document;
mod task;

pub use document::{AcademicProfile, Goal, PlannerDocument, Theme, BACKUP_KEY, DOCUMENT_KEY};
pub use task::{NewTask, Priority, Task, TaskOrder, TaskPatch, TaskStatus};

use crate::day::CalendarDay;
use crate::error::{StorageError, ValidationError};
use crate::storage::{FileStorage, StorageBackend};
use crate::streak::{StreakState, StreakUpdate};

pub struct Planner<B: StorageBackend> {
    backend: B,
    doc: PlannerDocument,
    last_save_error: Option<StorageError>,
}

impl<B: StorageBackend> Planner<B> {
    /// Load the document from `backend` and reconcile the streak for `today`.
    pub fn open(mut backend: B, today: CalendarDay) -> Self {
        let doc = load_document(&mut backend);
        let mut planner = Self {
            backend,
            doc,
            last_save_error: None,
        };
        if planner.doc.streak.reconcile_on_load(today) {
            planner.persist();
        }
        planner
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn document(&self) -> &PlannerDocument {
        &self.doc
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn last_save_error(&self) -> Option<&StorageError> {
        self.last_save_error.as_ref()
    }

    pub fn streak(&self) -> &StreakState {
        &self.doc.streak
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.doc.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.doc.tasks
    }

    pub fn tasks_sorted(&self, order: TaskOrder) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.doc.tasks.iter().collect();
        tasks.sort_by(|a, b| order.compare(a, b));
        tasks
    }

    pub fn tasks_due_on(&self, day: CalendarDay) -> Vec<&Task> {
        self.doc.tasks.iter().filter(|t| t.deadline == day).collect()
    }

    /// Tasks whose deadline falls in the given month, by deadline.
    pub fn tasks_in_month(&self, year: i32, month: u32) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .doc
            .tasks
            .iter()
            .filter(|t| t.deadline.year() == year && t.deadline.month() == month)
            .collect();
        tasks.sort_by(|a, b| TaskOrder::Deadline.compare(a, b));
        tasks
    }

    pub fn overdue_tasks(&self, today: CalendarDay) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.doc.tasks.iter().filter(|t| t.is_overdue(today)).collect();
        tasks.sort_by(|a, b| TaskOrder::Deadline.compare(a, b));
        tasks
    }

    /// Pending tasks due within `days` days from `today` (inclusive).
    pub fn upcoming_tasks(&self, today: CalendarDay, days: i64) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .doc
            .tasks
            .iter()
            .filter(|t| !t.is_completed() && (0..=days).contains(&today.days_until(&t.deadline)))
            .collect();
        tasks.sort_by(|a, b| TaskOrder::Deadline.compare(a, b));
        tasks
    }

    pub fn tasks_by_subject(&self, subject: &str) -> Vec<&Task> {
        self.doc
            .tasks
            .iter()
            .filter(|t| t.subject.eq_ignore_ascii_case(subject))
            .collect()
    }

    pub fn goal(&self, subject: &str) -> Option<&Goal> {
        self.doc.goals.get(subject)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn add_task(&mut self, new: NewTask) -> Result<&Task, ValidationError> {
        let title = required("title", &new.title)?;
        let highest = self.doc.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let id = highest
            .checked_add(1)
            .ok_or(ValidationError::IdsExhausted(highest))?;
        self.doc.tasks.push(Task {
            id,
            title,
            subject: new.subject.trim().to_string(),
            category: new.category.trim().to_string(),
            deadline: new.deadline,
            priority: new.priority,
            status: TaskStatus::Pending,
        });
        tracing::debug!(id, "task added");
        self.persist();
        Ok(&self.doc.tasks[self.doc.tasks.len() - 1])
    }

    /// Apply `patch` to task `id`. Unknown ids are a no-op returning `false`.
    pub fn update_task(&mut self, id: u64, patch: TaskPatch) -> Result<bool, ValidationError> {
        let title = patch.title.as_deref().map(|t| required("title", t)).transpose()?;
        let Some(task) = self.doc.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(subject) = patch.subject {
            task.subject = subject.trim().to_string();
        }
        if let Some(category) = patch.category {
            task.category = category.trim().to_string();
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        self.persist();
        Ok(true)
    }

    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.doc.tasks.len();
        self.doc.tasks.retain(|t| t.id != id);
        if self.doc.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Mark a pending task completed and record the completion for `today`.
    ///
    /// Returns `None` for unknown or already completed tasks; the streak
    /// only moves on a real pending -> completed transition.
    pub fn complete_task(&mut self, id: u64, today: CalendarDay) -> Option<StreakUpdate> {
        let task = self.doc.tasks.iter_mut().find(|t| t.id == id)?;
        if task.is_completed() {
            return None;
        }
        task.status = TaskStatus::Completed;
        let update = self.doc.streak.record_completion(today);
        self.persist();
        Some(update)
    }

    /// Put a completed task back to pending. Never touches the streak.
    pub fn reopen_task(&mut self, id: u64) -> bool {
        let Some(task) = self.doc.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !task.is_completed() {
            return false;
        }
        task.status = TaskStatus::Pending;
        self.persist();
        true
    }

    // ── Goals ────────────────────────────────────────────────────────

    /// Create or replace the hours goal for `subject`, keeping logged hours.
    pub fn set_goal(&mut self, subject: &str, total_hours: f64) -> Result<(), ValidationError> {
        let subject = required("subject", subject)?;
        positive_hours("total goal", total_hours)?;
        self.doc.goals.entry(subject).or_default().total_goal = total_hours;
        self.persist();
        Ok(())
    }

    /// Add hours to an existing goal. Unknown subjects are a no-op returning `false`.
    pub fn log_hours(&mut self, subject: &str, hours: f64) -> Result<bool, ValidationError> {
        positive_hours("hours", hours)?;
        let Some(goal) = self.doc.goals.get_mut(subject.trim()) else {
            return Ok(false);
        };
        let total = goal.hours_logged + hours;
        if !total.is_finite() {
            return Err(ValidationError::HoursOverflow {
                field: "hours logged",
                current: goal.hours_logged,
                added: hours,
            });
        }
        goal.hours_logged = total;
        self.persist();
        Ok(true)
    }

    pub fn remove_goal(&mut self, subject: &str) -> bool {
        if self.doc.goals.remove(subject.trim()).is_none() {
            return false;
        }
        self.persist();
        true
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_user_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.doc.user_name = required("name", name)?;
        self.persist();
        Ok(())
    }

    pub fn set_profile(&mut self, major: &str, level: &str) {
        self.doc.profile = AcademicProfile {
            major: major.trim().to_string(),
            level: level.trim().to_string(),
        };
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.doc.theme = theme;
        self.persist();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.doc.theme = self.doc.theme.toggled();
        self.persist();
        self.doc.theme
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.doc.notes = notes.to_string();
        self.persist();
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Write the document. Returns `false` if the save failed.
    fn persist(&mut self) -> bool {
        let result = serde_json::to_string_pretty(&self.doc)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.write(DOCUMENT_KEY, &raw));
        match result {
            Ok(()) => {
                self.last_save_error = None;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save planner document, keeping in-memory state");
                self.last_save_error = Some(e);
                false
            }
        }
    }
}

impl Planner<FileStorage> {
    /// Open the planner stored in [`data_dir()`](crate::storage::data_dir).
    pub fn open_default(today: CalendarDay) -> crate::error::Result<Self> {
        Ok(Self::open(FileStorage::open_default()?, today))
    }
}

fn load_document<B: StorageBackend>(backend: &mut B) -> PlannerDocument {
    match backend.read(DOCUMENT_KEY) {
        Ok(Some(raw)) => match PlannerDocument::parse_lenient(&raw) {
            Ok((doc, 0)) => doc,
            Ok((doc, dropped)) => {
                tracing::warn!(dropped, "planner document partly unreadable, keeping the rest");
                back_up(backend, &raw);
                doc
            }
            Err(e) => {
                tracing::warn!(error = %e, "planner document is corrupt, starting from defaults");
                back_up(backend, &raw);
                PlannerDocument::default()
            }
        },
        Ok(None) => {
            tracing::debug!("no planner document yet, starting from defaults");
            PlannerDocument::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "planner storage unavailable, starting from defaults");
            PlannerDocument::default()
        }
    }
}

/// Keep a copy of a stored document before anything overwrites it.
fn back_up<B: StorageBackend>(backend: &mut B, raw: &str) {
    match backend.write(BACKUP_KEY, raw) {
        Ok(()) => tracing::warn!(key = BACKUP_KEY, "stored document copied aside"),
        Err(e) => tracing::error!(error = %e, "could not copy the stored document aside"),
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn positive_hours(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NonPositiveHours { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn day(s: &str) -> CalendarDay {
        CalendarDay::parse(s).unwrap()
    }

    fn new_task(title: &str, deadline: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            subject: "Math".to_string(),
            category: "Homework".to_string(),
            deadline: day(deadline),
            priority: Priority::Medium,
        }
    }

    fn planner() -> Planner<MemoryStorage> {
        Planner::open(MemoryStorage::new(), day("2024-04-10"))
    }

    fn saved(planner: &Planner<MemoryStorage>) -> PlannerDocument {
        serde_json::from_str(planner.backend().get(DOCUMENT_KEY).unwrap()).unwrap()
    }

    #[test]
    fn add_task_assigns_increasing_ids_and_persists() {
        let mut p = planner();
        assert_eq!(p.add_task(new_task("a", "2024-04-11")).unwrap().id, 1);
        assert_eq!(p.add_task(new_task("b", "2024-04-12")).unwrap().id, 2);
        p.delete_task(1);
        assert_eq!(p.add_task(new_task("c", "2024-04-12")).unwrap().id, 3);
        assert_eq!(saved(&p).tasks.len(), 2);
    }

    #[test]
    fn add_task_rejects_blank_title() {
        let mut p = planner();
        assert_eq!(
            p.add_task(new_task("   ", "2024-04-11")).unwrap_err(),
            ValidationError::EmptyField { field: "title" }
        );
        assert!(p.tasks().is_empty());
        assert!(p.backend().get(DOCUMENT_KEY).is_none());
    }

    #[test]
    fn complete_records_streak_once() {
        let mut p = planner();
        p.add_task(new_task("a", "2024-04-11")).unwrap();
        p.add_task(new_task("b", "2024-04-11")).unwrap();
        let today = day("2024-04-10");

        let first = p.complete_task(1, today).unwrap();
        assert_eq!(first.state.count, 1);
        assert!(p.complete_task(1, today).is_none());

        let second = p.complete_task(2, today).unwrap();
        assert_eq!(second.state.count, 1);
        assert_eq!(saved(&p).streak.count, 1);
    }

    #[test]
    fn reopen_does_not_decrement() {
        let mut p = planner();
        p.add_task(new_task("a", "2024-04-11")).unwrap();
        p.complete_task(1, day("2024-04-10"));
        assert!(p.reopen_task(1));
        assert!(!p.reopen_task(1));
        assert_eq!(p.streak().count, 1);
        assert_eq!(p.task(1).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut p = planner();
        assert!(p.complete_task(99, day("2024-04-10")).is_none());
        assert!(!p.reopen_task(99));
        assert!(!p.delete_task(99));
        assert!(!p.update_task(99, TaskPatch::default()).unwrap());
        assert!(p.backend().get(DOCUMENT_KEY).is_none());
    }

    #[test]
    fn update_task_patches_fields() {
        let mut p = planner();
        p.add_task(new_task("a", "2024-04-11")).unwrap();
        let patch = TaskPatch {
            title: Some("renamed".into()),
            priority: Some(Priority::High),
            ..TaskPatch::default()
        };
        assert!(p.update_task(1, patch).unwrap());
        let t = p.task(1).unwrap();
        assert_eq!(t.title, "renamed");
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.subject, "Math");

        let blank = TaskPatch {
            title: Some(" ".into()),
            ..TaskPatch::default()
        };
        assert!(p.update_task(1, blank).is_err());
        assert_eq!(p.task(1).unwrap().title, "renamed");
    }

    #[test]
    fn calendar_queries() {
        let mut p = planner();
        p.add_task(new_task("late", "2024-04-02")).unwrap();
        p.add_task(new_task("today", "2024-04-10")).unwrap();
        p.add_task(new_task("soon", "2024-04-13")).unwrap();
        p.add_task(new_task("may", "2024-05-01")).unwrap();
        let today = day("2024-04-10");

        assert_eq!(p.tasks_due_on(today).len(), 1);
        assert_eq!(p.tasks_in_month(2024, 4).len(), 3);
        assert_eq!(p.overdue_tasks(today)[0].title, "late");
        let upcoming: Vec<_> = p.upcoming_tasks(today, 7).iter().map(|t| t.id).collect();
        assert_eq!(upcoming, vec![2, 3]);
        assert_eq!(p.tasks_by_subject("math").len(), 4);
    }

    #[test]
    fn goals() {
        let mut p = planner();
        assert!(p.set_goal("", 5.0).is_err());
        assert!(p.set_goal("Physics", 0.0).is_err());
        assert!(p.set_goal("Physics", f64::NAN).is_err());
        p.set_goal("Physics", 10.0).unwrap();
        assert!(p.log_hours("Physics", 2.5).unwrap());
        assert!(!p.log_hours("Chemistry", 1.0).unwrap());
        assert!(p.log_hours("Physics", -1.0).is_err());

        // Raising the target keeps logged hours.
        p.set_goal("Physics", 20.0).unwrap();
        let g = p.goal("Physics").unwrap();
        assert_eq!(g.hours_logged, 2.5);
        assert_eq!(g.total_goal, 20.0);

        assert!(p.remove_goal("Physics"));
        assert!(!p.remove_goal("Physics"));
    }

    #[test]
    fn settings() {
        let mut p = planner();
        assert!(p.set_user_name("  ").is_err());
        p.set_user_name(" Ada ").unwrap();
        p.set_profile("Computer Science", "Sophomore");
        assert_eq!(p.toggle_theme(), Theme::Dark);
        p.set_notes("chapter 4 before friday");

        let doc = saved(&p);
        assert_eq!(doc.user_name, "Ada");
        assert_eq!(doc.profile.level, "Sophomore");
        assert_eq!(doc.theme, Theme::Dark);
        assert_eq!(doc.notes, "chapter 4 before friday");
    }

    #[test]
    fn open_reconciles_lapsed_streak() {
        let raw = r#"{"streak":{"count":4,"lastCompletionDate":"2024-04-01","lastRewardedDay":null}}"#;
        let p = Planner::open(MemoryStorage::with_entry(DOCUMENT_KEY, raw), day("2024-04-10"));
        assert_eq!(p.streak(), &StreakState::default());
        assert_eq!(saved(&p).streak.count, 0);
    }

    #[test]
    fn open_keeps_fresh_streak_without_writing() {
        let raw = r#"{"streak":{"count":4,"lastCompletionDate":"2024-04-09"}}"#;
        let p = Planner::open(MemoryStorage::with_entry(DOCUMENT_KEY, raw), day("2024-04-10"));
        assert_eq!(p.streak().count, 4);
        assert_eq!(p.backend().get(DOCUMENT_KEY), Some(raw));
    }

    #[test]
    fn corrupt_document_falls_back_to_defaults() {
        let mut p = Planner::open(
            MemoryStorage::with_entry(DOCUMENT_KEY, "{not json"),
            day("2024-04-10"),
        );
        assert_eq!(p.document(), &PlannerDocument::default());
        p.set_notes("x");
        assert_eq!(p.backend().get(BACKUP_KEY), Some("{not json"));
    }

    #[test]
    fn one_bad_task_does_not_wipe_the_document() {
        let raw = r#"{
            "tasks": [
                {"id": 1, "title": "essay", "status": "pending"},
                {"id": 2, "title": "lab", "deadline": "2024-04-12"}
            ],
            "goals": {"Math": {"totalGoal": 10, "hoursLogged": 4}},
            "userName": "Ada",
            "streak": {"count": 7, "lastCompletionDate": "2024-04-09"}
        }"#;
        let mut p = Planner::open(MemoryStorage::with_entry(DOCUMENT_KEY, raw), day("2024-04-10"));
        p.set_notes("x");

        let doc = saved(&p);
        assert_eq!(doc.tasks.len(), 1);
        assert_eq!(doc.tasks[0].title, "lab");
        assert_eq!(doc.goals["Math"].hours_logged, 4.0);
        assert_eq!(doc.user_name, "Ada");
        assert_eq!(doc.streak.count, 7);
        assert_eq!(doc.notes, "x");
        assert_eq!(p.backend().get(BACKUP_KEY), Some(raw));
    }

    #[test]
    fn clean_document_is_not_backed_up() {
        let raw = r#"{"userName":"Ada"}"#;
        let p = Planner::open(MemoryStorage::with_entry(DOCUMENT_KEY, raw), day("2024-04-10"));
        assert!(p.backend().get(BACKUP_KEY).is_none());
    }

    #[test]
    fn log_hours_rejects_overflowing_total() {
        let mut p = planner();
        p.set_goal("Math", f64::MAX).unwrap();
        assert!(p.log_hours("Math", f64::MAX).unwrap());
        assert!(matches!(
            p.log_hours("Math", f64::MAX),
            Err(ValidationError::HoursOverflow { .. })
        ));
        assert_eq!(p.goal("Math").unwrap().hours_logged, f64::MAX);

        let reopened = Planner::open(
            MemoryStorage::with_entry(DOCUMENT_KEY, p.backend().get(DOCUMENT_KEY).unwrap()),
            day("2024-04-10"),
        );
        assert_eq!(reopened.goal("Math").unwrap().hours_logged, f64::MAX);
    }

    #[test]
    fn add_task_rejects_when_ids_run_out() {
        let raw = format!(
            r#"{{"tasks":[{{"id":{},"title":"last","deadline":"2024-04-12"}}]}}"#,
            u64::MAX
        );
        let mut p = Planner::open(MemoryStorage::with_entry(DOCUMENT_KEY, &raw), day("2024-04-10"));
        assert_eq!(
            p.add_task(new_task("one more", "2024-04-12")).unwrap_err(),
            ValidationError::IdsExhausted(u64::MAX)
        );
        assert_eq!(p.tasks().len(), 1);
    }
}
