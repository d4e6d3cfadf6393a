//! Planner persistence against real files and failing backends.

use studyroom_core::planner::{BACKUP_KEY, DOCUMENT_KEY};
use studyroom_core::{
    CalendarDay, FileStorage, NewTask, Planner, Priority, StorageBackend, StorageError,
};

fn day(s: &str) -> CalendarDay {
    CalendarDay::parse(s).unwrap()
}

fn homework(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        subject: "History".to_string(),
        category: "Reading".to_string(),
        deadline: day("2024-09-20"),
        priority: Priority::High,
    }
}

#[test]
fn streak_survives_restarts_across_days() {
    let dir = tempfile::tempdir().unwrap();

    let mut planner = Planner::open(FileStorage::new(dir.path()), day("2024-09-01"));
    planner.add_task(homework("ch. 1")).unwrap();
    planner.add_task(homework("ch. 2")).unwrap();
    planner.add_task(homework("ch. 3")).unwrap();
    planner.complete_task(1, day("2024-09-01"));
    drop(planner);

    let mut planner = Planner::open(FileStorage::new(dir.path()), day("2024-09-02"));
    assert_eq!(planner.streak().count, 1);
    let update = planner.complete_task(2, day("2024-09-02")).unwrap();
    assert_eq!(update.state.count, 2);
    drop(planner);

    // Three days later the streak has lapsed.
    let planner = Planner::open(FileStorage::new(dir.path()), day("2024-09-05"));
    assert_eq!(planner.streak().count, 0);
    assert_eq!(planner.tasks().len(), 3);
    assert!(planner.task(3).map(|t| !t.is_completed()).unwrap());
}

#[test]
fn document_is_plain_json_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let path = storage.path_for(DOCUMENT_KEY);

    let mut planner = Planner::open(storage, day("2024-09-01"));
    planner.set_goal("History", 12.0).unwrap();

    let raw = std::fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["goals"]["History"]["totalGoal"], 12.0);
    assert_eq!(json["streak"]["count"], 0);
}

#[test]
fn unreadable_entries_are_copied_aside_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let doc_path = storage.path_for(DOCUMENT_KEY);
    let backup_path = storage.path_for(BACKUP_KEY);
    let raw = r#"{"tasks":[{"id":1,"title":"essay"},{"id":2,"title":"map quiz","deadline":"2024-09-03"}],"userName":"Ada"}"#;
    std::fs::write(&doc_path, raw).unwrap();

    let mut planner = Planner::open(storage, day("2024-09-01"));
    assert_eq!(planner.tasks().len(), 1);
    planner.set_notes("reread chapter 2");

    assert_eq!(std::fs::read_to_string(&backup_path).unwrap(), raw);
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&doc_path).unwrap()).unwrap();
    assert_eq!(json["userName"], "Ada");
    assert_eq!(json["tasks"][0]["title"], "map quiz");
}

struct BrokenDisk;

impl StorageBackend for BrokenDisk {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
}

#[test]
fn failed_saves_keep_memory_authoritative() {
    let mut planner = Planner::open(BrokenDisk, day("2024-09-01"));
    assert!(planner.tasks().is_empty());

    planner.add_task(homework("ch. 1")).unwrap();
    assert!(planner.last_save_error().is_some());

    let update = planner.complete_task(1, day("2024-09-01")).unwrap();
    assert_eq!(update.state.count, 1);
    assert_eq!(planner.streak().count, 1);
    assert!(planner.task(1).unwrap().is_completed());
}
