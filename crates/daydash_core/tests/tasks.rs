use daydash_core::db::open_db_in_memory;
use daydash_core::service::task_service::TaskList;
use daydash_core::{ManagerError, MemoryKvStore, SqliteKvStore};
use uuid::Uuid;

#[test]
fn new_tasks_start_open_and_count_as_active() {
    let store = MemoryKvStore::new();
    let mut tasks = TaskList::load(&store);

    let id = tasks.add("  plan week ").unwrap();

    let task = tasks.collection().get(id).unwrap();
    assert_eq!(task.text, "plan week");
    assert!(!task.completed);
    assert!(!task.archived);
    assert_eq!(tasks.active_count(), 1);
}

#[test]
fn blank_task_is_rejected() {
    let store = MemoryKvStore::new();
    let mut tasks = TaskList::load(&store);

    let err = tasks.add(" ").unwrap_err();
    assert!(matches!(err, ManagerError::Validation(_)));
    assert!(tasks.collection().is_empty());
}

#[test]
fn archived_task_is_hidden_but_retained() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut tasks = TaskList::load(&store);
    let keep = tasks.add("keep").unwrap();
    let shelve = tasks.add("shelve").unwrap();

    tasks.archive(shelve).unwrap();

    let visible: Vec<_> = tasks.visible().map(|task| task.id).collect();
    assert_eq!(visible, vec![keep]);
    assert_eq!(tasks.active_count(), 1);

    let reloaded = TaskList::load(&store);
    let archived = reloaded.collection().get(shelve).unwrap();
    assert!(archived.archived);
    assert_eq!(reloaded.collection().len(), 2);
}

#[test]
fn completed_task_stays_visible_but_not_active() {
    let store = MemoryKvStore::new();
    let mut tasks = TaskList::load(&store);
    let id = tasks.add("stretch").unwrap();

    assert!(tasks.toggle_completed(id).unwrap());
    assert_eq!(tasks.visible().count(), 1);
    assert_eq!(tasks.active_count(), 0);

    assert!(!tasks.toggle_completed(id).unwrap());
    assert_eq!(tasks.active_count(), 1);
}

#[test]
fn edit_replaces_text_in_place_and_ignores_blank_or_cancelled_input() {
    let store = MemoryKvStore::new();
    let mut tasks = TaskList::load(&store);
    tasks.add("first").unwrap();
    let id = tasks.add("second").unwrap();
    tasks.add("third").unwrap();

    assert!(tasks.edit_text(id, Some("  second, revised ")).unwrap());
    assert!(!tasks.edit_text(id, Some("   ")).unwrap());
    assert!(!tasks.edit_text(id, None).unwrap());

    let texts: Vec<_> = tasks
        .collection()
        .items()
        .iter()
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(texts, vec!["first", "second, revised", "third"]);
}

#[test]
fn operations_on_unknown_ids_report_not_found() {
    let store = MemoryKvStore::new();
    let mut tasks = TaskList::load(&store);
    let missing = Uuid::new_v4();

    assert!(matches!(
        tasks.toggle_completed(missing),
        Err(ManagerError::NotFound(_))
    ));
    assert!(matches!(
        tasks.edit_text(missing, None),
        Err(ManagerError::NotFound(_))
    ));
    assert!(matches!(tasks.archive(missing), Err(ManagerError::NotFound(_))));
}
