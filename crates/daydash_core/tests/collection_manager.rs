use chrono::NaiveDate;
use daydash_core::db::{open_db, open_db_in_memory};
use daydash_core::model::budget::BudgetDraft;
use daydash_core::model::grocery::{GroceryDraft, GroceryItem};
use daydash_core::model::lending::LendingDraft;
use daydash_core::model::plant::PlantDraft;
use daydash_core::model::subscription::SubscriptionDraft;
use daydash_core::model::task::{Task, TaskDraft};
use daydash_core::{
    BudgetEntry, CollectionManager, CollectionRecord, EntryKind, KvStore, LendingDirection,
    LendingItem, ManagerError, MemoryKvStore, Plant, SqliteKvStore, StoreError, StoreResult,
    Subscription,
};
use std::cell::Cell;
use std::fmt::Debug;

fn grocery(name: &str) -> GroceryDraft {
    GroceryDraft {
        name: name.to_string(),
    }
}

#[test]
fn add_appends_to_end_of_previous_sequence() {
    let store = MemoryKvStore::new();
    let mut manager = CollectionManager::<GroceryItem, _>::load(&store);
    manager.add(grocery("milk")).unwrap();
    manager.add(grocery("eggs")).unwrap();
    let before = manager.items().to_vec();

    let id = manager.add(grocery("bread")).unwrap();

    let after = manager.items();
    assert_eq!(&after[..2], before.as_slice());
    assert_eq!(after[2].id, id);
    assert_eq!(after[2].name, "bread");
    assert!(!after[2].acquired);
}

#[test]
fn persisted_collection_round_trips_through_fresh_load() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    let mut manager = CollectionManager::<Task, _>::load(&store);
    manager.add(TaskDraft::new("write report")).unwrap();
    let second = manager.add(TaskDraft::new("call mom")).unwrap();
    manager.update(second, |task| task.completed = true).unwrap();

    let reloaded = CollectionManager::<Task, _>::load(&store);
    assert_eq!(reloaded.items(), manager.items());
}

/// Adds `drafts`, applies `mutate`, then checks a fresh load sees the same
/// sequence.
fn assert_round_trip<R, F>(drafts: Vec<R::Draft>, mutate: F)
where
    R: CollectionRecord + PartialEq + Debug,
    F: FnOnce(&mut CollectionManager<R, &SqliteKvStore<'_>>),
{
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    let mut manager = CollectionManager::<R, _>::load(&store);
    for draft in drafts {
        manager.add(draft).unwrap();
    }
    mutate(&mut manager);

    let reloaded = CollectionManager::<R, _>::load(&store);
    assert!(!reloaded.is_empty());
    assert_eq!(reloaded.items(), manager.items());
}

#[test]
fn budget_entries_round_trip_through_fresh_load() {
    let draft = |description: &str, amount: &str, kind| BudgetDraft {
        description: description.to_string(),
        amount: amount.to_string(),
        kind,
    };
    assert_round_trip::<BudgetEntry, _>(
        vec![
            draft("Coffee", "4.5", EntryKind::Expense),
            draft("Salary", "2000", EntryKind::Income),
            draft("Snacks", "12.99", EntryKind::Expense),
        ],
        |manager| {
            let first = manager.items()[0].id;
            manager.remove(first).unwrap();
        },
    );
}

#[test]
fn plants_round_trip_through_fresh_load() {
    let draft = |name: &str, date: &str| PlantDraft {
        name: name.to_string(),
        last_watered: date.to_string(),
    };
    assert_round_trip::<Plant, _>(
        vec![draft("Fern", "2026-03-01"), draft("Cactus", "2025-12-31")],
        |manager| {
            let fern = manager.items()[0].id;
            manager
                .update(fern, |plant| {
                    plant.last_watered = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
                })
                .unwrap();
        },
    );
}

#[test]
fn lending_items_round_trip_through_fresh_load() {
    let draft = |name: &str, person: &str, direction| LendingDraft {
        name: name.to_string(),
        person: person.to_string(),
        direction,
    };
    assert_round_trip::<LendingItem, _>(
        vec![
            draft("Tent", "Robin", LendingDirection::Lent),
            draft("Drill", "Sam", LendingDirection::Borrowed),
        ],
        |_| {},
    );
}

#[test]
fn subscriptions_round_trip_through_fresh_load() {
    let draft = |name: &str, amount: &str| SubscriptionDraft {
        name: name.to_string(),
        amount: amount.to_string(),
    };
    assert_round_trip::<Subscription, _>(
        vec![draft("Music", "9.99"), draft("News", "5")],
        |_| {},
    );
}

#[test]
fn grocery_items_round_trip_through_fresh_load() {
    assert_round_trip::<GroceryItem, _>(vec![grocery("milk"), grocery("eggs")], |manager| {
        let eggs = manager.items()[1].id;
        manager.update(eggs, |item| item.acquired = true).unwrap();
    });
}

#[test]
fn tasks_round_trip_through_fresh_load() {
    assert_round_trip::<Task, _>(
        vec![TaskDraft::new("write report"), TaskDraft::new("call mom")],
        |manager| {
            let first = manager.items()[0].id;
            manager.update(first, |task| task.archived = true).unwrap();
        },
    );
}

#[test]
fn remove_by_id_shifts_later_records_forward() {
    let store = MemoryKvStore::new();
    let mut manager = CollectionManager::<GroceryItem, _>::load(&store);
    let first = manager.add(grocery("apples")).unwrap();
    let second = manager.add(grocery("pears")).unwrap();
    let third = manager.add(grocery("plums")).unwrap();

    let removed = manager.remove(first).unwrap();
    assert_eq!(removed.name, "apples");

    let ids: Vec<_> = manager.items().iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![second, third]);

    // Ids stay valid after the shift; a stale id is reported, not misapplied.
    manager.update(third, |item| item.acquired = true).unwrap();
    assert!(manager.items()[1].acquired);
    let err = manager.remove(first).unwrap_err();
    assert!(matches!(err, ManagerError::NotFound(id) if id == first));
    assert_eq!(manager.len(), 2);
}

#[test]
fn rejected_draft_leaves_collection_and_store_untouched() {
    let store = MemoryKvStore::new();
    let mut manager = CollectionManager::<GroceryItem, _>::load(&store);
    manager.add(grocery("rice")).unwrap();
    let stored_before = store.get("groceryList").unwrap();

    let err = manager.add(grocery("   ")).unwrap_err();

    assert!(err.validation().is_some());
    assert_eq!(manager.len(), 1);
    assert_eq!(store.get("groceryList").unwrap(), stored_before);
}

#[test]
fn absent_and_malformed_data_load_as_empty() {
    let store = MemoryKvStore::new();
    assert!(CollectionManager::<Task, _>::load(&store).is_empty());

    store.set("tasks", "{not json").unwrap();
    assert!(CollectionManager::<Task, _>::load(&store).is_empty());

    store.set("tasks", r#"[{"text":"ok"},{"completed":true}]"#).unwrap();
    assert!(CollectionManager::<Task, _>::load(&store).is_empty());

    store.set("tasks", "null").unwrap();
    assert!(CollectionManager::<Task, _>::load(&store).is_empty());
}

#[test]
fn legacy_records_without_ids_get_stable_ids_on_first_load() {
    let store = MemoryKvStore::new();
    store
        .set(
            "groceryList",
            r#"[{"name":"milk","acquired":false},{"name":"tea","acquired":true}]"#,
        )
        .unwrap();

    let first = CollectionManager::<GroceryItem, _>::load(&store);
    let second = CollectionManager::<GroceryItem, _>::load(&store);

    assert_eq!(first.len(), 2);
    assert_eq!(first.items(), second.items());
    assert!(first.items()[1].acquired);
}

#[test]
fn null_ids_are_assigned_like_missing_ones() {
    let store = MemoryKvStore::new();
    store
        .set(
            "tasks",
            r#"[{"id":null,"text":"a"},{"text":"b"},{"id":"11112222-3333-4444-8555-666677778888","text":"c"}]"#,
        )
        .unwrap();

    let first = CollectionManager::<Task, _>::load(&store);
    let texts: Vec<_> = first.items().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert!(first.items().iter().all(|task| !task.id.is_nil()));
    assert_eq!(
        first.items()[2].id.to_string(),
        "11112222-3333-4444-8555-666677778888"
    );

    let second = CollectionManager::<Task, _>::load(&store);
    assert_eq!(first.items(), second.items());
    assert!(!store.get("tasks").unwrap().unwrap().contains("null"));
}

#[test]
fn resolve_id_matches_unique_prefixes() {
    let store = MemoryKvStore::new();
    store
        .set(
            "groceryList",
            r#"[
                {"id":"11112222-0000-4000-8000-000000000001","name":"oats","acquired":false},
                {"id":"11113333-0000-4000-8000-000000000002","name":"flour","acquired":false}
            ]"#,
        )
        .unwrap();
    let manager = CollectionManager::<GroceryItem, _>::load(&store);
    let oats = manager.items()[0].id;

    assert_eq!(manager.resolve_id("11112").unwrap(), oats);
    assert_eq!(manager.resolve_id("1111-2222").unwrap(), oats);
    assert_eq!(
        manager
            .resolve_id("11112222-0000-4000-8000-000000000001")
            .unwrap(),
        oats
    );
    assert!(matches!(
        manager.resolve_id("1111"),
        Err(ManagerError::AmbiguousId(_))
    ));
    assert!(matches!(
        manager.resolve_id("9"),
        Err(ManagerError::UnknownId(_))
    ));
    assert!(matches!(
        manager.resolve_id("  "),
        Err(ManagerError::UnknownId(_))
    ));
}

struct FlakyStore {
    inner: MemoryKvStore,
    fail_writes: Cell<bool>,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Db(daydash_core::db::DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear()
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.inner.keys()
    }
}

#[test]
fn failed_write_keeps_memory_and_store_in_step() {
    let store = FlakyStore {
        inner: MemoryKvStore::new(),
        fail_writes: Cell::new(false),
    };
    let mut manager = CollectionManager::<GroceryItem, _>::load(&store);
    let id = manager.add(grocery("butter")).unwrap();

    store.fail_writes.set(true);
    assert!(matches!(
        manager.add(grocery("jam")),
        Err(ManagerError::Store(_))
    ));
    assert!(matches!(manager.remove(id), Err(ManagerError::Store(_))));
    assert!(matches!(
        manager.update(id, |item| item.acquired = true),
        Err(ManagerError::Store(_))
    ));

    assert_eq!(manager.len(), 1);
    assert!(!manager.items()[0].acquired);

    store.fail_writes.set(false);
    let reloaded = CollectionManager::<GroceryItem, _>::load(&store);
    assert_eq!(reloaded.items(), manager.items());
}

#[test]
fn file_backed_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dash.sqlite3");

    let id = {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::new(&conn);
        let mut manager = CollectionManager::<Task, _>::load(&store);
        manager.add(TaskDraft::new("water plants")).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = SqliteKvStore::new(&conn);
    let manager = CollectionManager::<Task, _>::load(&store);
    assert_eq!(manager.get(id).unwrap().text, "water plants");
}
