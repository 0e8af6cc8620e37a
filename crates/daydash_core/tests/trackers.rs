use chrono::NaiveDate;
use daydash_core::service::grocery_service::GroceryList;
use daydash_core::service::lending_service::LendingTracker;
use daydash_core::service::plant_service::PlantLog;
use daydash_core::service::subscription_service::SubscriptionList;
use daydash_core::{LendingDirection, ManagerError, MemoryKvStore, ValidationError};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn removing_first_grocery_shifts_the_rest_forward() {
    let store = MemoryKvStore::new();
    let mut grocery = GroceryList::load(&store);
    let milk = grocery.add("milk").unwrap();
    grocery.add("eggs").unwrap();
    grocery.add("bread").unwrap();

    grocery.remove(milk).unwrap();

    let names: Vec<_> = grocery.items().iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["eggs", "bread"]);
}

#[test]
fn grocery_toggle_tracks_pending_items() {
    let store = MemoryKvStore::new();
    let mut grocery = GroceryList::load(&store);
    let tea = grocery.add("tea").unwrap();
    grocery.add("honey").unwrap();

    assert!(grocery.toggle_acquired(tea).unwrap());
    assert_eq!(grocery.pending_count(), 1);
    assert!(!grocery.toggle_acquired(tea).unwrap());
    assert_eq!(grocery.pending_count(), 2);
}

#[test]
fn subscriptions_require_positive_amounts() {
    let store = MemoryKvStore::new();
    let mut subscriptions = SubscriptionList::load(&store);
    subscriptions.add("Music", "9.99").unwrap();
    subscriptions.add("Cloud backup", "2.01").unwrap();

    let err = subscriptions.add("Free tier", "0").unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Validation(ValidationError::InvalidAmount { .. })
    ));
    let err = subscriptions.add("", "3").unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Validation(ValidationError::EmptyField(_))
    ));

    assert_eq!(subscriptions.items().len(), 2);
    assert!((subscriptions.monthly_total() - 12.0).abs() < 1e-9);
}

#[test]
fn plants_track_watering_dates() {
    let store = MemoryKvStore::new();
    let mut plants = PlantLog::load(&store);
    let fern = plants.add("Fern", "2026-03-01").unwrap();
    plants.add("Cactus", "2026-03-09").unwrap();

    let today = day("2026-03-10");
    let due: Vec<_> = plants
        .due_for_water(today, 7)
        .map(|plant| plant.name.as_str())
        .collect();
    assert_eq!(due, vec!["Fern"]);

    plants.mark_watered(fern, today).unwrap();
    assert_eq!(plants.due_for_water(today, 7).count(), 0);
    assert_eq!(plants.items()[0].days_since_watered(today), 0);

    let err = plants.add("Basil", "tomorrow").unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Validation(ValidationError::InvalidDate { .. })
    ));
}

#[test]
fn lending_requires_item_and_person() {
    let store = MemoryKvStore::new();
    let mut lending = LendingTracker::load(&store);
    lending
        .add("Drill", "Sam", LendingDirection::Lent)
        .unwrap();
    let book = lending
        .add("Dune", "Alex", LendingDirection::Borrowed)
        .unwrap();

    assert!(lending.add("Ladder", " ", LendingDirection::Lent).is_err());
    assert_eq!(lending.count(LendingDirection::Lent), 1);
    assert_eq!(lending.count(LendingDirection::Borrowed), 1);

    lending.remove(book).unwrap();
    assert_eq!(lending.count(LendingDirection::Borrowed), 0);
    assert_eq!(lending.items().len(), 1);
}
