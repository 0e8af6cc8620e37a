use daydash_core::db::open_db_in_memory;
use daydash_core::service::health_service::HealthTracker;
use daydash_core::service::settings_service::Settings;
use daydash_core::{HealthRecord, KvStore, MemoryKvStore, SqliteKvStore};

#[test]
fn health_defaults_to_zero_and_save_overwrites() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut health = HealthTracker::load(&store);
    assert_eq!(health.current(), HealthRecord::default());

    health
        .save(HealthRecord {
            steps: 9000,
            water: 6,
            sleep: 7.5,
        })
        .unwrap();
    health.save_from_input("1200", "", "6").unwrap();

    let reloaded = HealthTracker::load(&store);
    assert_eq!(
        reloaded.current(),
        HealthRecord {
            steps: 1200,
            water: 0,
            sleep: 6.0,
        }
    );
}

#[test]
fn health_input_is_parsed_leniently() {
    let store = MemoryKvStore::new();
    let mut health = HealthTracker::load(&store);

    let saved = health.save_from_input("lots", "-3", "7.25").unwrap();
    assert_eq!(saved.steps, 0);
    assert_eq!(saved.water, 0);
    assert_eq!(saved.sleep, 7.25);

    let saved = health.save_from_input("8000 steps", "7.5", "6h").unwrap();
    assert_eq!(
        saved,
        HealthRecord {
            steps: 8000,
            water: 7,
            sleep: 6.0,
        }
    );
    assert_eq!(HealthTracker::load(&store).current(), saved);
}

#[test]
fn partial_or_malformed_health_data_degrades_to_defaults() {
    let store = MemoryKvStore::new();
    store.set("healthData", r#"{"water":4}"#).unwrap();
    let partial = HealthTracker::load(&store).current();
    assert_eq!(partial.water, 4);
    assert_eq!(partial.steps, 0);

    store.set("healthData", "[1,2").unwrap();
    assert_eq!(HealthTracker::load(&store).current(), HealthRecord::default());
}

#[test]
fn dark_mode_round_trips_as_text_flag() {
    let store = MemoryKvStore::new();
    let mut settings = Settings::load(&store);
    assert!(!settings.dark_mode());

    settings.set_dark_mode(true).unwrap();
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
    assert!(Settings::load(&store).dark_mode());

    store.set("darkMode", "yes").unwrap();
    assert!(!Settings::load(&store).dark_mode());
}
