//! Health snapshot use-cases.
//!
//! # Invariants
//! - Saving replaces the whole record; there is no history.
//! - Missing or malformed stored data reads as an all-zero record.

use crate::model::health::HealthRecord;
use crate::repo::kv_store::KvStore;
use crate::service::collection::ManagerResult;
use log::{info, warn};

pub struct HealthTracker<S: KvStore> {
    store: S,
    current: HealthRecord,
}

impl<S: KvStore> HealthTracker<S> {
    pub fn load(store: S) -> Self {
        let current = load_record(&store);
        Self { store, current }
    }

    pub fn reload(&mut self) {
        self.current = load_record(&self.store);
    }

    pub fn current(&self) -> HealthRecord {
        self.current
    }

    /// Overwrites the stored record.
    pub fn save(&mut self, record: HealthRecord) -> ManagerResult<()> {
        let encoded = serde_json::to_string(&record)?;
        self.store.set(HealthRecord::STORAGE_KEY, &encoded)?;
        self.current = record;
        info!("event=health_save module=health status=ok");
        Ok(())
    }

    /// Parses raw form input leniently and saves it.
    pub fn save_from_input(
        &mut self,
        steps: &str,
        water: &str,
        sleep: &str,
    ) -> ManagerResult<HealthRecord> {
        let record = HealthRecord::from_input(steps, water, sleep);
        self.save(record)?;
        Ok(record)
    }
}

fn load_record(store: &impl KvStore) -> HealthRecord {
    match store.get(HealthRecord::STORAGE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(
                "event=health_load module=health status=degraded error_code=malformed_data line={} column={}",
                err.line(),
                err.column()
            );
            HealthRecord::default()
        }),
        Ok(None) => HealthRecord::default(),
        Err(err) => {
            warn!(
                "event=health_load module=health status=degraded error_code=store_unavailable error={err}"
            );
            HealthRecord::default()
        }
    }
}
