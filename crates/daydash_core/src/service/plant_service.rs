//! Plant care log use-cases.

use crate::model::plant::{Plant, PlantDraft};
use crate::model::record::RecordId;
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerResult};
use chrono::NaiveDate;

pub struct PlantLog<S: KvStore> {
    plants: CollectionManager<Plant, S>,
}

impl<S: KvStore> PlantLog<S> {
    pub fn load(store: S) -> Self {
        Self {
            plants: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<Plant, S> {
        &self.plants
    }

    pub fn reload(&mut self) {
        self.plants.reload();
    }

    /// Adds a plant. `last_watered` is raw `YYYY-MM-DD` input.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        last_watered: impl Into<String>,
    ) -> ManagerResult<RecordId> {
        self.plants.add(PlantDraft {
            name: name.into(),
            last_watered: last_watered.into(),
        })
    }

    pub fn mark_watered(&mut self, id: RecordId, on: NaiveDate) -> ManagerResult<()> {
        self.plants.update(id, |plant| plant.last_watered = on)
    }

    pub fn remove(&mut self, id: RecordId) -> ManagerResult<Plant> {
        self.plants.remove(id)
    }

    pub fn items(&self) -> &[Plant] {
        self.plants.items()
    }

    /// Plants not watered for at least `days` days as of `today`.
    pub fn due_for_water(&self, today: NaiveDate, days: i64) -> impl Iterator<Item = &Plant> + '_ {
        self.plants
            .list(move |plant| plant.days_since_watered(today) >= days)
    }
}
