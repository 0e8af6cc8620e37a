//! Borrow/lend tracker use-cases.

use crate::model::lending::{LendingDirection, LendingDraft, LendingItem};
use crate::model::record::RecordId;
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerResult};

pub struct LendingTracker<S: KvStore> {
    items: CollectionManager<LendingItem, S>,
}

impl<S: KvStore> LendingTracker<S> {
    pub fn load(store: S) -> Self {
        Self {
            items: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<LendingItem, S> {
        &self.items
    }

    pub fn reload(&mut self) {
        self.items.reload();
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        person: impl Into<String>,
        direction: LendingDirection,
    ) -> ManagerResult<RecordId> {
        self.items.add(LendingDraft {
            name: name.into(),
            person: person.into(),
            direction,
        })
    }

    /// Removes an item once it has been returned.
    pub fn remove(&mut self, id: RecordId) -> ManagerResult<LendingItem> {
        self.items.remove(id)
    }

    pub fn items(&self) -> &[LendingItem] {
        self.items.items()
    }

    pub fn count(&self, direction: LendingDirection) -> usize {
        self.items
            .list(move |item| item.direction == direction)
            .count()
    }
}
