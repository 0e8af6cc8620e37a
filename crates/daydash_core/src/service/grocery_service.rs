//! Grocery list use-cases.

use crate::model::grocery::{GroceryDraft, GroceryItem};
use crate::model::record::RecordId;
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerResult};

pub struct GroceryList<S: KvStore> {
    items: CollectionManager<GroceryItem, S>,
}

impl<S: KvStore> GroceryList<S> {
    pub fn load(store: S) -> Self {
        Self {
            items: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<GroceryItem, S> {
        &self.items
    }

    pub fn reload(&mut self) {
        self.items.reload();
    }

    pub fn add(&mut self, name: impl Into<String>) -> ManagerResult<RecordId> {
        self.items.add(GroceryDraft { name: name.into() })
    }

    /// Flips `acquired` and returns the new value.
    pub fn toggle_acquired(&mut self, id: RecordId) -> ManagerResult<bool> {
        let mut acquired = false;
        self.items.update(id, |item| {
            item.acquired = !item.acquired;
            acquired = item.acquired;
        })?;
        Ok(acquired)
    }

    pub fn remove(&mut self, id: RecordId) -> ManagerResult<GroceryItem> {
        self.items.remove(id)
    }

    pub fn items(&self) -> &[GroceryItem] {
        self.items.items()
    }

    /// Items still to buy.
    pub fn pending_count(&self) -> usize {
        self.items.list(|item| !item.acquired).count()
    }
}
