//! Subscription tracker use-cases.

use crate::model::record::RecordId;
use crate::model::subscription::{Subscription, SubscriptionDraft};
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerResult};

pub struct SubscriptionList<S: KvStore> {
    subscriptions: CollectionManager<Subscription, S>,
}

impl<S: KvStore> SubscriptionList<S> {
    pub fn load(store: S) -> Self {
        Self {
            subscriptions: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<Subscription, S> {
        &self.subscriptions
    }

    pub fn reload(&mut self) {
        self.subscriptions.reload();
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        amount: impl Into<String>,
    ) -> ManagerResult<RecordId> {
        self.subscriptions.add(SubscriptionDraft {
            name: name.into(),
            amount: amount.into(),
        })
    }

    pub fn remove(&mut self, id: RecordId) -> ManagerResult<Subscription> {
        self.subscriptions.remove(id)
    }

    pub fn items(&self) -> &[Subscription] {
        self.subscriptions.items()
    }

    pub fn monthly_total(&self) -> f64 {
        self.subscriptions
            .items()
            .iter()
            .map(|subscription| subscription.amount)
            .sum()
    }
}
