//! Recurring subscription.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{parse_amount, require_text, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub name: String,
    /// Charged once per billing month.
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionDraft {
    pub name: String,
    pub amount: String,
}

impl CollectionRecord for Subscription {
    type Draft = SubscriptionDraft;

    const STORAGE_KEY: &'static str = "subscriptions";
    const KIND: &'static str = "subscription";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: SubscriptionDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            name: require_text("subscription name", &draft.name)?,
            amount: parse_amount("amount", &draft.amount)?,
        })
    }
}
