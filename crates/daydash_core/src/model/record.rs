//! Record identity and the contract shared by every collection record.

use crate::model::validation::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier assigned to a record when it is created.
pub type RecordId = Uuid;

/// Generates a fresh record id.
///
/// Also used as the serde default so stored records written without an id
/// become addressable after load.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4()
}

/// A record owned by exactly one collection manager.
pub trait CollectionRecord: Clone + Serialize + DeserializeOwned {
    /// Raw, unvalidated input collected by the UI.
    type Draft;

    /// Store key under which the whole collection is persisted.
    const STORAGE_KEY: &'static str;

    /// Short name used in log events.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Validates a draft and builds a record with default flags.
    fn from_draft(draft: Self::Draft) -> Result<Self, ValidationError>;
}
