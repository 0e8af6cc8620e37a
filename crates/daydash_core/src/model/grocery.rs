//! Grocery list item.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub acquired: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryDraft {
    pub name: String,
}

impl CollectionRecord for GroceryItem {
    type Draft = GroceryDraft;

    const STORAGE_KEY: &'static str = "groceryList";
    const KIND: &'static str = "grocery_item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: GroceryDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            name: require_text("item name", &draft.name)?,
            acquired: false,
        })
    }
}
