//! Plant care log entry.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{parse_date, require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub name: String,
    /// Serialized as `date` (`YYYY-MM-DD`).
    #[serde(rename = "date")]
    pub last_watered: NaiveDate,
}

impl Plant {
    /// Whole days between the last watering and `today`. Negative when the
    /// logged date lies in the future.
    pub fn days_since_watered(&self, today: NaiveDate) -> i64 {
        (today - self.last_watered).num_days()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantDraft {
    pub name: String,
    pub last_watered: String,
}

impl CollectionRecord for Plant {
    type Draft = PlantDraft;

    const STORAGE_KEY: &'static str = "plantLog";
    const KIND: &'static str = "plant";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: PlantDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            name: require_text("plant name", &draft.name)?,
            last_watered: parse_date("watering date", &draft.last_watered)?,
        })
    }
}
