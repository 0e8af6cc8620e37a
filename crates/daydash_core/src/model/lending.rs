//! Borrowed/lent item tracker entry.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LendingDirection {
    /// I borrowed it from `person`.
    Borrowed,
    /// I lent it to `person`.
    Lent,
}

impl LendingDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Borrowed => "borrowed",
            Self::Lent => "lent",
        }
    }
}

impl Display for LendingDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LendingDirection {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "borrowed" => Ok(Self::Borrowed),
            "lent" => Ok(Self::Lent),
            other => Err(ValidationError::UnknownChoice {
                field: "type",
                input: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingItem {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub name: String,
    pub person: String,
    #[serde(rename = "type")]
    pub direction: LendingDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendingDraft {
    pub name: String,
    pub person: String,
    pub direction: LendingDirection,
}

impl CollectionRecord for LendingItem {
    type Draft = LendingDraft;

    const STORAGE_KEY: &'static str = "blList";
    const KIND: &'static str = "lending_item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: LendingDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            name: require_text("item name", &draft.name)?,
            person: require_text("person", &draft.person)?,
            direction: draft.direction,
        })
    }
}
