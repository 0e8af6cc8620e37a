//! Task record.
//!
//! # Invariants
//! - Archived tasks stay in storage; only the default view hides them.
//! - A task counts as active when it is neither archived nor completed.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Task {
    pub fn is_active(&self) -> bool {
        !self.archived && !self.completed
    }
}

impl CollectionRecord for Task {
    type Draft = TaskDraft;

    const STORAGE_KEY: &'static str = "tasks";
    const KIND: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: TaskDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            text: require_text("task", &draft.text)?,
            completed: false,
            archived: false,
        })
    }
}
