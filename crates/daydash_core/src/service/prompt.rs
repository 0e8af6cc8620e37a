//! Request/response prompts for edits and destructive confirmations.
//!
//! A prompt is opened by a dashboard request, shown by the UI however it
//! likes, and later resolved with a `PromptResponse`. Nothing blocks.

use crate::model::record::RecordId;

pub const CLEAR_ALL_QUESTION: &str =
    "Are you sure you want to clear all data? This action cannot be undone.";

/// Prompt waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPrompt {
    /// Replacement text for a task; `current_text` pre-fills the input.
    EditTask {
        task_id: RecordId,
        current_text: String,
    },
    /// Confirmation before wiping every stored key.
    ConfirmClearAll,
}

impl PendingPrompt {
    /// Text shown alongside the input or confirm control.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EditTask { .. } => "Edit task:",
            Self::ConfirmClearAll => CLEAR_ALL_QUESTION,
        }
    }
}

/// The user's answer to a pending prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Text(String),
    Confirm,
    Cancel,
}

/// What resolving a prompt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    TaskEdited(RecordId),
    DataCleared,
    /// Cancelled, blank, or a response of the wrong shape. Nothing changed.
    Dismissed,
}
