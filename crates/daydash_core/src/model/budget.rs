//! Budget ledger entry.

use crate::model::record::{new_record_id, CollectionRecord, RecordId};
use crate::model::validation::{parse_amount, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Notice shown when a budget entry is rejected, whichever field failed.
pub const INVALID_ENTRY_NOTICE: &str = "Please enter a valid description and amount.";

/// Direction of a budget entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Sign shown before the amount in list rows.
    pub fn sign(self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ValidationError::UnknownChoice {
                field: "type",
                input: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub description: String,
    pub amount: f64,
    /// Serialized as `type` to match the stored collection shape.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Raw budget form input; `amount` is parsed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDraft {
    pub description: String,
    pub amount: String,
    pub kind: EntryKind,
}

impl CollectionRecord for BudgetEntry {
    type Draft = BudgetDraft;

    const STORAGE_KEY: &'static str = "budgetEntries";
    const KIND: &'static str = "budget_entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(draft: BudgetDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_record_id(),
            description: require_text("description", &draft.description)?,
            amount: parse_amount("amount", &draft.amount)?,
            kind: draft.kind,
        })
    }
}
