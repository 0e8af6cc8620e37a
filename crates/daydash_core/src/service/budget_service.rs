//! Budget ledger use-cases and derived totals.

use crate::model::budget::{BudgetDraft, BudgetEntry, EntryKind};
use crate::model::record::RecordId;
use crate::model::validation::format_money;
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerResult};

/// Income/expense sums over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetTotals {
    pub income: f64,
    pub expense: f64,
}

impl BudgetTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    pub fn income_text(&self) -> String {
        format_money(self.income)
    }

    pub fn expense_text(&self) -> String {
        format_money(self.expense)
    }

    pub fn balance_text(&self) -> String {
        format_money(self.balance())
    }
}

pub struct BudgetLedger<S: KvStore> {
    entries: CollectionManager<BudgetEntry, S>,
}

impl<S: KvStore> BudgetLedger<S> {
    pub fn load(store: S) -> Self {
        Self {
            entries: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<BudgetEntry, S> {
        &self.entries
    }

    pub fn reload(&mut self) {
        self.entries.reload();
    }

    /// Records an entry. `amount` is raw input and must parse to a value > 0.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount: impl Into<String>,
        kind: EntryKind,
    ) -> ManagerResult<RecordId> {
        self.entries.add(BudgetDraft {
            description: description.into(),
            amount: amount.into(),
            kind,
        })
    }

    pub fn remove(&mut self, id: RecordId) -> ManagerResult<BudgetEntry> {
        self.entries.remove(id)
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        self.entries.items()
    }

    pub fn totals(&self) -> BudgetTotals {
        self.entries
            .items()
            .iter()
            .fold(BudgetTotals::default(), |mut totals, entry| {
                match entry.kind {
                    EntryKind::Income => totals.income += entry.amount,
                    EntryKind::Expense => totals.expense += entry.amount,
                }
                totals
            })
    }
}
