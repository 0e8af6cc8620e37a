//! Dashboard facade over every manager sharing one store.
//!
//! # Responsibility
//! - Construct all managers with load-or-default semantics.
//! - Derive the summary read surface from several managers.
//! - Hold the single pending prompt and apply its resolution.
//!
//! # Invariants
//! - Each manager writes only its own store key.
//! - The summary is recomputed on demand and never stored.
//! - Clear-all runs only after an explicit confirmation.

use crate::model::record::RecordId;
use crate::model::validation::format_money;
use crate::repo::kv_store::{KvStore, StoreError};
use crate::service::budget_service::BudgetLedger;
use crate::service::collection::{ManagerError, ManagerResult};
use crate::service::grocery_service::GroceryList;
use crate::service::health_service::HealthTracker;
use crate::service::lending_service::LendingTracker;
use crate::service::plant_service::PlantLog;
use crate::service::prompt::{PendingPrompt, PromptOutcome, PromptResponse};
use crate::service::settings_service::Settings;
use crate::service::subscription_service::SubscriptionList;
use crate::service::task_service::TaskList;
use crate::timer::focus_timer::FocusTimer;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug)]
pub enum DashboardError {
    Manager(ManagerError),
    Store(StoreError),
    /// `resolve_prompt` was called with nothing pending.
    NoPendingPrompt,
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manager(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NoPendingPrompt => write!(f, "no prompt is waiting for a response"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Manager(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NoPendingPrompt => None,
        }
    }
}

impl From<ManagerError> for DashboardError {
    fn from(value: ManagerError) -> Self {
        Self::Manager(value)
    }
}

impl From<StoreError> for DashboardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Read-only figures shown on the dashboard home tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSummary {
    /// Tasks neither completed nor archived.
    pub active_tasks: usize,
    /// Sum of every expense entry.
    pub money_spent: f64,
    pub water_glasses: u32,
}

impl DashboardSummary {
    /// `1 task`, `3 tasks`.
    pub fn tasks_label(&self) -> String {
        let suffix = if self.active_tasks == 1 { "" } else { "s" };
        format!("{} task{suffix}", self.active_tasks)
    }

    pub fn money_spent_label(&self) -> String {
        format!("${}", format_money(self.money_spent))
    }

    pub fn water_label(&self) -> String {
        format!("{} glasses", self.water_glasses)
    }
}

pub struct Dashboard<'s, S: KvStore + ?Sized> {
    store: &'s S,
    tasks: TaskList<&'s S>,
    budget: BudgetLedger<&'s S>,
    health: HealthTracker<&'s S>,
    grocery: GroceryList<&'s S>,
    subscriptions: SubscriptionList<&'s S>,
    plants: PlantLog<&'s S>,
    lending: LendingTracker<&'s S>,
    settings: Settings<&'s S>,
    timer: FocusTimer,
    pending: Option<PendingPrompt>,
}

impl<'s, S: KvStore + ?Sized> Dashboard<'s, S> {
    /// Loads every manager from `store` with a default 25/5 timer.
    pub fn load(store: &'s S) -> Self {
        Self::load_with_timer(store, FocusTimer::new())
    }

    pub fn load_with_timer(store: &'s S, timer: FocusTimer) -> Self {
        let dashboard = Self {
            store,
            tasks: TaskList::load(store),
            budget: BudgetLedger::load(store),
            health: HealthTracker::load(store),
            grocery: GroceryList::load(store),
            subscriptions: SubscriptionList::load(store),
            plants: PlantLog::load(store),
            lending: LendingTracker::load(store),
            settings: Settings::load(store),
            timer,
            pending: None,
        };
        info!(
            "event=dashboard_load module=dashboard status=ok tasks={} budget_entries={}",
            dashboard.tasks.collection().len(),
            dashboard.budget.entries().len()
        );
        dashboard
    }

    pub fn tasks(&self) -> &TaskList<&'s S> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskList<&'s S> {
        &mut self.tasks
    }

    pub fn budget(&self) -> &BudgetLedger<&'s S> {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut BudgetLedger<&'s S> {
        &mut self.budget
    }

    pub fn health(&self) -> &HealthTracker<&'s S> {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthTracker<&'s S> {
        &mut self.health
    }

    pub fn grocery(&self) -> &GroceryList<&'s S> {
        &self.grocery
    }

    pub fn grocery_mut(&mut self) -> &mut GroceryList<&'s S> {
        &mut self.grocery
    }

    pub fn subscriptions(&self) -> &SubscriptionList<&'s S> {
        &self.subscriptions
    }

    pub fn subscriptions_mut(&mut self) -> &mut SubscriptionList<&'s S> {
        &mut self.subscriptions
    }

    pub fn plants(&self) -> &PlantLog<&'s S> {
        &self.plants
    }

    pub fn plants_mut(&mut self) -> &mut PlantLog<&'s S> {
        &mut self.plants
    }

    pub fn lending(&self) -> &LendingTracker<&'s S> {
        &self.lending
    }

    pub fn lending_mut(&mut self) -> &mut LendingTracker<&'s S> {
        &mut self.lending
    }

    pub fn settings(&self) -> &Settings<&'s S> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings<&'s S> {
        &mut self.settings
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            active_tasks: self.tasks.active_count(),
            money_spent: self.budget.totals().expense,
            water_glasses: self.health.current().water,
        }
    }

    pub fn pending_prompt(&self) -> Option<&PendingPrompt> {
        self.pending.as_ref()
    }

    /// Opens an edit prompt pre-filled with the task's current text.
    ///
    /// Replaces any prompt already pending.
    pub fn request_task_edit(&mut self, task_id: RecordId) -> ManagerResult<&PendingPrompt> {
        let task = self
            .tasks
            .collection()
            .get(task_id)
            .ok_or(ManagerError::NotFound(task_id))?;
        let prompt = PendingPrompt::EditTask {
            task_id,
            current_text: task.text.clone(),
        };
        Ok(&*self.pending.insert(prompt))
    }

    /// Opens the clear-all confirmation. Replaces any prompt already pending.
    pub fn request_clear_all(&mut self) -> &PendingPrompt {
        &*self.pending.insert(PendingPrompt::ConfirmClearAll)
    }

    /// Applies the user's answer to the pending prompt and closes it.
    ///
    /// The prompt is closed even when applying the answer fails.
    pub fn resolve_prompt(&mut self, response: PromptResponse) -> DashboardResult<PromptOutcome> {
        let prompt = self.pending.take().ok_or(DashboardError::NoPendingPrompt)?;

        let outcome = match (prompt, response) {
            (PendingPrompt::EditTask { task_id, .. }, PromptResponse::Text(text)) => {
                if self.tasks.edit_text(task_id, Some(text.as_str()))? {
                    PromptOutcome::TaskEdited(task_id)
                } else {
                    PromptOutcome::Dismissed
                }
            }
            (PendingPrompt::ConfirmClearAll, PromptResponse::Confirm) => {
                self.clear_all_confirmed()?;
                PromptOutcome::DataCleared
            }
            _ => PromptOutcome::Dismissed,
        };
        Ok(outcome)
    }

    /// Wipes the store and re-initializes every manager to its default.
    fn clear_all_confirmed(&mut self) -> DashboardResult<()> {
        self.store.clear()?;
        self.tasks.reload();
        self.budget.reload();
        self.health.reload();
        self.grocery.reload();
        self.subscriptions.reload();
        self.plants.reload();
        self.lending.reload();
        self.settings.reload();
        self.timer.reset();
        info!("event=dashboard_clear_all module=dashboard status=ok");
        Ok(())
    }
}
