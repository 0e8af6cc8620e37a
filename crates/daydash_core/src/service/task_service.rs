//! Task list use-cases.
//!
//! # Invariants
//! - Archiving is a soft remove: the task stays in storage.
//! - Blank or cancelled edits leave the task untouched.

use crate::model::record::RecordId;
use crate::model::task::{Task, TaskDraft};
use crate::repo::kv_store::KvStore;
use crate::service::collection::{CollectionManager, ManagerError, ManagerResult};

/// Task collection with completion and archive semantics.
pub struct TaskList<S: KvStore> {
    tasks: CollectionManager<Task, S>,
}

impl<S: KvStore> TaskList<S> {
    pub fn load(store: S) -> Self {
        Self {
            tasks: CollectionManager::load(store),
        }
    }

    pub fn collection(&self) -> &CollectionManager<Task, S> {
        &self.tasks
    }

    pub fn reload(&mut self) {
        self.tasks.reload();
    }

    /// Appends a new open task.
    pub fn add(&mut self, text: impl Into<String>) -> ManagerResult<RecordId> {
        self.tasks.add(TaskDraft::new(text))
    }

    /// Flips `completed` and returns the new value.
    pub fn toggle_completed(&mut self, id: RecordId) -> ManagerResult<bool> {
        let mut completed = false;
        self.tasks.update(id, |task| {
            task.completed = !task.completed;
            completed = task.completed;
        })?;
        Ok(completed)
    }

    /// Replaces task text.
    ///
    /// `None` (cancelled) and blank replacements are no-ops and return
    /// `Ok(false)`; the store is not touched in that case.
    pub fn edit_text(&mut self, id: RecordId, text: Option<&str>) -> ManagerResult<bool> {
        let Some(replacement) = text.map(str::trim).filter(|value| !value.is_empty()) else {
            // Unknown ids are still reported on a no-op edit.
            self.tasks.get(id).ok_or(ManagerError::NotFound(id))?;
            return Ok(false);
        };
        let replacement = replacement.to_string();
        self.tasks.update(id, |task| task.text = replacement)?;
        Ok(true)
    }

    /// Hides the task from the default view without deleting it.
    pub fn archive(&mut self, id: RecordId) -> ManagerResult<()> {
        self.tasks.update(id, |task| task.archived = true)
    }

    /// Default view: every task that is not archived.
    pub fn visible(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.list(|task| !task.archived)
    }

    /// Number of tasks neither archived nor completed.
    pub fn active_count(&self) -> usize {
        self.tasks.list(Task::is_active).count()
    }
}
