//! Core domain logic for the daydash personal dashboard.
//! This crate is the single source of truth for record and timer invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timer;

pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::budget::{BudgetEntry, EntryKind};
pub use model::grocery::GroceryItem;
pub use model::health::HealthRecord;
pub use model::lending::{LendingDirection, LendingItem};
pub use model::plant::Plant;
pub use model::record::{CollectionRecord, RecordId};
pub use model::subscription::Subscription;
pub use model::task::Task;
pub use model::validation::ValidationError;
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use service::collection::{CollectionManager, ManagerError, ManagerResult};
pub use service::dashboard::{Dashboard, DashboardError, DashboardSummary};
pub use service::prompt::{PendingPrompt, PromptOutcome, PromptResponse};
pub use timer::focus_timer::{FocusTimer, TimerEvent, TimerPhase, TimerState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
