//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level dashboard functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens the store, runs one use-case, and releases it.
//! - Calls are serialized so read-modify-write never interleaves.

use daydash_core::db::open_db;
use daydash_core::model::budget::INVALID_ENTRY_NOTICE;
use daydash_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Dashboard, EntryKind, ManagerError, PromptOutcome, PromptResponse, RecordId, SqliteKvStore,
    Task,
};
use log::{info, warn};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const DB_FILE_NAME: &str = "daydash.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static DB_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the SQLite file used by every later call.
///
/// # FFI contract
/// - Must be called before the first data call to take effect.
/// - Returns empty string on success and error message when a path is
///   already in use or `db_path` is blank.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path must not be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        info!("event=ffi_configure_db module=ffi status=ok");
        String::new()
    } else {
        warn!("event=ffi_configure_db module=ffi status=rejected error_code=path_locked");
        format!("store already open at {}", active.display())
    }
}

/// Dashboard home tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResponse {
    pub ok: bool,
    pub tasks_label: String,
    pub money_spent_label: String,
    pub water_label: String,
    pub message: String,
}

/// Task row for the to-do list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable record ID in string form.
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Non-archived tasks in insertion order.
    pub items: Vec<TaskItem>,
    pub message: String,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Record the action created or touched.
    pub record_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, record_id: Option<RecordId>) -> Self {
        Self {
            ok: true,
            record_id: record_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Reads the derived summary tiles.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary() -> SummaryResponse {
    match with_dashboard(|dashboard| Ok(dashboard.summary())) {
        Ok(summary) => SummaryResponse {
            ok: true,
            tasks_label: summary.tasks_label(),
            money_spent_label: summary.money_spent_label(),
            water_label: summary.water_label(),
            message: String::new(),
        },
        Err(err) => SummaryResponse {
            ok: false,
            tasks_label: String::new(),
            money_spent_label: String::new(),
            water_label: String::new(),
            message: format!("dashboard_summary failed: {err}"),
        },
    }
}

/// Adds a task. Blank text is rejected with the UI notice as message.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> EntryActionResponse {
    match with_dashboard(|dashboard| dashboard.tasks_mut().add(text).map_err(notice_or_error)) {
        Ok(id) => EntryActionResponse::success("Task added.", Some(id)),
        Err(err) => EntryActionResponse::failure(err),
    }
}

/// Lists non-archived tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    match with_dashboard(|dashboard| {
        Ok(dashboard
            .tasks()
            .visible()
            .map(to_task_item)
            .collect::<Vec<_>>())
    }) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No items yet.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Flips a task between open and completed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> EntryActionResponse {
    let result = parse_record_id(&task_id).and_then(|id| {
        with_dashboard(|dashboard| {
            let completed = dashboard
                .tasks_mut()
                .toggle_completed(id)
                .map_err(notice_or_error)?;
            Ok((id, completed))
        })
    });
    match result {
        Ok((id, true)) => EntryActionResponse::success("Task completed.", Some(id)),
        Ok((id, false)) => EntryActionResponse::success("Task reopened.", Some(id)),
        Err(err) => EntryActionResponse::failure(err),
    }
}

/// Replaces task text through the edit prompt flow.
///
/// Blank text leaves the task unchanged and still reports `ok`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(task_id: String, text: String) -> EntryActionResponse {
    let result = parse_record_id(&task_id).and_then(|id| {
        with_dashboard(|dashboard| {
            dashboard.request_task_edit(id).map_err(notice_or_error)?;
            dashboard
                .resolve_prompt(PromptResponse::Text(text))
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(PromptOutcome::TaskEdited(id)) => EntryActionResponse::success("Task updated.", Some(id)),
        Ok(_) => EntryActionResponse::success("Task unchanged.", None),
        Err(err) => EntryActionResponse::failure(err),
    }
}

/// Records a budget entry.
///
/// Input semantics:
/// - `amount`: raw text; must parse to a number greater than zero.
/// - `kind`: `income|expense` (case-insensitive).
#[flutter_rust_bridge::frb(sync)]
pub fn budget_add(description: String, amount: String, kind: String) -> EntryActionResponse {
    let Ok(kind) = kind.parse::<EntryKind>() else {
        return EntryActionResponse::failure(INVALID_ENTRY_NOTICE);
    };
    let result = with_dashboard(|dashboard| {
        dashboard
            .budget_mut()
            .add(description, amount, kind)
            .map_err(|err| match err.validation() {
                Some(_) => INVALID_ENTRY_NOTICE.to_string(),
                None => err.to_string(),
            })
    });
    match result {
        Ok(id) => EntryActionResponse::success("Entry added.", Some(id)),
        Err(err) => EntryActionResponse::failure(err),
    }
}

/// Saves health numbers; unparsable inputs are stored as zero.
#[flutter_rust_bridge::frb(sync)]
pub fn health_save(steps: String, water: String, sleep: String) -> EntryActionResponse {
    match with_dashboard(|dashboard| {
        dashboard
            .health_mut()
            .save_from_input(&steps, &water, &sleep)
            .map_err(|err| err.to_string())
    }) {
        Ok(_) => EntryActionResponse::success("Health data saved!", None),
        Err(err) => EntryActionResponse::failure(err),
    }
}

/// Wipes every stored key when `confirmed` is true.
///
/// `confirmed = false` answers the confirmation with cancel and keeps data.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_all_data(confirmed: bool) -> EntryActionResponse {
    let response = if confirmed {
        PromptResponse::Confirm
    } else {
        PromptResponse::Cancel
    };
    match with_dashboard(|dashboard| {
        dashboard.request_clear_all();
        dashboard
            .resolve_prompt(response)
            .map_err(|err| err.to_string())
    }) {
        Ok(PromptOutcome::DataCleared) => EntryActionResponse::success("All data cleared.", None),
        Ok(_) => EntryActionResponse::success("Nothing was deleted.", None),
        Err(err) => EntryActionResponse::failure(err),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYDASH_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_store_db() -> Result<Connection, String> {
    let db_path = resolve_db_path();
    open_db(&db_path).map_err(|err| format!("store open failed: {err}"))
}

fn with_dashboard<T>(
    f: impl FnOnce(&mut Dashboard<'_, SqliteKvStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = DB_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_store_db()?;
    let store = SqliteKvStore::new(&conn);
    let mut dashboard = Dashboard::load(&store);
    f(&mut dashboard)
}

fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid record id: {raw}"))
}

fn notice_or_error(err: ManagerError) -> String {
    match err.validation() {
        Some(validation) => validation.notice(),
        None => err.to_string(),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        budget_add, clear_all_data, configure_db_path, core_version, dashboard_summary,
        init_logging, ping, task_add, task_edit, task_list, task_toggle,
    };
    use daydash_core::model::budget::INVALID_ENTRY_NOTICE;
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static STORE_DIR: OnceLock<TempDir> = OnceLock::new();

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_db_path_rejects_blank() {
        assert!(!configure_db_path("  ".to_string()).is_empty());
    }

    #[test]
    fn task_add_then_list_contains_it() {
        use_test_store();
        let token = unique_token("task");
        let created = task_add(token.clone());
        assert!(created.ok, "{}", created.message);
        let id = created.record_id.expect("created task should return id");

        let listed = task_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == id && item.text == token && !item.completed));
    }

    #[test]
    fn task_add_rejects_blank_text_with_notice() {
        use_test_store();
        let response = task_add("   ".to_string());
        assert!(!response.ok);
        assert_eq!(response.message, "Please enter a task.");
    }

    #[test]
    fn task_toggle_and_edit_round_trip() {
        use_test_store();
        let created = task_add(unique_token("toggle"));
        let id = created.record_id.expect("created task should return id");

        let toggled = task_toggle(id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.message, "Task completed.");

        let renamed = unique_token("renamed");
        let edited = task_edit(id.clone(), renamed.clone());
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.record_id.as_deref(), Some(id.as_str()));

        let unchanged = task_edit(id.clone(), "  ".to_string());
        assert!(unchanged.ok);
        assert_eq!(unchanged.message, "Task unchanged.");

        let listed = task_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("edited task should be listed");
        assert_eq!(item.text, renamed);
        assert!(item.completed);
    }

    #[test]
    fn task_toggle_rejects_malformed_id() {
        use_test_store();
        let response = task_toggle("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid record id"));
    }

    #[test]
    fn budget_add_uses_single_notice_for_bad_input() {
        use_test_store();
        let response = budget_add("Coffee".to_string(), "-3".to_string(), "expense".to_string());
        assert!(!response.ok);
        assert_eq!(response.message, INVALID_ENTRY_NOTICE);

        let response = budget_add("Coffee".to_string(), "3".to_string(), "gift".to_string());
        assert_eq!(response.message, INVALID_ENTRY_NOTICE);
    }

    #[test]
    fn summary_reports_labels() {
        use_test_store();
        let added = budget_add(unique_token("lunch"), "12.5".to_string(), "Expense".to_string());
        assert!(added.ok, "{}", added.message);

        let summary = dashboard_summary();
        assert!(summary.ok, "{}", summary.message);
        assert!(summary.tasks_label.ends_with("task") || summary.tasks_label.ends_with("tasks"));
        assert!(summary.money_spent_label.starts_with('$'));
        assert!(summary.water_label.ends_with("glasses"));
    }

    #[test]
    fn clear_all_without_confirmation_keeps_data() {
        use_test_store();
        let created = task_add(unique_token("keep"));
        let id = created.record_id.expect("created task should return id");

        let response = clear_all_data(false);
        assert!(response.ok);
        assert_eq!(response.message, "Nothing was deleted.");
        assert!(task_list().items.iter().any(|item| item.id == id));
    }

    #[test]
    fn data_calls_use_the_pinned_store() {
        let path = use_test_store();
        let created = task_add(unique_token("pinned"));
        assert!(created.ok, "{}", created.message);

        assert!(path.is_file());
        let other = STORE_DIR
            .get()
            .expect("store dir is initialized")
            .path()
            .join("other.sqlite3");
        assert!(!configure_db_path(other.to_string_lossy().into_owned()).is_empty());
        assert!(!other.exists());
    }

    /// Pins every data call in this test binary to a throwaway store.
    fn use_test_store() -> PathBuf {
        let dir = STORE_DIR.get_or_init(|| tempfile::tempdir().expect("create store dir"));
        let path = dir.path().join("daydash.sqlite3");
        let error = configure_db_path(path.to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
        path
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
