//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the active and archive screens as stable, use-case-level calls.
//! - Keep storage location and error handling out of the Dart side.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls touching storage run one at a time; a mutation is a full
//!   load, apply, save cycle and never interleaves with another.
//! - Blank input and unknown ids return `ok=false` without writing.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tabtodo_core::db::open_db;
use tabtodo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActiveGroupsService, ArchiveService, Group, KvGroupRepository, RecordId, SqliteKvStore, Task,
    TaskFilter,
};

const DB_FILE_NAME: &str = "tabtodo.sqlite3";
const DB_PATH_ENV: &str = "TABTODO_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORAGE_LOCK: Mutex<()> = Mutex::new(());

type SqliteGroupRepository<'conn> = KvGroupRepository<SqliteKvStore<'conn>>;

/// Minimal health-check API for FRB smoke integration.
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
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row rendered inside a group card or task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub title: String,
    pub completed: bool,
    pub created_at_ms: i64,
}

/// Group card for the active or archive screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    pub group_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub task_count: u32,
    /// Tasks not yet completed.
    pub remaining_count: u32,
    /// Leading tasks shown on the card (newest first).
    pub preview_tasks: Vec<TaskItem>,
    /// Tasks collapsed behind the preview.
    pub hidden_task_count: u32,
}

/// List response envelope for screen loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListResponse {
    pub ok: bool,
    pub items: Vec<GroupItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Filtered task list for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub items: Vec<TaskItem>,
    /// Effective filter label (`all|active|completed`).
    pub applied_filter: String,
    pub message: String,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the collection changed.
    pub ok: bool,
    /// Created record id for add calls, target id otherwise.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn changed(message: impl Into<String>, id: RecordId) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Loads the active screen: groups with no tasks or open tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn groups_active() -> GroupListResponse {
    let loaded = with_active_service(|service| {
        service
            .active_groups()
            .into_iter()
            .map(to_group_item)
            .collect::<Vec<_>>()
    });
    to_list_response(loaded, "No active groups yet.")
}

/// Loads the archive screen. Call on mount and on every focus event.
#[flutter_rust_bridge::frb(sync)]
pub fn groups_archive() -> GroupListResponse {
    let loaded = with_repository(|repo| {
        ArchiveService::mount(repo)
            .completed_groups()
            .into_iter()
            .map(to_group_item)
            .collect::<Vec<_>>()
    });
    to_list_response(loaded, "No completed groups yet.")
}

/// Lists one group's tasks through `filter` (`all|active|completed`).
///
/// Unknown filter labels fall back to `all`.
#[flutter_rust_bridge::frb(sync)]
pub fn group_tasks(group_id: String, filter: String) -> TaskListResponse {
    let filter = TaskFilter::parse(&filter).unwrap_or_default();
    let loaded = with_active_service(|service| {
        service.set_filter(filter);
        service.find_group(&group_id).map(|_| {
            service
                .visible_tasks(&group_id)
                .into_iter()
                .map(to_task_item)
                .collect::<Vec<_>>()
        })
    });

    let (ok, items, message) = match loaded {
        Ok(Some(items)) => {
            let message = format!("{} task(s).", items.len());
            (true, items, message)
        }
        Ok(None) => (false, Vec::new(), "Group not found.".to_string()),
        Err(err) => (false, Vec::new(), format!("group_tasks failed: {err}")),
    };
    TaskListResponse {
        ok,
        items,
        applied_filter: filter.label().to_string(),
        message,
    }
}

/// Creates a group. Blank names are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn group_add(name: String) -> ActionResponse {
    run_action("group_add", |service| {
        service
            .add_group(&name)
            .map(|id| ActionResponse::changed("Group created.", id))
            .unwrap_or_else(|| ActionResponse::unchanged("Group name is empty."))
    })
}

/// Deletes a group and all its tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn group_delete(group_id: String) -> ActionResponse {
    run_action("group_delete", |service| {
        if service.delete_group(&group_id) {
            ActionResponse::changed("Group deleted.", group_id)
        } else {
            ActionResponse::unchanged("Group not found.")
        }
    })
}

/// Adds a task to a group. Blank titles and unknown groups are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(group_id: String, title: String) -> ActionResponse {
    run_action("task_add", |service| {
        service
            .add_task(&group_id, &title)
            .map(|id| ActionResponse::changed("Task created.", id))
            .unwrap_or_else(|| ActionResponse::unchanged("Task title is empty or group missing."))
    })
}

/// Flips a task between open and completed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(group_id: String, task_id: String) -> ActionResponse {
    run_action("task_toggle", |service| {
        if service.toggle_task(&group_id, &task_id) {
            ActionResponse::changed("Task toggled.", task_id)
        } else {
            ActionResponse::unchanged("Task not found.")
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(group_id: String, task_id: String) -> ActionResponse {
    run_action("task_delete", |service| {
        if service.delete_task(&group_id, &task_id) {
            ActionResponse::changed("Task deleted.", task_id)
        } else {
            ActionResponse::unchanged("Task not found.")
        }
    })
}

/// Saves an inline edit. Blank titles are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(group_id: String, task_id: String, title: String) -> ActionResponse {
    run_action("task_edit", |service| {
        if service.begin_edit(&group_id, &task_id) {
            service.set_edit_text(title);
            if service.save_edit() {
                return ActionResponse::changed("Task updated.", task_id);
            }
        }
        ActionResponse::unchanged("Task title is empty or task missing.")
    })
}

fn run_action(
    action: &'static str,
    f: impl FnOnce(&mut ActiveGroupsService<SqliteGroupRepository<'_>>) -> ActionResponse,
) -> ActionResponse {
    match with_active_service(f) {
        Ok(response) => response,
        Err(err) => {
            warn!("event={action} module=ffi status=error error={err}");
            ActionResponse::unchanged(format!("{action} failed: {err}"))
        }
    }
}

fn with_active_service<T>(
    f: impl FnOnce(&mut ActiveGroupsService<SqliteGroupRepository<'_>>) -> T,
) -> Result<T, String> {
    with_repository(|repo| {
        let mut service = ActiveGroupsService::mount(repo);
        f(&mut service)
    })
}

fn with_repository<T>(f: impl FnOnce(SqliteGroupRepository<'_>) -> T) -> Result<T, String> {
    let _guard = STORAGE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("storage open failed: {err}"))?;
    Ok(f(KvGroupRepository::new(SqliteKvStore::new(&conn))))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn to_list_response(
    loaded: Result<Vec<GroupItem>, String>,
    empty_message: &str,
) -> GroupListResponse {
    match loaded {
        Ok(items) => {
            let message = if items.is_empty() {
                empty_message.to_string()
            } else {
                format!("{} group(s).", items.len())
            };
            GroupListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => GroupListResponse {
            ok: false,
            items: Vec::new(),
            message: err,
        },
    }
}

fn to_group_item(group: &Group) -> GroupItem {
    GroupItem {
        group_id: group.id.clone(),
        name: group.name.clone(),
        created_at_ms: group.created_at,
        task_count: count_u32(group.task_count()),
        remaining_count: count_u32(group.remaining_count()),
        preview_tasks: group.preview_tasks().iter().map(to_task_item).collect(),
        hidden_task_count: count_u32(group.hidden_task_count()),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.clone(),
        title: task.title.clone(),
        completed: task.completed,
        created_at_ms: task.created_at,
    }
}

fn count_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, group_add, group_delete, group_tasks, groups_active, groups_archive,
        init_logging, ping, task_add, task_delete, task_edit, task_toggle,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn blank_group_name_is_ignored() {
        let response = group_add("   ".to_string());
        assert!(!response.ok);
        assert!(response.id.is_none());
    }

    #[test]
    fn group_lifecycle_moves_between_screens() {
        let name = unique_token("lifecycle");
        let group_id = group_add(name.clone()).id.expect("group id");

        let task = task_add(group_id.clone(), "Buy milk".to_string());
        assert!(task.ok, "{}", task.message);
        let task_id = task.id.expect("task id");

        let active = groups_active();
        let card = active
            .items
            .iter()
            .find(|item| item.group_id == group_id)
            .expect("new group is active");
        assert_eq!(card.name, name);
        assert_eq!(card.remaining_count, 1);
        assert!(!groups_archive().items.iter().any(|item| item.group_id == group_id));

        assert!(task_toggle(group_id.clone(), task_id).ok);
        assert!(!groups_active().items.iter().any(|item| item.group_id == group_id));
        assert!(groups_archive().items.iter().any(|item| item.group_id == group_id));

        assert!(group_delete(group_id.clone()).ok);
        assert!(!groups_archive().items.iter().any(|item| item.group_id == group_id));
        assert!(!group_delete(group_id).ok);
    }

    #[test]
    fn task_edit_and_filtering() {
        let group_id = group_add(unique_token("edit")).id.expect("group id");
        let first = task_add(group_id.clone(), "Draft".to_string()).id.expect("task id");
        let second = task_add(group_id.clone(), "Open".to_string()).id.expect("task id");

        assert!(!task_edit(group_id.clone(), first.clone(), "  ".to_string()).ok);
        assert!(task_edit(group_id.clone(), first.clone(), " Final ".to_string()).ok);
        assert!(task_toggle(group_id.clone(), first.clone()).ok);

        let completed = group_tasks(group_id.clone(), "completed".to_string());
        assert_eq!(completed.applied_filter, "completed");
        assert_eq!(completed.items.len(), 1);
        assert_eq!(completed.items[0].title, "Final");

        let fallback = group_tasks(group_id.clone(), "bogus".to_string());
        assert_eq!(fallback.applied_filter, "all");
        assert_eq!(fallback.items.len(), 2);
        assert_eq!(fallback.items[0].task_id, second);

        assert!(task_delete(group_id.clone(), second).ok);
        let active = group_tasks(group_id.clone(), "active".to_string());
        assert!(active.ok);
        assert!(active.items.is_empty());

        assert!(group_delete(group_id).ok);
    }

    #[test]
    fn unknown_group_reports_not_found() {
        let response = group_tasks(unique_token("missing"), "all".to_string());
        assert!(!response.ok);
        assert!(!task_add(unique_token("missing"), "title".to_string()).ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
