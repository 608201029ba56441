//! Core state and persistence for the tabbed to-do app.
//! This crate owns every business invariant; UI layers only render and call.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::group::{active_groups, completed_groups, Group, GROUP_PREVIEW_TASK_LIMIT};
pub use model::task::Task;
pub use model::{generate_id, now_epoch_ms, RecordId};
pub use repo::group_repo::{
    decode_groups, encode_groups, GroupRepository, KvGroupRepository, RepoError, RepoResult,
    GROUPS_STORAGE_KEY, TASKS_STORAGE_KEY,
};
pub use service::active_groups_service::ActiveGroupsService;
pub use service::archive_service::ArchiveService;
pub use service::view_state::{EditTarget, TaskEditor, TaskFilter};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
