//! Task record.
//!
//! # Invariants
//! - `title` is non-empty after trim for every task created through core.
//! - `completed` defaults to `false`, including for persisted records that
//!   omit the field.

use super::{generate_id, RecordId};
use serde::{Deserialize, Serialize};

/// Titled, completable unit of work owned by a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque id, unique within the owning group.
    pub id: RecordId,
    /// Trimmed, non-empty display title.
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Creation time in Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task with a freshly generated id.
    ///
    /// Callers are expected to pass an already trimmed title.
    pub fn new(title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: generate_id(now_ms),
            title: title.into(),
            completed: false,
            created_at: now_ms,
        }
    }

    /// Returns whether this task still needs work.
    pub fn is_remaining(&self) -> bool {
        !self.completed
    }
}
