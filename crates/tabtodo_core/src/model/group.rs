//! Group record and classification.
//!
//! # Responsibility
//! - Hold a named, newest-first list of tasks.
//! - Classify a group as active or completed from its contents.
//!
//! # Invariants
//! - A group with zero tasks is active, never completed.
//! - A group is completed iff it has tasks and every task is completed.

use super::task::Task;
use super::{generate_id, RecordId};
use serde::{Deserialize, Serialize};

/// Number of tasks a group card shows before collapsing the rest.
pub const GROUP_PREVIEW_TASK_LIMIT: usize = 6;

/// Named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Opaque id, unique within the store.
    pub id: RecordId,
    pub name: String,
    /// Creation time in Unix epoch milliseconds.
    pub created_at: i64,
    /// Tasks in newest-first insertion order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Group {
    /// Creates an empty group with a freshly generated id.
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: generate_id(now_ms),
            name: name.into(),
            created_at: now_ms,
            tasks: Vec::new(),
        }
    }

    /// Active: no tasks yet, or at least one task still open.
    pub fn is_active(&self) -> bool {
        self.tasks.is_empty() || self.tasks.iter().any(Task::is_remaining)
    }

    /// Completed: non-empty and every task done.
    pub fn is_completed(&self) -> bool {
        !self.is_active()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of tasks not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_remaining()).count()
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Leading tasks shown on a group card.
    pub fn preview_tasks(&self) -> &[Task] {
        let end = self.tasks.len().min(GROUP_PREVIEW_TASK_LIMIT);
        &self.tasks[..end]
    }

    /// Tasks collapsed behind the card preview.
    pub fn hidden_task_count(&self) -> usize {
        self.tasks.len().saturating_sub(GROUP_PREVIEW_TASK_LIMIT)
    }
}

/// Groups shown on the active screen, in stored order.
pub fn active_groups(groups: &[Group]) -> Vec<&Group> {
    groups.iter().filter(|group| group.is_active()).collect()
}

/// Groups shown on the archive screen, in stored order.
pub fn completed_groups(groups: &[Group]) -> Vec<&Group> {
    groups.iter().filter(|group| group.is_completed()).collect()
}

#[cfg(test)]
mod tests {
    use super::{Group, GROUP_PREVIEW_TASK_LIMIT};
    use crate::model::task::Task;

    fn task(title: &str, completed: bool) -> Task {
        let mut task = Task::new(title, 1);
        task.completed = completed;
        task
    }

    #[test]
    fn empty_group_is_active() {
        let group = Group::new("Work", 1);
        assert!(group.is_active());
        assert!(!group.is_completed());
    }

    #[test]
    fn group_with_all_tasks_done_is_completed() {
        let mut group = Group::new("Work", 1);
        group.tasks = vec![task("a", true), task("b", true)];
        assert!(group.is_completed());
        assert_eq!(group.remaining_count(), 0);
    }

    #[test]
    fn one_open_task_keeps_group_active() {
        let mut group = Group::new("Work", 1);
        group.tasks = vec![task("a", true), task("b", false)];
        assert!(group.is_active());
        assert_eq!(group.remaining_count(), 1);
    }

    #[test]
    fn preview_caps_visible_tasks() {
        let mut group = Group::new("Errands", 1);
        group.tasks = (0..9).map(|i| task(&format!("t{i}"), false)).collect();

        assert_eq!(group.preview_tasks().len(), GROUP_PREVIEW_TASK_LIMIT);
        assert_eq!(group.preview_tasks()[0].title, "t0");
        assert_eq!(group.hidden_task_count(), 3);
    }

    #[test]
    fn preview_of_short_group_shows_everything() {
        let mut group = Group::new("Errands", 1);
        group.tasks = vec![task("only", false)];
        assert_eq!(group.preview_tasks().len(), 1);
        assert_eq!(group.hidden_task_count(), 0);
    }
}
