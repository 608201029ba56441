//! Per-screen view state that is never persisted.

use crate::model::task::Task;
use crate::model::RecordId;

/// Task visibility filter for a list of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    /// Only tasks not yet completed.
    Active,
    /// Only completed tasks.
    Completed,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Returns the matching subsequence, preserving order.
    pub fn apply(self, tasks: &[Task]) -> Vec<&Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Parses a host-supplied label (`all|active|completed`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Target of an inline task edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub group_id: RecordId,
    pub task_id: RecordId,
}

/// Tracks at most one task in inline-edit mode.
///
/// # Invariants
/// - `text` is empty whenever no task is being edited.
/// - Beginning a new edit replaces any prior target and its draft text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditor {
    target: Option<EditTarget>,
    text: String,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `task`, seeding the draft with its current title.
    pub fn begin(&mut self, group_id: impl Into<RecordId>, task: &Task) {
        self.target = Some(EditTarget {
            group_id: group_id.into(),
            task_id: task.id.clone(),
        });
        self.text = task.title.clone();
    }

    /// Replaces the draft text. Ignored when no edit is in progress.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.target.is_some() {
            self.text = text.into();
        }
    }

    pub fn target(&self) -> Option<&EditTarget> {
        self.target.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `group_id`/`task_id` is the current edit target.
    ///
    /// Task ids are only unique within a group, so both ids must match.
    pub fn is_editing(&self, group_id: &str, task_id: &str) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.group_id == group_id && target.task_id == task_id)
    }

    /// Clears the target and draft without applying anything.
    pub fn cancel(&mut self) {
        self.target = None;
        self.text.clear();
    }

    /// Takes the target and draft for saving, clearing the editor.
    pub(crate) fn take(&mut self) -> Option<(EditTarget, String)> {
        let target = self.target.take()?;
        Some((target, std::mem::take(&mut self.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskEditor, TaskFilter};
    use crate::model::task::Task;

    fn tasks() -> Vec<Task> {
        let open = Task::new("open", 1);
        let mut done = Task::new("done", 2);
        done.completed = true;
        vec![done, open]
    }

    #[test]
    fn default_filter_shows_everything() {
        let tasks = tasks();
        assert_eq!(TaskFilter::default(), TaskFilter::All);
        assert_eq!(TaskFilter::All.apply(&tasks).len(), 2);
    }

    #[test]
    fn active_and_completed_filters_split_tasks() {
        let tasks = tasks();
        let active = TaskFilter::Active.apply(&tasks);
        let completed = TaskFilter::Completed.apply(&tasks);

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "open");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "done");
    }

    #[test]
    fn parse_accepts_known_labels() {
        assert_eq!(TaskFilter::parse(" Active "), Some(TaskFilter::Active));
        assert_eq!(TaskFilter::parse("COMPLETED"), Some(TaskFilter::Completed));
        assert_eq!(TaskFilter::parse("archived"), None);
        assert_eq!(TaskFilter::parse("done"), None);
    }

    #[test]
    fn begin_replaces_previous_target() {
        let tasks = tasks();
        let mut editor = TaskEditor::new();

        editor.begin("g1", &tasks[0]);
        editor.set_text("draft");
        editor.begin("g1", &tasks[1]);

        assert!(editor.is_editing("g1", &tasks[1].id));
        assert!(!editor.is_editing("g1", &tasks[0].id));
        assert!(!editor.is_editing("g2", &tasks[1].id));
        assert_eq!(editor.text(), "open");
    }

    #[test]
    fn cancel_clears_target_and_text() {
        let tasks = tasks();
        let mut editor = TaskEditor::new();
        editor.begin("g1", &tasks[0]);
        editor.cancel();

        assert!(editor.target().is_none());
        assert_eq!(editor.text(), "");
        editor.set_text("ignored");
        assert_eq!(editor.text(), "");
    }
}
