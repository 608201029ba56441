//! Active groups screen.
//!
//! # Responsibility
//! - Own the mutable in-memory group collection for the active screen.
//! - Persist the full snapshot after every change.
//! - Track the task filter and the single inline-edit target.
//!
//! # Invariants
//! - Mount never fails: unreadable storage yields an empty collection.
//! - A failed save does not roll back the in-memory change.
//! - No-op mutations (blank input, unknown id) do not write.

use super::load_or_empty;
use super::ops;
use super::view_state::{TaskEditor, TaskFilter};
use crate::model::group::{active_groups, Group};
use crate::model::task::Task;
use crate::model::{now_epoch_ms, RecordId};
use crate::repo::group_repo::GroupRepository;
use log::{info, warn};

const SCREEN: &str = "active";

/// Mutable view over the persisted group collection.
pub struct ActiveGroupsService<R: GroupRepository> {
    repo: R,
    groups: Vec<Group>,
    filter: TaskFilter,
    editor: TaskEditor,
    clock: fn() -> i64,
}

impl<R: GroupRepository> ActiveGroupsService<R> {
    /// Mounts the screen, loading the persisted collection.
    pub fn mount(repo: R) -> Self {
        Self::mount_with_clock(repo, now_epoch_ms)
    }

    /// Mounts the screen with an explicit epoch-milliseconds clock.
    pub fn mount_with_clock(repo: R, clock: fn() -> i64) -> Self {
        let groups = load_or_empty(&repo, SCREEN);
        info!(
            "event=screen_mount module=service screen={} status=ok group_count={}",
            SCREEN,
            groups.len()
        );
        Self {
            repo,
            groups,
            filter: TaskFilter::default(),
            editor: TaskEditor::new(),
            clock,
        }
    }

    /// Full collection, active and completed, in stored order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups rendered on this screen.
    pub fn active_groups(&self) -> Vec<&Group> {
        active_groups(&self.groups)
    }

    pub fn find_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// Creates a group and returns its id, or `None` for a blank name.
    pub fn add_group(&mut self, name: &str) -> Option<RecordId> {
        let next = ops::add_group(&self.groups, name, (self.clock)())?;
        let group_id = next[0].id.clone();
        self.commit(next, "group_add");
        Some(group_id)
    }

    /// Deletes a group with all of its tasks.
    pub fn delete_group(&mut self, group_id: &str) -> bool {
        let Some(next) = ops::delete_group(&self.groups, group_id) else {
            return false;
        };
        if self
            .editor
            .target()
            .is_some_and(|target| target.group_id == group_id)
        {
            self.editor.cancel();
        }
        self.commit(next, "group_delete");
        true
    }

    /// Adds a task to a group and returns its id.
    ///
    /// Returns `None` for a blank title or an unknown group.
    pub fn add_task(&mut self, group_id: &str, title: &str) -> Option<RecordId> {
        let next = ops::add_task(&self.groups, group_id, title, (self.clock)())?;
        let task_id = next
            .iter()
            .find(|group| group.id == group_id)
            .and_then(|group| group.tasks.first())
            .map(|task| task.id.clone())?;
        self.commit(next, "task_add");
        Some(task_id)
    }

    pub fn toggle_task(&mut self, group_id: &str, task_id: &str) -> bool {
        match ops::toggle_task(&self.groups, group_id, task_id) {
            Some(next) => {
                self.commit(next, "task_toggle");
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, group_id: &str, task_id: &str) -> bool {
        let Some(next) = ops::delete_task(&self.groups, group_id, task_id) else {
            return false;
        };
        if self.editor.is_editing(group_id, task_id) {
            self.editor.cancel();
        }
        self.commit(next, "task_delete");
        true
    }

    fn apply_edit(&mut self, group_id: &str, task_id: &str, title: &str) -> bool {
        match ops::edit_task(&self.groups, group_id, task_id, title) {
            Some(next) => {
                self.commit(next, "task_edit");
                true
            }
            None => false,
        }
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Tasks of one group that pass the current filter.
    pub fn visible_tasks(&self, group_id: &str) -> Vec<&Task> {
        self.find_group(group_id)
            .map(|group| self.filter.apply(&group.tasks))
            .unwrap_or_default()
    }

    pub fn editor(&self) -> &TaskEditor {
        &self.editor
    }

    /// Puts one task into inline-edit mode, replacing any prior target.
    pub fn begin_edit(&mut self, group_id: &str, task_id: &str) -> bool {
        let Some(task) = self
            .find_group(group_id)
            .and_then(|group| group.find_task(task_id))
        else {
            return false;
        };
        let task = task.clone();
        self.editor.begin(group_id, &task);
        true
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        self.editor.set_text(text);
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Applies the inline-edit draft to its target task.
    ///
    /// A blank draft is a no-op and keeps the editor open. Otherwise the
    /// editor is cleared and the title replaced if the target still exists.
    pub fn save_edit(&mut self) -> bool {
        if self.editor.text().trim().is_empty() {
            return false;
        }
        let Some((target, text)) = self.editor.take() else {
            return false;
        };
        self.apply_edit(&target.group_id, &target.task_id, &text)
    }

    fn commit(&mut self, next: Vec<Group>, event: &str) {
        self.groups = next;
        match self.repo.save_groups(&self.groups) {
            Ok(()) => info!(
                "event={} module=service screen={} status=ok group_count={}",
                event,
                SCREEN,
                self.groups.len()
            ),
            Err(err) => warn!(
                "event={} module=service screen={} status=save_failed error={}",
                event, SCREEN, err
            ),
        }
    }
}
