//! Pure mutations over a group collection.
//!
//! Every operation borrows the current collection and returns
//! `Some(next_collection)` when it changes something, or `None` when the
//! call is a no-op (blank input, unknown id). Callers persist only `Some`.

use crate::model::group::Group;
use crate::model::task::Task;

/// Prepends a new empty group named `name` (trimmed).
pub fn add_group(groups: &[Group], name: &str, now_ms: i64) -> Option<Vec<Group>> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut next = Vec::with_capacity(groups.len() + 1);
    next.push(Group::new(name, now_ms));
    next.extend_from_slice(groups);
    Some(next)
}

/// Removes the group and every task it owns.
pub fn delete_group(groups: &[Group], group_id: &str) -> Option<Vec<Group>> {
    if !groups.iter().any(|group| group.id == group_id) {
        return None;
    }

    Some(
        groups
            .iter()
            .filter(|group| group.id != group_id)
            .cloned()
            .collect(),
    )
}

/// Prepends a new incomplete task titled `title` (trimmed) to a group.
pub fn add_task(groups: &[Group], group_id: &str, title: &str, now_ms: i64) -> Option<Vec<Group>> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    update_group(groups, group_id, |group| {
        group.tasks.insert(0, Task::new(title, now_ms));
        true
    })
}

/// Flips `completed` on one task.
pub fn toggle_task(groups: &[Group], group_id: &str, task_id: &str) -> Option<Vec<Group>> {
    update_group(groups, group_id, |group| {
        match group.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    })
}

/// Removes one task from its group.
pub fn delete_task(groups: &[Group], group_id: &str, task_id: &str) -> Option<Vec<Group>> {
    update_group(groups, group_id, |group| {
        let before = group.tasks.len();
        group.tasks.retain(|task| task.id != task_id);
        group.tasks.len() != before
    })
}

/// Replaces a task title with `title` (trimmed).
pub fn edit_task(
    groups: &[Group],
    group_id: &str,
    task_id: &str,
    title: &str,
) -> Option<Vec<Group>> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    update_group(groups, group_id, |group| {
        match group.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.title = title.to_string();
                true
            }
            None => false,
        }
    })
}

fn update_group(
    groups: &[Group],
    group_id: &str,
    apply: impl FnOnce(&mut Group) -> bool,
) -> Option<Vec<Group>> {
    let index = groups.iter().position(|group| group.id == group_id)?;
    let mut next = groups.to_vec();
    if apply(&mut next[index]) {
        Some(next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{add_group, add_task, delete_group, delete_task, edit_task, toggle_task};
    use crate::model::group::Group;

    fn seeded() -> (Vec<Group>, String, String) {
        let groups = add_group(&[], "Work", 10).unwrap();
        let group_id = groups[0].id.clone();
        let groups = add_task(&groups, &group_id, "Buy milk", 11).unwrap();
        let task_id = groups[0].tasks[0].id.clone();
        (groups, group_id, task_id)
    }

    #[test]
    fn add_group_trims_and_prepends() {
        let first = add_group(&[], "Home", 1).unwrap();
        let second = add_group(&first, "  Work  ", 2).unwrap();

        assert_eq!(second.len(), 2);
        assert_eq!(second[0].name, "Work");
        assert_eq!(second[0].created_at, 2);
        assert!(second[0].tasks.is_empty());
        assert_eq!(second[1].name, "Home");
    }

    #[test]
    fn blank_names_and_titles_are_no_ops() {
        let (groups, group_id, _) = seeded();
        assert!(add_group(&groups, "", 1).is_none());
        assert!(add_group(&groups, " \t\n", 1).is_none());
        assert!(add_task(&groups, &group_id, "   ", 1).is_none());
    }

    #[test]
    fn add_task_to_missing_group_is_no_op() {
        let (groups, _, _) = seeded();
        assert!(add_task(&groups, "missing", "title", 1).is_none());
    }

    #[test]
    fn add_task_prepends_newest_first() {
        let (groups, group_id, first_task) = seeded();
        let next = add_task(&groups, &group_id, "Second", 12).unwrap();

        assert_eq!(next[0].tasks.len(), 2);
        assert_eq!(next[0].tasks[0].title, "Second");
        assert_eq!(next[0].tasks[1].id, first_task);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let (groups, group_id, task_id) = seeded();
        let once = toggle_task(&groups, &group_id, &task_id).unwrap();
        assert!(once[0].tasks[0].completed);

        let twice = toggle_task(&once, &group_id, &task_id).unwrap();
        assert_eq!(twice, groups);
    }

    #[test]
    fn toggle_with_unknown_ids_is_no_op() {
        let (groups, group_id, task_id) = seeded();
        assert!(toggle_task(&groups, "missing", &task_id).is_none());
        assert!(toggle_task(&groups, &group_id, "missing").is_none());
    }

    #[test]
    fn delete_task_removes_only_target() {
        let (groups, group_id, task_id) = seeded();
        let groups = add_task(&groups, &group_id, "Keep me", 12).unwrap();

        let next = delete_task(&groups, &group_id, &task_id).unwrap();
        assert_eq!(next[0].tasks.len(), 1);
        assert_eq!(next[0].tasks[0].title, "Keep me");
        assert!(delete_task(&next, &group_id, &task_id).is_none());
    }

    #[test]
    fn delete_group_cascades_and_ignores_unknown_ids() {
        let (groups, group_id, _) = seeded();
        assert!(delete_group(&groups, "missing").is_none());
        assert!(delete_group(&groups, &group_id).unwrap().is_empty());
    }

    #[test]
    fn edit_task_replaces_title_and_rejects_blank() {
        let (groups, group_id, task_id) = seeded();
        assert!(edit_task(&groups, &group_id, &task_id, "  ").is_none());

        let next = edit_task(&groups, &group_id, &task_id, " Buy oat milk ").unwrap();
        assert_eq!(next[0].tasks[0].title, "Buy oat milk");
        assert_eq!(next[0].tasks[0].id, task_id);
        assert!(!next[0].tasks[0].completed);
    }

    #[test]
    fn mutations_leave_input_untouched() {
        let (groups, group_id, task_id) = seeded();
        let snapshot = groups.clone();
        let _ = toggle_task(&groups, &group_id, &task_id);
        let _ = delete_group(&groups, &group_id);
        assert_eq!(groups, snapshot);
    }
}
