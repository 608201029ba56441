//! Archive screen: read-only view of completed groups.
//!
//! # Invariants
//! - Holds its own copy of the collection, independent of the active screen.
//! - Never writes to storage.
//! - Each refresh replaces the copy wholesale; a failed read yields empty.

use super::load_or_empty;
use crate::model::group::{completed_groups, Group};
use crate::repo::group_repo::GroupRepository;
use log::debug;

const SCREEN: &str = "archive";

pub struct ArchiveService<R: GroupRepository> {
    repo: R,
    groups: Vec<Group>,
}

impl<R: GroupRepository> ArchiveService<R> {
    /// Mounts the screen, loading the persisted collection once.
    pub fn mount(repo: R) -> Self {
        let groups = load_or_empty(&repo, SCREEN);
        Self { repo, groups }
    }

    /// Re-reads storage. Call whenever the screen regains visibility.
    pub fn on_focus(&mut self) {
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.groups = load_or_empty(&self.repo, SCREEN);
        debug!(
            "event=screen_refresh module=service screen={} status=ok group_count={}",
            SCREEN,
            self.groups.len()
        );
    }

    /// Groups rendered on this screen, recomputed from the current copy.
    pub fn completed_groups(&self) -> Vec<&Group> {
        completed_groups(&self.groups)
    }
}
