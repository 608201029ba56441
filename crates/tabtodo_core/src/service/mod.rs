//! Screen-level use-case services.
//!
//! # Responsibility
//! - Apply pure collection mutations and persist the resulting snapshot.
//! - Own per-screen view state (task filter, inline edit target).
//! - Keep the host UI decoupled from storage details and failures.
//!
//! # Invariants
//! - Storage failures never reach the UI; they are logged and the in-memory
//!   collection stays authoritative for the session.
//! - The archive service never writes.

pub mod active_groups_service;
pub mod archive_service;
pub mod ops;
pub mod view_state;

use crate::model::group::Group;
use crate::repo::group_repo::GroupRepository;
use log::warn;

/// Loads the persisted snapshot, masking any failure as an empty collection.
fn load_or_empty(repo: &impl GroupRepository, screen: &str) -> Vec<Group> {
    match repo.load_groups() {
        Ok(groups) => groups,
        Err(err) => {
            warn!(
                "event=groups_load module=service screen={} status=fallback_empty error={}",
                screen, err
            );
            Vec::new()
        }
    }
}
