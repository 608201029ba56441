//! Group collection repository.

use crate::kv::{KeyValueStore, KvError};
use crate::model::group::Group;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the grouped task collection.
pub const GROUPS_STORAGE_KEY: &str = "@todo_groups_v1";

/// Reserved key of the single-list layout.
///
/// No core type reads or writes it. It is exported so hosts and tests can
/// check that grouped data never lands under the single-list key.
pub const TASKS_STORAGE_KEY: &str = "@todo_tasks_v1";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    /// Persisted value is not a JSON array of group records.
    InvalidData(String),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted group data: {message}"),
            Self::Encode(err) => write!(f, "failed to encode groups: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Repository interface for the full group snapshot.
pub trait GroupRepository {
    /// Loads the persisted snapshot. Missing data is an empty collection.
    fn load_groups(&self) -> RepoResult<Vec<Group>>;
    /// Replaces the persisted snapshot with `groups`.
    fn save_groups(&self, groups: &[Group]) -> RepoResult<()>;
}

impl<R: GroupRepository + ?Sized> GroupRepository for &R {
    fn load_groups(&self) -> RepoResult<Vec<Group>> {
        (**self).load_groups()
    }

    fn save_groups(&self, groups: &[Group]) -> RepoResult<()> {
        (**self).save_groups(groups)
    }
}

/// Stores groups as a JSON array under a single key.
pub struct KvGroupRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvGroupRepository<S> {
    /// Creates a repository bound to `GROUPS_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, GROUPS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> GroupRepository for KvGroupRepository<S> {
    fn load_groups(&self) -> RepoResult<Vec<Group>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let groups = decode_groups(&raw)?;
        debug!(
            "event=groups_load module=repo status=ok group_count={}",
            groups.len()
        );
        Ok(groups)
    }

    fn save_groups(&self, groups: &[Group]) -> RepoResult<()> {
        let raw = encode_groups(groups)?;
        self.store.set(&self.key, &raw)?;
        debug!(
            "event=groups_save module=repo status=ok group_count={} bytes={}",
            groups.len(),
            raw.len()
        );
        Ok(())
    }
}

/// Serializes a group collection to its persisted JSON form.
pub fn encode_groups(groups: &[Group]) -> RepoResult<String> {
    serde_json::to_string(groups).map_err(RepoError::Encode)
}

/// Parses the persisted JSON form of a group collection.
///
/// # Errors
/// - `InvalidData` when `raw` is not valid JSON or not an array of groups.
pub fn decode_groups(raw: &str) -> RepoResult<Vec<Group>> {
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}
