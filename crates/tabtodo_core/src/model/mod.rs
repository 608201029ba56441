//! Domain model for groups and the tasks they own.
//!
//! # Responsibility
//! - Define the persisted record shapes shared by every screen.
//! - Own group classification (active vs completed) as pure predicates.
//!
//! # Invariants
//! - Classification is derived from `tasks` on every read and never stored.
//! - Task ids are unique within their group; group ids are unique in a store.

pub mod group;
pub mod task;

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque record identifier shared by groups and tasks.
///
/// Kept as a type alias so persisted ids from older app builds
/// (timestamp + random hex) load without conversion.
pub type RecordId = String;

/// Returns the current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reports a pre-epoch time.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Generates a new opaque record id from a timestamp and a random suffix.
///
/// Format: decimal `now_ms` followed by 12 lowercase hex characters.
pub fn generate_id(now_ms: i64) -> RecordId {
    let random = Uuid::new_v4().simple().to_string();
    format!("{now_ms}{}", &random[..12])
}
