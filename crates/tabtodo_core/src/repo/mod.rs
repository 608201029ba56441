//! Repository layer over key-value storage.
//!
//! # Responsibility
//! - Map the whole group collection to and from one persisted JSON array.
//! - Report malformed persisted data as a semantic error.
//!
//! # Invariants
//! - Every save writes the full snapshot; there are no partial writes.
//! - Read paths reject invalid persisted state instead of masking it; masking
//!   is a screen-level decision made in `service`.

pub mod group_repo;
