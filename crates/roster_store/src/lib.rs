//! # Roster Store
//!
//! Local record mirror for the Roster sync core.
//!
//! This crate provides:
//! - The `Record` model shared by the store and the sync layer
//! - A snapshot feed that emits the full collection on every change
//! - The `LocalStore` trait the sync repository writes through
//! - `MemoryStore`, the in-memory reference implementation
//!
//! The store owns the durable copy of every record. The sync layer
//! reads snapshots, computes deltas, and writes back; nothing else
//! mutates rows.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod feed;
mod record;
mod store;

pub use error::{StoreError, StoreResult};
pub use feed::SnapshotFeed;
pub use record::{Record, RecordFields, RecordId, SyncState};
pub use store::{LocalStore, MemoryStore};
