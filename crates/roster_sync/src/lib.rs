//! # Roster Sync
//!
//! Optimistic synchronization core for Roster.
//!
//! This crate provides:
//! - `SyncRepository`, the mutation and reconciliation state machine
//! - A typed failure taxonomy (`SyncError`)
//! - Per-identifier mutation locks
//! - Fire-and-forget background refresh of the local mirror
//!
//! ## Architecture
//!
//! The repository implements an **optimistic write-through** model:
//! 1. Apply the mutation to the local store immediately
//! 2. Mirror it to the remote service (which owns the canonical data)
//! 3. On success, reconcile the local row with the confirmed state;
//!    on failure, roll the local store back to its pre-mutation state
//!    and re-raise
//!
//! Independently, `refresh` pulls the full remote collection and
//! atomically replaces the local mirror. The read path only ever
//! touches the local store; it never waits on the network.
//!
//! ## Key Invariants
//!
//! - The remote service is authoritative; a full fetch replaces the
//!   mirror wholesale (last fetch wins)
//! - After any settled mutation the store holds either the confirmed
//!   state or the exact pre-mutation state, nothing in between
//! - A failed compensating write surfaces distinctly; it is never
//!   swallowed alongside the remote failure that triggered it
//! - Nothing is retried automatically; retry policy belongs to the
//!   caller

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod locks;
mod repository;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use repository::{SyncRepository, SyncStats};
