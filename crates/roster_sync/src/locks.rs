//! Per-identifier mutation locks.
//!
//! The repository allows at most one in-flight optimistic mutation per
//! record identifier. Locks are striped rather than per-id: with a
//! handful of stripes, contention is only possible between ids that
//! hash to the same stripe, and the map never grows.

use parking_lot::{Mutex, MutexGuard};
use roster_store::RecordId;

const STRIPE_COUNT: usize = 16;

pub(crate) struct MutationLocks {
    stripes: Vec<Mutex<()>>,
}

impl MutationLocks {
    pub(crate) fn new() -> Self {
        Self {
            stripes: (0..STRIPE_COUNT).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Blocks until the stripe covering `id` is free, then holds it
    /// for the guard's lifetime.
    pub(crate) fn guard(&self, id: RecordId) -> MutexGuard<'_, ()> {
        let index = (id.unsigned_abs() as usize) % self.stripes.len();
        self.stripes[index].lock()
    }
}
