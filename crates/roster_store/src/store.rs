//! The local store boundary and its in-memory reference implementation.

use crate::error::{StoreError, StoreResult};
use crate::feed::SnapshotFeed;
use crate::record::{Record, RecordId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc::Receiver;

/// The persistent, queryable record collection the sync layer writes
/// through.
///
/// Implementations must make each operation individually atomic, and
/// `replace_all` atomic with respect to subscribers: a subscriber must
/// never observe the intermediate state between the delete-all and the
/// re-insert.
pub trait LocalStore: Send + Sync {
    /// Returns a point-in-time snapshot of the whole collection.
    fn all(&self) -> StoreResult<Vec<Record>>;

    /// Subscribes to full-collection snapshots.
    ///
    /// The receiver is primed with the current snapshot and then gets
    /// a fresh snapshot after every committed mutation.
    fn subscribe(&self) -> Receiver<Vec<Record>>;

    /// Inserts a row, assigning a local placeholder identifier when the
    /// record has none. Returns the identifier the row was stored under.
    fn insert(&self, record: Record) -> StoreResult<RecordId>;

    /// Overwrites the row matching the record's identifier.
    ///
    /// Fails with [`StoreError::MissingId`] when the record has no
    /// identifier and [`StoreError::NotFound`] when no row matches it.
    fn update(&self, record: &Record) -> StoreResult<()>;

    /// Deletes the row with the given identifier.
    ///
    /// Returns the number of rows removed; deleting an absent id is not
    /// an error and returns 0.
    fn delete(&self, id: RecordId) -> StoreResult<usize>;

    /// Atomically replaces the entire collection.
    fn replace_all(&self, records: Vec<Record>) -> StoreResult<()>;
}

/// An in-memory [`LocalStore`].
///
/// This store keeps all rows in memory and is suitable for:
/// - Unit and integration tests
/// - Ephemeral clients that do not need durability
///
/// Placeholder identifiers are assigned from a descending negative
/// counter, so they never collide with the remote service's positive
/// identifiers and a discarded placeholder is never reused.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across threads.
pub struct MemoryStore {
    rows: RwLock<BTreeMap<RecordId, Record>>,
    feed: SnapshotFeed,
    next_placeholder: AtomicI64,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            feed: SnapshotFeed::new(),
            next_placeholder: AtomicI64::new(-1),
        }
    }

    /// Creates a store pre-populated with the given rows.
    ///
    /// Rows without an identifier get a placeholder. Useful for tests.
    pub fn with_records(records: Vec<Record>) -> StoreResult<Self> {
        let store = Self::new();
        store.replace_all(records)?;
        Ok(store)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns true when the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Returns the number of live feed subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.feed.subscriber_count()
    }

    fn assign_id(&self, record: &mut Record) -> RecordId {
        match record.id {
            Some(id) => id,
            None => {
                let id = self.next_placeholder.fetch_sub(1, Ordering::SeqCst);
                record.id = Some(id);
                id
            }
        }
    }

    fn snapshot_of(rows: &BTreeMap<RecordId, Record>) -> Vec<Record> {
        rows.values().cloned().collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore for MemoryStore {
    fn all(&self) -> StoreResult<Vec<Record>> {
        Ok(Self::snapshot_of(&self.rows.read()))
    }

    fn subscribe(&self) -> Receiver<Vec<Record>> {
        // Holding the read lock while registering keeps the primed
        // snapshot and subsequent emissions in commit order.
        let rows = self.rows.read();
        self.feed.subscribe(Self::snapshot_of(&rows))
    }

    fn insert(&self, mut record: Record) -> StoreResult<RecordId> {
        let mut rows = self.rows.write();
        let id = self.assign_id(&mut record);
        rows.insert(id, record);
        // Emitting under the write lock keeps emissions in commit
        // order; channel sends never block.
        self.feed.emit(Self::snapshot_of(&rows));
        Ok(id)
    }

    fn update(&self, record: &Record) -> StoreResult<()> {
        let id = record.id.ok_or(StoreError::MissingId)?;
        let mut rows = self.rows.write();
        if !rows.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }
        rows.insert(id, record.clone());
        self.feed.emit(Self::snapshot_of(&rows));
        Ok(())
    }

    fn delete(&self, id: RecordId) -> StoreResult<usize> {
        let mut rows = self.rows.write();
        if rows.remove(&id).is_none() {
            return Ok(0);
        }
        self.feed.emit(Self::snapshot_of(&rows));
        Ok(1)
    }

    fn replace_all(&self, records: Vec<Record>) -> StoreResult<()> {
        let mut rows = self.rows.write();
        rows.clear();
        for mut record in records {
            let id = self.assign_id(&mut record);
            rows.insert(id, record);
        }
        // One emission for the whole replacement: subscribers never see
        // the cleared intermediate state.
        self.feed.emit(Self::snapshot_of(&rows));
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("len", &self.len())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}
