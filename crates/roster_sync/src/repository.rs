//! The sync repository: optimistic mutations with rollback.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::locks::MutationLocks;
use parking_lot::RwLock;
use roster_remote::{record_from_raw, RemoteService};
use roster_store::{LocalStore, Record, RecordFields, RecordId, StoreResult, SyncState};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

/// Counters describing what the repository has done so far.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Creates confirmed by the remote service.
    pub creates_confirmed: u64,
    /// Updates confirmed by the remote service.
    pub updates_confirmed: u64,
    /// Deletes confirmed by the remote service.
    pub deletes_confirmed: u64,
    /// Rollbacks performed after a remote failure.
    pub rollbacks: u64,
    /// Background or on-demand refreshes that replaced the mirror.
    pub refreshes_completed: u64,
    /// Last failure observed, mutation or refresh.
    pub last_error: Option<String>,
}

/// Orchestrates optimistic writes against the local store and mirrors
/// them to the remote service.
///
/// Both collaborators are injected at construction; the repository
/// holds no other state than its locks and counters. Mutations run
/// their three steps in strict sequence: optimistic local write,
/// remote round trip, then reconciliation or rollback. The read path
/// (`watch`) returns immediately and never touches the network.
///
/// Callers are expected to serialize mutations per record; the
/// repository additionally guards update/delete with per-identifier
/// locks so concurrent callers cannot race a rollback against a fresh
/// optimistic write on the same row.
pub struct SyncRepository<S: LocalStore, R: RemoteService> {
    store: Arc<S>,
    remote: Arc<R>,
    config: SyncConfig,
    locks: MutationLocks,
    stats: Arc<RwLock<SyncStats>>,
}

impl<S, R> SyncRepository<S, R>
where
    S: LocalStore + 'static,
    R: RemoteService + 'static,
{
    /// Creates a repository with the default configuration.
    pub fn new(store: Arc<S>, remote: Arc<R>) -> Self {
        Self::with_config(store, remote, SyncConfig::default())
    }

    /// Creates a repository with an explicit configuration.
    pub fn with_config(store: Arc<S>, remote: Arc<R>, config: SyncConfig) -> Self {
        Self {
            store,
            remote,
            config,
            locks: MutationLocks::new(),
            stats: Arc::new(RwLock::new(SyncStats::default())),
        }
    }

    /// Returns the injected store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns a copy of the current counters.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Subscribes to the local mirror.
    ///
    /// The receiver is primed with the current snapshot immediately.
    /// When configured (the default), a background refresh starts
    /// concurrently; its outcome is logged, never surfaced, and the
    /// returned subscription does not wait for it.
    pub fn watch(&self) -> Receiver<Vec<Record>> {
        let rx = self.store.subscribe();
        if self.config.refresh_on_watch {
            self.spawn_refresh();
        }
        rx
    }

    /// Starts a fire-and-forget refresh on a background thread.
    pub fn spawn_refresh(&self) {
        let store = Arc::clone(&self.store);
        let remote = Arc::clone(&self.remote);
        let stats = Arc::clone(&self.stats);
        thread::spawn(move || Self::run_refresh(&store, &remote, &stats));
    }

    /// Refreshes the local mirror from the remote service, blocking
    /// for the round trip.
    ///
    /// On success the entire mirror is atomically replaced with the
    /// normalized remote collection (last fetch wins). On failure the
    /// mirror is left untouched and the failure is logged only: the
    /// read path must keep working without connectivity.
    pub fn refresh(&self) {
        Self::run_refresh(&self.store, &self.remote, &self.stats);
    }

    fn run_refresh(store: &S, remote: &R, stats: &RwLock<SyncStats>) {
        match Self::try_refresh(store, remote) {
            Ok(count) => {
                tracing::debug!(rows = count, "refresh replaced local mirror");
                stats.write().refreshes_completed += 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed, keeping local mirror");
                stats.write().last_error = Some(err.to_string());
            }
        }
    }

    fn try_refresh(store: &S, remote: &R) -> SyncResult<usize> {
        let raws = remote.fetch_all()?;
        let records: Vec<Record> = raws.iter().map(record_from_raw).collect();
        let count = records.len();
        store.replace_all(records)?;
        Ok(count)
    }

    /// Creates a record optimistically.
    ///
    /// The draft is inserted as `Pending` under a placeholder
    /// identifier before the remote round trip. On confirmation the
    /// placeholder row is replaced by the `Synced` row the service
    /// answered with (fresh canonical identifier included). On any
    /// failure, including a confirmation payload without a usable
    /// identifier, the placeholder row is deleted again: the store
    /// never keeps an orphaned `Pending` row for the attempt.
    pub fn create(&self, fields: RecordFields) -> SyncResult<Record> {
        let temp_id = self.store.insert(Record::pending(fields.clone()))?;
        tracing::debug!(temp_id, "optimistic create inserted");

        let confirmed = match self.remote.create(&fields) {
            Ok(raw) => {
                let confirmed = record_from_raw(&raw);
                if confirmed.id.is_some() {
                    Some(confirmed)
                } else {
                    // Unusable confirmation, handled like a rejection.
                    None
                }
            }
            Err(err) => {
                let err = SyncError::from(err);
                self.roll_back("create", &err, || {
                    self.store.delete(temp_id).map(|_| ())
                })?;
                return Err(self.note_failure(err));
            }
        };

        match confirmed {
            Some(confirmed) => {
                self.store.delete(temp_id)?;
                self.store.insert(confirmed.clone())?;
                tracing::debug!(id = ?confirmed.id, "create confirmed");
                self.stats.write().creates_confirmed += 1;
                Ok(confirmed)
            }
            None => {
                let err = SyncError::RemoteRejected {
                    message: "create confirmation carried no record id".into(),
                };
                self.roll_back("create", &err, || {
                    self.store.delete(temp_id).map(|_| ())
                })?;
                Err(self.note_failure(err))
            }
        }
    }

    /// Updates a record optimistically.
    ///
    /// Requires an identifier; fails with `NotFound` when no local row
    /// matches it (nothing is mutated in that case). The row is
    /// overwritten as `Pending` before the remote round trip, flipped
    /// to `Synced` on confirmation, and restored to the exact
    /// pre-mutation row (fields and sync state) on failure.
    pub fn update(&self, record: Record) -> SyncResult<Record> {
        let id = record
            .id
            .ok_or_else(|| SyncError::precondition("update requires a record identifier"))?;
        let _guard = self.locks.guard(id);

        let original = self
            .find_by_id(id)?
            .ok_or(SyncError::NotFound { id })?;

        self.store.update(&record.with_state(SyncState::Pending))?;
        tracing::debug!(id, "optimistic update applied");

        match self.remote.update(id, &record.fields()) {
            Ok(()) => {
                let synced = record.with_state(SyncState::Synced);
                self.store.update(&synced)?;
                tracing::debug!(id, "update confirmed");
                self.stats.write().updates_confirmed += 1;
                Ok(synced)
            }
            Err(err) => {
                let err = SyncError::from(err);
                self.roll_back("update", &err, || self.store.update(&original))?;
                Err(self.note_failure(err))
            }
        }
    }

    /// Deletes a record optimistically.
    ///
    /// Fails with `NotFound` when no local row matches the identifier
    /// (nothing is mutated in that case). The row is removed before
    /// the remote round trip and re-inserted exactly as captured, sync
    /// state included, if the remote call fails.
    pub fn delete(&self, id: RecordId) -> SyncResult<()> {
        let _guard = self.locks.guard(id);

        let original = self
            .find_by_id(id)?
            .ok_or(SyncError::NotFound { id })?;

        self.store.delete(id)?;
        tracing::debug!(id, "optimistic delete applied");

        match self.remote.delete(id) {
            Ok(()) => {
                tracing::debug!(id, "delete confirmed");
                self.stats.write().deletes_confirmed += 1;
                Ok(())
            }
            Err(err) => {
                let err = SyncError::from(err);
                self.roll_back("delete", &err, || {
                    self.store.insert(original.clone()).map(|_| ())
                })?;
                Err(self.note_failure(err))
            }
        }
    }

    /// Point lookup via a full snapshot.
    ///
    /// The store boundary deliberately has no point-lookup operation;
    /// at the collection sizes this client mirrors, snapshot-and-filter
    /// is equivalent.
    fn find_by_id(&self, id: RecordId) -> SyncResult<Option<Record>> {
        Ok(self
            .store
            .all()?
            .into_iter()
            .find(|record| record.id == Some(id)))
    }

    /// Runs a compensating store write, converting its failure into
    /// the distinct `RollbackFailed` error.
    fn roll_back(
        &self,
        operation: &'static str,
        remote_failure: &SyncError,
        action: impl FnOnce() -> StoreResult<()>,
    ) -> SyncResult<()> {
        match action() {
            Ok(()) => {
                tracing::debug!(operation, "rolled back optimistic write");
                self.stats.write().rollbacks += 1;
                Ok(())
            }
            Err(cause) => Err(SyncError::RollbackFailed {
                operation,
                remote: remote_failure.to_string(),
                cause,
            }),
        }
    }

    fn note_failure(&self, err: SyncError) -> SyncError {
        self.stats.write().last_error = Some(err.to_string());
        err
    }
}

impl<S: LocalStore, R: RemoteService> std::fmt::Debug for SyncRepository<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRepository")
            .field("config", &self.config)
            .field("stats", &*self.stats.read())
            .finish_non_exhaustive()
    }
}
