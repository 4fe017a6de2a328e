//! The remote service boundary and a scripted mock.

use crate::error::{RemoteError, RemoteResult};
use crate::raw::RawRecord;
use roster_store::{RecordFields, RecordId};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// The remote CRUD endpoint owning the canonical record set.
///
/// Every call is a fallible request/response round trip over an
/// unreliable channel and may block for its duration. Implementations
/// must not retry internally; retry policy belongs to the caller's
/// caller.
pub trait RemoteService: Send + Sync {
    /// Fetches the full remote collection.
    fn fetch_all(&self) -> RemoteResult<Vec<RawRecord>>;

    /// Creates a record, returning the service's raw confirmation
    /// payload (which carries the canonical identifier).
    fn create(&self, fields: &RecordFields) -> RemoteResult<RawRecord>;

    /// Updates the record with the given identifier.
    fn update(&self, id: RecordId, fields: &RecordFields) -> RemoteResult<()>;

    /// Deletes the record with the given identifier.
    fn delete(&self, id: RecordId) -> RemoteResult<()>;
}

/// A call observed by [`MockRemoteService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// `fetch_all` was invoked.
    FetchAll,
    /// `create` was invoked with these fields.
    Create(RecordFields),
    /// `update` was invoked for this id with these fields.
    Update(RecordId, RecordFields),
    /// `delete` was invoked for this id.
    Delete(RecordId),
}

/// A scripted remote service for tests and demos.
///
/// Unscripted, it behaves like a well-behaved server: `fetch_all`
/// returns an empty collection, `create` confirms with a fresh
/// ascending identifier, `update` and `delete` succeed. Each operation
/// can be overridden with a fixed result (success or failure), and all
/// invocations are recorded for assertions.
#[derive(Debug, Default)]
pub struct MockRemoteService {
    fetch_all_result: Mutex<Option<RemoteResult<Vec<RawRecord>>>>,
    create_result: Mutex<Option<RemoteResult<RawRecord>>>,
    update_result: Mutex<Option<RemoteResult<()>>>,
    delete_result: Mutex<Option<RemoteResult<()>>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<RemoteCall>>,
}

impl MockRemoteService {
    /// Creates a new mock with default (well-behaved) behavior.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Scripts the `fetch_all` result.
    pub fn set_fetch_all(&self, result: RemoteResult<Vec<RawRecord>>) {
        *self.fetch_all_result.lock().unwrap() = Some(result);
    }

    /// Scripts the `create` result.
    pub fn set_create(&self, result: RemoteResult<RawRecord>) {
        *self.create_result.lock().unwrap() = Some(result);
    }

    /// Scripts the `update` result.
    pub fn set_update(&self, result: RemoteResult<()>) {
        *self.update_result.lock().unwrap() = Some(result);
    }

    /// Scripts the `delete` result.
    pub fn set_delete(&self, result: RemoteResult<()>) {
        *self.delete_result.lock().unwrap() = Some(result);
    }

    /// Scripts every operation to fail with the given error.
    pub fn fail_all(&self, error: RemoteError) {
        self.set_fetch_all(Err(error.clone()));
        self.set_create(Err(error.clone()));
        self.set_update(Err(error.clone()));
        self.set_delete(Err(error));
    }

    /// Returns the calls observed so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RemoteService for MockRemoteService {
    fn fetch_all(&self) -> RemoteResult<Vec<RawRecord>> {
        self.record(RemoteCall::FetchAll);
        self.fetch_all_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn create(&self, fields: &RecordFields) -> RemoteResult<RawRecord> {
        self.record(RemoteCall::Create(fields.clone()));
        if let Some(result) = self.create_result.lock().unwrap().clone() {
            return result;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(RawRecord::from_fields(fields).with_field("id", id))
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> RemoteResult<()> {
        self.record(RemoteCall::Update(id, fields.clone()));
        self.update_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(()))
    }

    fn delete(&self, id: RecordId) -> RemoteResult<()> {
        self.record(RemoteCall::Delete(id));
        self.delete_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::record_from_raw;

    #[test]
    fn unscripted_create_assigns_ascending_ids() {
        let mock = MockRemoteService::new();
        let fields = RecordFields::new("Ann", 30, 50_000);

        let first = record_from_raw(&mock.create(&fields).unwrap());
        let second = record_from_raw(&mock.create(&fields).unwrap());

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.is_synced());
    }

    #[test]
    fn scripted_failure_is_persistent() {
        let mock = MockRemoteService::new();
        mock.set_delete(Err(RemoteError::unreachable("down")));

        assert!(mock.delete(1).is_err());
        assert!(mock.delete(2).is_err());
    }

    #[test]
    fn calls_are_recorded_in_order() {
        let mock = MockRemoteService::new();
        let fields = RecordFields::new("Bo", 25, 40_000);

        mock.fetch_all().unwrap();
        mock.update(3, &fields).unwrap();
        mock.delete(3).unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                RemoteCall::FetchAll,
                RemoteCall::Update(3, fields),
                RemoteCall::Delete(3),
            ]
        );
    }

    #[test]
    fn fail_all_scripts_every_operation() {
        let mock = MockRemoteService::new();
        mock.fail_all(RemoteError::rejected("maintenance"));

        assert!(mock.fetch_all().is_err());
        assert!(mock.create(&RecordFields::new("Ann", 30, 1)).is_err());
        assert!(mock.update(1, &RecordFields::new("Ann", 30, 1)).is_err());
        assert!(mock.delete(1).is_err());
    }
}
