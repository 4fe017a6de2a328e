//! Snapshot feed for observing the collection.
//!
//! The feed emits the full current collection to every subscriber
//! after each committed mutation. Subscribers receive snapshots in
//! commit order; a new subscriber is primed with the current snapshot
//! immediately, so the read path never waits on a mutation (or on the
//! network) to produce its first value.

use crate::record::Record;
use parking_lot::RwLock;
use std::sync::mpsc::{self, Receiver, Sender};

/// Distributes full-collection snapshots to subscribers.
///
/// The feed:
/// - Emits only committed state
/// - Preserves commit order per subscriber
/// - Supports multiple subscribers
/// - Prunes disconnected subscribers on emit
pub struct SnapshotFeed {
    subscribers: RwLock<Vec<Sender<Vec<Record>>>>,
}

impl SnapshotFeed {
    /// Creates a new feed with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribes to the feed, priming the new receiver with `current`.
    pub fn subscribe(&self, current: Vec<Record>) -> Receiver<Vec<Record>> {
        let (tx, rx) = mpsc::channel();
        // A send to a channel whose receiver is alive cannot fail.
        let _ = tx.send(current);
        self.subscribers.write().push(tx);
        rx
    }

    /// Emits a snapshot to all subscribers, dropping any that have
    /// disconnected.
    pub fn emit(&self, snapshot: Vec<Record>) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for SnapshotFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordFields};
    use std::time::Duration;

    fn row(id: i64) -> Record {
        Record::synced(id, RecordFields::new("Ann", 30, 50_000))
    }

    #[test]
    fn subscribe_primes_with_current() {
        let feed = SnapshotFeed::new();
        let rx = feed.subscribe(vec![row(1)]);

        let first = rx.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(first, vec![row(1)]);
    }

    #[test]
    fn emit_reaches_all_subscribers() {
        let feed = SnapshotFeed::new();
        let rx1 = feed.subscribe(Vec::new());
        let rx2 = feed.subscribe(Vec::new());

        feed.emit(vec![row(1), row(2)]);

        // Skip the priming emission on each.
        assert!(rx1.recv().unwrap().is_empty());
        assert!(rx2.recv().unwrap().is_empty());
        assert_eq!(rx1.recv().unwrap().len(), 2);
        assert_eq!(rx2.recv().unwrap().len(), 2);
    }

    #[test]
    fn disconnected_subscribers_are_pruned() {
        let feed = SnapshotFeed::new();
        let rx = feed.subscribe(Vec::new());
        assert_eq!(feed.subscriber_count(), 1);

        drop(rx);
        feed.emit(vec![row(1)]);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn snapshots_arrive_in_commit_order() {
        let feed = SnapshotFeed::new();
        let rx = feed.subscribe(Vec::new());

        feed.emit(vec![row(1)]);
        feed.emit(vec![row(1), row(2)]);

        let _primed = rx.recv().unwrap();
        assert_eq!(rx.recv().unwrap().len(), 1);
        assert_eq!(rx.recv().unwrap().len(), 2);
    }
}
