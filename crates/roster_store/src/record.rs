//! The record model shared by the store and the sync layer.

use serde::{Deserialize, Serialize};

/// Identifier for a record.
///
/// The remote service owns the positive identifier space. Locally
/// assigned placeholder identifiers are negative, so a placeholder can
/// never collide with a server identifier.
pub type RecordId = i64;

/// Synchronization state of a local row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    /// The row matches the remote service's copy and its identifier is
    /// the canonical one.
    Synced,
    /// The row holds an optimistic mutation the remote service has not
    /// confirmed. Its identifier may be a local placeholder.
    Pending,
}

impl SyncState {
    /// Returns true for [`SyncState::Synced`].
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced)
    }
}

/// The user-editable payload of a record.
///
/// This is what a create or update intent carries, and what crosses
/// the remote boundary as the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Display name. Non-empty for well-formed records; normalization
    /// of degraded remote payloads may produce an empty string.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Salary, non-negative.
    pub salary: u64,
}

impl RecordFields {
    /// Creates a new field set.
    pub fn new(name: impl Into<String>, age: i64, salary: u64) -> Self {
        Self {
            name: name.into(),
            age,
            salary,
        }
    }
}

/// A managed record row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier. `None` until assigned: the store fills in a local
    /// placeholder on insert, the remote service issues the canonical
    /// value.
    pub id: Option<RecordId>,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Salary, non-negative.
    pub salary: u64,
    /// Whether the remote service has confirmed this row.
    pub sync_state: SyncState,
}

impl Record {
    /// Creates an unconfirmed row with no identifier.
    pub fn pending(fields: RecordFields) -> Self {
        Self {
            id: None,
            name: fields.name,
            age: fields.age,
            salary: fields.salary,
            sync_state: SyncState::Pending,
        }
    }

    /// Creates a confirmed row with the given canonical identifier.
    pub fn synced(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id: Some(id),
            name: fields.name,
            age: fields.age,
            salary: fields.salary,
            sync_state: SyncState::Synced,
        }
    }

    /// Projects the user-editable payload out of the row.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            age: self.age,
            salary: self.salary,
        }
    }

    /// Returns a copy of this row tagged with the given state.
    pub fn with_state(&self, sync_state: SyncState) -> Self {
        Self {
            sync_state,
            ..self.clone()
        }
    }

    /// Returns true if the remote service has confirmed this row.
    pub fn is_synced(&self) -> bool {
        self.sync_state.is_synced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_has_no_id() {
        let record = Record::pending(RecordFields::new("Ann", 30, 50_000));
        assert_eq!(record.id, None);
        assert_eq!(record.sync_state, SyncState::Pending);
        assert!(!record.is_synced());
    }

    #[test]
    fn synced_carries_id() {
        let record = Record::synced(7, RecordFields::new("Bo", 25, 40_000));
        assert_eq!(record.id, Some(7));
        assert!(record.is_synced());
    }

    #[test]
    fn fields_round_trip() {
        let fields = RecordFields::new("Ann", 30, 50_000);
        let record = Record::synced(1, fields.clone());
        assert_eq!(record.fields(), fields);
    }

    #[test]
    fn with_state_preserves_everything_else() {
        let record = Record::synced(3, RecordFields::new("Bo", 25, 40_000));
        let pending = record.with_state(SyncState::Pending);
        assert_eq!(pending.id, Some(3));
        assert_eq!(pending.name, "Bo");
        assert_eq!(pending.sync_state, SyncState::Pending);
        assert_eq!(pending.with_state(SyncState::Synced), record);
    }
}
