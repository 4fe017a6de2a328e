//! Record and raw-payload fixtures.

use roster_remote::RawRecord;
use roster_store::{Record, RecordFields, RecordId};

/// A synced row for Ann (id 1).
pub fn ann() -> Record {
    Record::synced(1, RecordFields::new("Ann", 30, 50_000))
}

/// A synced row for Bo (id 3).
pub fn bo() -> Record {
    Record::synced(3, RecordFields::new("Bo", 25, 40_000))
}

/// A small, distinct collection of synced rows.
pub fn roster() -> Vec<Record> {
    vec![
        ann(),
        bo(),
        Record::synced(5, RecordFields::new("Cy", 41, 62_000)),
    ]
}

/// A raw payload in the read-endpoint schema (`employee_*` keys,
/// string-typed numerics), as the upstream fetch endpoint produces it.
pub fn raw_read_schema(id: RecordId, name: &str, age: i64, salary: u64) -> RawRecord {
    RawRecord::new()
        .with_field("id", id.to_string())
        .with_field("employee_name", name)
        .with_field("employee_age", age.to_string())
        .with_field("employee_salary", salary.to_string())
}

/// A raw payload in the write-endpoint schema (short keys, number
/// typed), as the upstream create/update endpoints produce it.
pub fn raw_write_schema(id: Option<RecordId>, name: &str, age: i64, salary: u64) -> RawRecord {
    let raw = RawRecord::new()
        .with_field("name", name)
        .with_field("age", age)
        .with_field("salary", salary);
    match id {
        Some(id) => raw.with_field("id", id),
        None => raw,
    }
}
