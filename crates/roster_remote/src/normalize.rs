//! Schema-tolerant normalization of raw payloads.
//!
//! The upstream service is known to answer with either of two
//! field-name schemas, and numerics may be string-typed. Normalization
//! accepts both, coerces what it can, and defaults the rest: missing
//! or malformed numerics become 0, a missing name becomes the empty
//! string. It never fails; at worst it produces degraded data that the
//! next successful refresh replaces.

use crate::raw::RawRecord;
use roster_store::{Record, RecordFields};
use serde_json::Value;

/// Accepted keys for each logical field, in lookup order.
const ID_KEYS: &[&str] = &["id", "employee_id"];
const NAME_KEYS: &[&str] = &["name", "employee_name"];
const AGE_KEYS: &[&str] = &["age", "employee_age"];
const SALARY_KEYS: &[&str] = &["salary", "employee_salary"];

/// Coerces a JSON value to an integer.
///
/// Accepts integer numbers, float numbers (truncated), and strings
/// that parse as either. Everything else is `None`.
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Normalizes a raw payload into a [`Record`].
///
/// A payload with a usable `id` normalizes to a `Synced` row carrying
/// it; one without normalizes to a `Pending` row with no identifier
/// (degraded data — the remote owns the canonical set, so convergence
/// comes from the next refresh).
pub fn record_from_raw(raw: &RawRecord) -> Record {
    let id = raw.first_of(ID_KEYS).and_then(coerce_i64);

    let name = raw
        .first_of(NAME_KEYS)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let age = raw.first_of(AGE_KEYS).and_then(coerce_i64).unwrap_or(0);
    let salary = raw
        .first_of(SALARY_KEYS)
        .and_then(coerce_i64)
        .unwrap_or(0)
        .max(0) as u64;

    let fields = RecordFields { name, age, salary };
    match id {
        Some(id) => Record::synced(id, fields),
        None => Record::pending(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(value)
    }

    #[test]
    fn read_schema_with_string_numerics() {
        let record = record_from_raw(&raw(json!({
            "id": "7",
            "employee_name": "Ann",
            "employee_age": "30",
            "employee_salary": "50000",
        })));

        assert_eq!(record.id, Some(7));
        assert_eq!(record.name, "Ann");
        assert_eq!(record.age, 30);
        assert_eq!(record.salary, 50_000);
        assert!(record.is_synced());
    }

    #[test]
    fn write_schema_without_id() {
        let record = record_from_raw(&raw(json!({
            "name": "Bo",
            "age": 25,
            "salary": 40000,
        })));

        assert_eq!(record.id, None);
        assert_eq!(record.name, "Bo");
        assert_eq!(record.age, 25);
        assert_eq!(record.salary, 40_000);
        assert!(!record.is_synced());
    }

    #[test]
    fn short_schema_wins_when_both_present() {
        let record = record_from_raw(&raw(json!({
            "name": "Ann",
            "employee_name": "ignored",
            "age": 30,
            "employee_age": 99,
        })));

        assert_eq!(record.name, "Ann");
        assert_eq!(record.age, 30);
    }

    #[test]
    fn missing_fields_default() {
        let record = record_from_raw(&RawRecord::new());
        assert_eq!(record.id, None);
        assert_eq!(record.name, "");
        assert_eq!(record.age, 0);
        assert_eq!(record.salary, 0);
    }

    #[test]
    fn malformed_fields_degrade() {
        let record = record_from_raw(&raw(json!({
            "id": {"nested": true},
            "name": 12,
            "age": "not a number",
            "salary": [1, 2],
        })));

        assert_eq!(record.id, None);
        assert_eq!(record.name, "");
        assert_eq!(record.age, 0);
        assert_eq!(record.salary, 0);
    }

    #[test]
    fn negative_salary_clamps_to_zero() {
        let record = record_from_raw(&raw(json!({
            "id": 3,
            "name": "Cy",
            "age": 40,
            "salary": -100,
        })));
        assert_eq!(record.salary, 0);
    }

    #[test]
    fn float_numerics_truncate() {
        let record = record_from_raw(&raw(json!({
            "id": 5.0,
            "name": "Dee",
            "age": "27.9",
            "salary": 41000.5,
        })));
        assert_eq!(record.id, Some(5));
        assert_eq!(record.age, 27);
        assert_eq!(record.salary, 41_000);
    }
}
