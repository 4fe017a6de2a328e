//! Property-based test generators using proptest.

use proptest::prelude::*;
use roster_remote::RawRecord;
use roster_store::{Record, RecordFields};
use serde_json::Value;

/// Strategy for plausible display names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][a-z]{0,11}").expect("invalid regex")
}

/// Strategy for plausible ages.
pub fn age_strategy() -> impl Strategy<Value = i64> {
    0i64..=120
}

/// Strategy for plausible salaries.
pub fn salary_strategy() -> impl Strategy<Value = u64> {
    0u64..=1_000_000
}

/// Strategy for user-editable field sets.
pub fn fields_strategy() -> impl Strategy<Value = RecordFields> {
    (name_strategy(), age_strategy(), salary_strategy())
        .prop_map(|(name, age, salary)| RecordFields { name, age, salary })
}

/// Strategy for synced rows with server-style positive identifiers.
pub fn synced_record_strategy() -> impl Strategy<Value = Record> {
    (1i64..=100_000, fields_strategy()).prop_map(|(id, fields)| Record::synced(id, fields))
}

/// Strategy for well-formed raw payloads: either upstream schema, with
/// numerics randomly number- or string-typed, id present or absent.
pub fn raw_record_strategy() -> impl Strategy<Value = RawRecord> {
    (
        prop::option::of(1i64..=100_000),
        fields_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(id, fields, long_schema, stringly)| {
            let (name_key, age_key, salary_key) = if long_schema {
                ("employee_name", "employee_age", "employee_salary")
            } else {
                ("name", "age", "salary")
            };
            let numeric = |n: i64| -> Value {
                if stringly {
                    Value::from(n.to_string())
                } else {
                    Value::from(n)
                }
            };
            let mut raw = RawRecord::new()
                .with_field(name_key, fields.name)
                .with_field(age_key, numeric(fields.age))
                .with_field(salary_key, numeric(fields.salary as i64));
            if let Some(id) = id {
                raw = raw.with_field("id", numeric(id));
            }
            raw
        })
}

/// Strategy for arbitrary JSON scalars, for hostile-payload tests.
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::from),
        ".{0,20}".prop_map(Value::from),
    ]
}

/// Strategy for arbitrary field bags with no schema at all.
///
/// Use to check that normalization degrades instead of panicking.
pub fn arbitrary_raw_strategy() -> impl Strategy<Value = RawRecord> {
    prop::collection::btree_map("[a-z_]{1,16}", scalar_strategy(), 0..8).prop_map(|entries| {
        let mut raw = RawRecord::new();
        for (key, value) in entries {
            raw = raw.with_field(key, value);
        }
        raw
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_remote::record_from_raw;

    proptest! {
        #[test]
        fn normalization_never_panics(raw in arbitrary_raw_strategy()) {
            let _ = record_from_raw(&raw);
        }

        #[test]
        fn well_formed_payloads_round_trip(raw in raw_record_strategy()) {
            let record = record_from_raw(&raw);
            // A payload with an id normalizes to a synced row; one
            // without stays pending.
            prop_assert_eq!(record.is_synced(), record.id.is_some());
            prop_assert!(record.age >= 0);
        }

        #[test]
        fn generated_records_are_well_formed(record in synced_record_strategy()) {
            prop_assert!(record.id.unwrap() > 0);
            prop_assert!(!record.name.is_empty());
            prop_assert!(record.is_synced());
        }
    }
}
