//! The loosely-typed field bag crossing the remote boundary.

use roster_store::RecordFields;
use serde_json::{Map, Value};

/// A raw record payload as the upstream service produces it.
///
/// The shape is deliberately untyped: the service's read endpoint uses
/// one field-name schema, its write endpoints another, and numerics may
/// arrive as strings. [`record_from_raw`](crate::record_from_raw)
/// absorbs all of that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Creates an empty field bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Interprets a JSON value as a field bag.
    ///
    /// Anything other than an object degrades to an empty bag; the
    /// boundary never fails on malformed shape.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Builds the outbound `{name, age, salary}` payload for a create
    /// or update request body.
    pub fn from_fields(fields: &RecordFields) -> Self {
        let mut map = Map::new();
        map.insert("name".into(), Value::from(fields.name.clone()));
        map.insert("age".into(), Value::from(fields.age));
        map.insert("salary".into(), Value::from(fields.salary));
        Self(map)
    }

    /// Adds a field, builder-style. Used by tests and mocks.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Looks up a field by exact key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up the first present key out of `keys`.
    pub fn first_of<'a>(&'a self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.0.get(*key))
    }

    /// Consumes the bag, returning the underlying JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_degrades_non_objects() {
        assert_eq!(RawRecord::from_value(Value::Null), RawRecord::new());
        assert_eq!(
            RawRecord::from_value(Value::from("not an object")),
            RawRecord::new()
        );
    }

    #[test]
    fn from_fields_uses_write_schema() {
        let raw = RawRecord::from_fields(&RecordFields::new("Ann", 30, 50_000));
        assert_eq!(raw.get("name"), Some(&Value::from("Ann")));
        assert_eq!(raw.get("age"), Some(&Value::from(30)));
        assert_eq!(raw.get("salary"), Some(&Value::from(50_000)));
        assert_eq!(raw.get("id"), None);
    }

    #[test]
    fn first_of_prefers_earlier_keys() {
        let raw = RawRecord::new()
            .with_field("name", "short")
            .with_field("employee_name", "long");
        assert_eq!(
            raw.first_of(&["name", "employee_name"]),
            Some(&Value::from("short"))
        );
        assert_eq!(
            raw.first_of(&["missing", "employee_name"]),
            Some(&Value::from("long"))
        );
        assert_eq!(raw.first_of(&["absent"]), None);
    }
}
