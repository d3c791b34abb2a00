//! Log entries: flat JSON objects as they sit in the trip log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One object from the trip log.
///
/// Kept untyped so the report can walk ordered lists of candidate fields
/// and tolerate entries missing any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);

impl LogEntry {
    /// The raw value of a field, if present and not null.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// The first present field among `fields`, evaluated in order.
    pub fn first_of(&self, fields: &[&str]) -> Option<&Value> {
        fields.iter().find_map(|field| self.get(field))
    }

    /// The `reservation_type` tag, if the entry carries one as a string.
    pub fn reservation_type(&self) -> Option<&str> {
        self.get("reservation_type").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn entry(value: Value) -> LogEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn first_of_respects_order() {
        let e = entry(json!({"destination": "Sucre", "city": "La Paz"}));

        assert_eq!(e.first_of(&["city", "destination"]), Some(&json!("La Paz")));
        assert_eq!(e.first_of(&["destination", "city"]), Some(&json!("Sucre")));
    }

    #[test]
    fn null_fields_count_as_absent() {
        let e = entry(json!({"city": null, "destination": "Oruro"}));

        assert_eq!(e.first_of(&["city", "destination"]), Some(&json!("Oruro")));
        assert!(e.first_of(&["date"]).is_none());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_value::<LogEntry>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<LogEntry>(json!("flight")).is_err());
    }
}
