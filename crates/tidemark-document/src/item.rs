//! Caller-identified configuration items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentError, DocumentResult};

/// One caller-identified JSON object stored inside a document.
///
/// The `id` field is the addressing handle and is strongly typed;
/// every other field passes through opaquely in `fields`. The store
/// never generates ids — callers assign them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Create an item with the given id and no other fields.
    pub fn new(id: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Decode an item from a JSON value.
    ///
    /// Fails when the value is not an object or its `id` is absent or
    /// not a string.
    pub fn from_value(value: Value) -> DocumentResult<Item> {
        serde_json::from_value(value).map_err(|e| DocumentError::MalformedItem(e.to_string()))
    }

    /// Decode an item from an already-parsed JSON object.
    pub fn from_object(object: Map<String, Value>) -> DocumentResult<Item> {
        let id = match object.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                return Err(DocumentError::MalformedItem(
                    "missing string id field".to_string(),
                ));
            }
        };
        let mut fields = object;
        fields.remove("id");
        Ok(Item { id, fields })
    }

    /// Lower the item into a plain JSON object, id included.
    pub fn into_object(self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id));
        for (key, value) in self.fields {
            if key != "id" {
                object.insert(key, value);
            }
        }
        object
    }

    /// Lower the item into a JSON value, id included.
    pub fn to_value(&self) -> Value {
        Value::Object(self.clone().into_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_extracts_id() {
        let item = Item::from_value(json!({"id": "r1", "name": "Ellinia"})).unwrap();
        assert_eq!(item.id, "r1");
        assert_eq!(item.fields.get("name"), Some(&json!("Ellinia")));
        assert!(!item.fields.contains_key("id"));
    }

    #[test]
    fn from_value_rejects_missing_id() {
        assert!(Item::from_value(json!({"name": "Ellinia"})).is_err());
    }

    #[test]
    fn from_value_rejects_numeric_id() {
        assert!(Item::from_value(json!({"id": 7})).is_err());
    }

    #[test]
    fn from_value_rejects_non_object() {
        assert!(Item::from_value(json!(["r1"])).is_err());
    }

    #[test]
    fn into_object_round_trips() {
        let item = Item::from_value(json!({"id": "r1", "name": "Ellinia"})).unwrap();
        let object = item.clone().into_object();
        assert_eq!(object.get("id"), Some(&json!("r1")));
        assert_eq!(Item::from_object(object).unwrap(), item);
    }

    #[test]
    fn from_object_rejects_missing_id() {
        let mut object = Map::new();
        object.insert("name".to_string(), json!("Ellinia"));
        assert!(Item::from_object(object).is_err());
    }
}
