//! Payload shapes and the pure item-level operations over them.
//!
//! The stored payload keeps whichever shape it was written with: a
//! document created from a single item holds a bare object, and is
//! promoted to an array on the second insert. Both shapes stay
//! addressable by item id through the same operations.

use serde_json::{Map, Value};

use crate::error::{DocumentError, DocumentResult};
use crate::item::Item;

/// Classification of a document's payload.
///
/// Derived from the payload on every read, never persisted. `Empty`
/// means no document row exists for the (tenant, resource name) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Empty,
    Singleton,
    Collection,
}

impl Shape {
    /// Classify an optionally-present payload.
    pub fn of(payload: Option<&Payload>) -> Shape {
        match payload {
            None => Shape::Empty,
            Some(p) => p.shape(),
        }
    }
}

/// Decoded document payload: the `data` member of
/// `{"data": <object> | <array>}`.
///
/// Collection elements are kept as raw values, not parsed items, so
/// that elements which are not addressable (non-objects, objects
/// without a string id) survive rewrites verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Singleton(Map<String, Value>),
    Collection(Vec<Value>),
}

/// Outcome of removing an item by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// No element matched the id.
    NotFound,
    /// Matching elements were filtered out of the collection. The
    /// rewritten payload must be persisted; it may hold an empty array.
    Filtered,
    /// The singleton itself matched. The payload is left untouched —
    /// the caller deletes the whole document row instead of persisting
    /// an emptied payload.
    WholeDocument,
}

impl Payload {
    /// Build the initial singleton payload for a first insert.
    pub fn singleton(item: Item) -> Payload {
        Payload::Singleton(item.into_object())
    }

    /// Decode a raw `{"data": ...}` payload value.
    ///
    /// A `data` member of any type other than object or array is a
    /// decode error; such payloads cannot be addressed by item id.
    pub fn from_value(raw: &Value) -> DocumentResult<Payload> {
        let data = raw.get("data").ok_or(DocumentError::MissingData)?;
        match data {
            Value::Object(object) => Ok(Payload::Singleton(object.clone())),
            Value::Array(elements) => Ok(Payload::Collection(elements.clone())),
            _ => Err(DocumentError::UnsupportedData),
        }
    }

    /// Encode back to the stored `{"data": ...}` form.
    pub fn to_value(&self) -> Value {
        let data = match self {
            Payload::Singleton(object) => Value::Object(object.clone()),
            Payload::Collection(elements) => Value::Array(elements.clone()),
        };
        let mut raw = Map::new();
        raw.insert("data".to_string(), data);
        Value::Object(raw)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Payload::Singleton(_) => Shape::Singleton,
            Payload::Collection(_) => Shape::Collection,
        }
    }

    /// First element addressable by `id`, in stored order.
    ///
    /// Elements that are not objects, or that lack a string `id`, never
    /// match.
    pub fn find(&self, id: &str) -> Option<&Map<String, Value>> {
        match self {
            Payload::Singleton(object) => matches_id(object, id).then_some(object),
            Payload::Collection(elements) => {
                elements.iter().find_map(|e| as_matching_object(e, id))
            }
        }
    }

    /// All addressable items, in stored order.
    ///
    /// Collection elements that are not objects, or that lack a string
    /// id, are omitted from listings (they still survive rewrites). A
    /// singleton lists as a one-element sequence.
    pub fn items(&self) -> Vec<Map<String, Value>> {
        match self {
            Payload::Singleton(object) => vec![object.clone()],
            Payload::Collection(elements) => elements
                .iter()
                .filter_map(Value::as_object)
                .filter(|object| object.get("id").and_then(Value::as_str).is_some())
                .cloned()
                .collect(),
        }
    }

    /// Append `item`, promoting a singleton to a two-element collection
    /// with the existing item first.
    ///
    /// An id that is already addressable in the payload is rejected.
    pub fn insert(&mut self, item: Item) -> DocumentResult<()> {
        if self.find(&item.id).is_some() {
            return Err(DocumentError::DuplicateId(item.id));
        }
        match self {
            Payload::Singleton(existing) => {
                let existing = std::mem::take(existing);
                *self = Payload::Collection(vec![Value::Object(existing), item.to_value()]);
            }
            Payload::Collection(elements) => {
                elements.push(item.to_value());
            }
        }
        Ok(())
    }

    /// Replace the first element matching `id`. Later duplicates, if
    /// the payload predates duplicate rejection, are left untouched.
    /// Returns `false` when nothing matched.
    pub fn replace(&mut self, id: &str, item: Item) -> bool {
        match self {
            Payload::Singleton(object) => {
                if matches_id(object, id) {
                    *object = item.into_object();
                    true
                } else {
                    false
                }
            }
            Payload::Collection(elements) => {
                match elements
                    .iter()
                    .position(|e| as_matching_object(e, id).is_some())
                {
                    Some(index) => {
                        elements[index] = item.to_value();
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Remove every element matching `id`.
    ///
    /// Non-matching elements, including ones that are not addressable
    /// items, are preserved verbatim.
    pub fn remove(&mut self, id: &str) -> Removal {
        match self {
            Payload::Singleton(object) => {
                if matches_id(object, id) {
                    Removal::WholeDocument
                } else {
                    Removal::NotFound
                }
            }
            Payload::Collection(elements) => {
                let before = elements.len();
                elements.retain(|e| as_matching_object(e, id).is_none());
                if elements.len() < before {
                    Removal::Filtered
                } else {
                    Removal::NotFound
                }
            }
        }
    }
}

fn matches_id(object: &Map<String, Value>, id: &str) -> bool {
    object.get("id").and_then(Value::as_str) == Some(id)
}

fn as_matching_object<'a>(value: &'a Value, id: &str) -> Option<&'a Map<String, Value>> {
    value.as_object().filter(|object| matches_id(object, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, name: &str) -> Item {
        Item::from_value(json!({"id": id, "name": name})).unwrap()
    }

    fn collection(elements: Vec<Value>) -> Payload {
        Payload::from_value(&json!({"data": elements})).unwrap()
    }

    // ── Decoding ───────────────────────────────────────────────────

    #[test]
    fn decode_singleton() {
        let payload = Payload::from_value(&json!({"data": {"id": "r1"}})).unwrap();
        assert_eq!(payload.shape(), Shape::Singleton);
    }

    #[test]
    fn decode_collection() {
        let payload = Payload::from_value(&json!({"data": [{"id": "r1"}]})).unwrap();
        assert_eq!(payload.shape(), Shape::Collection);
    }

    #[test]
    fn decode_empty_collection() {
        let payload = Payload::from_value(&json!({"data": []})).unwrap();
        assert_eq!(payload.shape(), Shape::Collection);
        assert!(payload.items().is_empty());
    }

    #[test]
    fn decode_rejects_missing_data() {
        assert_eq!(
            Payload::from_value(&json!({"items": []})),
            Err(DocumentError::MissingData)
        );
    }

    #[test]
    fn decode_rejects_scalar_data() {
        assert_eq!(
            Payload::from_value(&json!({"data": 42})),
            Err(DocumentError::UnsupportedData)
        );
    }

    #[test]
    fn shape_of_absent_payload_is_empty() {
        assert_eq!(Shape::of(None), Shape::Empty);
    }

    // ── Find ───────────────────────────────────────────────────────

    #[test]
    fn find_in_singleton() {
        let payload = Payload::singleton(item("r1", "A"));
        assert!(payload.find("r1").is_some());
        assert!(payload.find("r2").is_none());
    }

    #[test]
    fn find_first_match_in_collection() {
        let payload = collection(vec![
            json!({"id": "r1", "name": "first"}),
            json!({"id": "r2", "name": "second"}),
            json!({"id": "r1", "name": "shadowed"}),
        ]);
        let found = payload.find("r1").unwrap();
        assert_eq!(found.get("name"), Some(&json!("first")));
    }

    #[test]
    fn find_skips_unaddressable_elements() {
        let payload = collection(vec![
            json!("stray string"),
            json!({"name": "no id"}),
            json!({"id": 7}),
            json!({"id": "r1"}),
        ]);
        assert!(payload.find("r1").is_some());
    }

    // ── Listing ────────────────────────────────────────────────────

    #[test]
    fn items_preserve_stored_order() {
        let payload = collection(vec![json!({"id": "r1"}), json!({"id": "r2"})]);
        let ids: Vec<_> = payload
            .items()
            .iter()
            .map(|o| o.get("id").unwrap().clone())
            .collect();
        assert_eq!(ids, vec![json!("r1"), json!("r2")]);
    }

    #[test]
    fn items_drop_unaddressable_elements() {
        let payload = collection(vec![
            json!({"id": "r1"}),
            json!("stray string"),
            json!({"name": "no id"}),
        ]);
        assert_eq!(payload.items().len(), 1);
    }

    #[test]
    fn items_of_singleton_is_one_element() {
        let payload = Payload::singleton(item("r1", "A"));
        assert_eq!(payload.items().len(), 1);
    }

    // ── Insert ─────────────────────────────────────────────────────

    #[test]
    fn insert_promotes_singleton_to_collection() {
        let mut payload = Payload::singleton(item("r1", "A"));
        payload.insert(item("r2", "B")).unwrap();

        assert_eq!(payload.shape(), Shape::Collection);
        let ids: Vec<_> = payload
            .items()
            .iter()
            .map(|o| o.get("id").unwrap().clone())
            .collect();
        assert_eq!(ids, vec![json!("r1"), json!("r2")]);
    }

    #[test]
    fn insert_appends_to_collection() {
        let mut payload = collection(vec![json!({"id": "r1"})]);
        payload.insert(item("r2", "B")).unwrap();
        assert_eq!(payload.items().len(), 2);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut payload = Payload::singleton(item("r1", "A"));
        assert_eq!(
            payload.insert(item("r1", "B")),
            Err(DocumentError::DuplicateId("r1".to_string()))
        );

        payload.insert(item("r2", "B")).unwrap();
        assert_eq!(
            payload.insert(item("r2", "C")),
            Err(DocumentError::DuplicateId("r2".to_string()))
        );
    }

    // ── Replace ────────────────────────────────────────────────────

    #[test]
    fn replace_singleton_on_id_match() {
        let mut payload = Payload::singleton(item("r1", "A"));
        assert!(payload.replace("r1", item("r1", "B")));
        assert_eq!(payload.find("r1").unwrap().get("name"), Some(&json!("B")));
    }

    #[test]
    fn replace_singleton_miss_leaves_payload() {
        let mut payload = Payload::singleton(item("r1", "A"));
        assert!(!payload.replace("r2", item("r2", "B")));
        assert_eq!(payload.find("r1").unwrap().get("name"), Some(&json!("A")));
    }

    #[test]
    fn replace_touches_first_match_only() {
        let mut payload = collection(vec![
            json!({"id": "r1", "name": "first"}),
            json!({"id": "r1", "name": "second"}),
        ]);
        assert!(payload.replace("r1", item("r1", "patched")));

        let Payload::Collection(elements) = &payload else {
            panic!("expected collection");
        };
        assert_eq!(elements[0].get("name"), Some(&json!("patched")));
        assert_eq!(elements[1].get("name"), Some(&json!("second")));
    }

    // ── Remove ─────────────────────────────────────────────────────

    #[test]
    fn remove_singleton_match_signals_whole_document() {
        let mut payload = Payload::singleton(item("r1", "A"));
        assert_eq!(payload.remove("r1"), Removal::WholeDocument);
        // The payload itself is untouched; row deletion is the caller's job.
        assert!(payload.find("r1").is_some());
    }

    #[test]
    fn remove_singleton_miss() {
        let mut payload = Payload::singleton(item("r1", "A"));
        assert_eq!(payload.remove("r2"), Removal::NotFound);
    }

    #[test]
    fn remove_filters_all_matches() {
        let mut payload = collection(vec![
            json!({"id": "r1"}),
            json!({"id": "r2"}),
            json!({"id": "r1"}),
        ]);
        assert_eq!(payload.remove("r1"), Removal::Filtered);
        assert_eq!(payload.items().len(), 1);
        assert!(payload.find("r1").is_none());
    }

    #[test]
    fn remove_last_element_leaves_empty_collection() {
        let mut payload = collection(vec![json!({"id": "r1"})]);
        assert_eq!(payload.remove("r1"), Removal::Filtered);
        assert_eq!(payload.shape(), Shape::Collection);
        assert!(payload.items().is_empty());
    }

    #[test]
    fn remove_preserves_unaddressable_elements() {
        let mut payload = collection(vec![
            json!("stray string"),
            json!({"id": "r1"}),
            json!({"name": "no id"}),
        ]);
        assert_eq!(payload.remove("r1"), Removal::Filtered);

        let Payload::Collection(elements) = &payload else {
            panic!("expected collection");
        };
        assert_eq!(elements, &vec![json!("stray string"), json!({"name": "no id"})]);
    }

    #[test]
    fn remove_miss_in_collection() {
        let mut payload = collection(vec![json!({"id": "r1"})]);
        assert_eq!(payload.remove("r2"), Removal::NotFound);
        assert_eq!(payload.items().len(), 1);
    }

    // ── Round trip ─────────────────────────────────────────────────

    #[test]
    fn to_value_round_trips() {
        let payload = collection(vec![json!({"id": "r1"}), json!("stray")]);
        let encoded = payload.to_value();
        assert_eq!(Payload::from_value(&encoded).unwrap(), payload);
    }
}
