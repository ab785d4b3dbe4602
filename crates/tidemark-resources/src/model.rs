//! The typed boundary between generic items and resource attribute sets.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use tidemark_document::Item;

/// Typed mapping for one resource name.
///
/// Implementations translate between the generic stored item
/// (`{"type": ..., "id": ..., "attributes": {...}}`) and a typed
/// attribute struct. Only the id participates in addressing; attribute
/// translation is a boundary concern and never feeds back into the
/// engine's decision logic.
pub trait ResourceModel: Serialize + DeserializeOwned + Send + Sized + 'static {
    /// Resource name this model binds to.
    const RESOURCE: &'static str;

    /// Item id.
    fn id(&self) -> &str;

    /// Build the typed model from a generic item.
    ///
    /// Coercion is lenient: absent or mistyped attributes become their
    /// zero values rather than errors.
    fn from_item(item: &Item) -> Self;

    /// Lower the typed model into a generic item for storage.
    fn into_item(self) -> Item;
}

/// The `attributes` object of an item, when present.
pub(crate) fn attributes(item: &Item) -> Option<&Map<String, Value>> {
    item.fields.get("attributes").and_then(Value::as_object)
}

/// String attribute; absent or non-string values coerce to empty.
pub(crate) fn str_attr(attrs: Option<&Map<String, Value>>, key: &str) -> String {
    attrs
        .and_then(|a| a.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Numeric attribute narrowed to u32; absent or non-numeric values
/// coerce to zero.
pub(crate) fn u32_attr(attrs: Option<&Map<String, Value>>, key: &str) -> u32 {
    attrs
        .and_then(|a| a.get(key))
        .and_then(Value::as_f64)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Numeric array attribute; non-numeric elements are dropped, absent
/// or non-array values coerce to empty.
pub(crate) fn u32_list_attr(attrs: Option<&Map<String, Value>>, key: &str) -> Vec<u32> {
    attrs
        .and_then(|a| a.get(key))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_f64)
                .map(|v| v as u32)
                .collect()
        })
        .unwrap_or_default()
}
