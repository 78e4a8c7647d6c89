//! Raw documents as the schemaless store hands them out.

use serde_json::{Map, Value};

/// A schemaless record: field name to arbitrary JSON value.
///
/// Nothing about the shape is guaranteed. Use
/// [`normalize_document`](crate::normalize::normalize_document) or
/// [`Product::from_document`](crate::Product::from_document) before exposing
/// one to clients.
pub type RawDocument = Map<String, Value>;

/// Collection holding catalog products.
pub const PRODUCT_COLLECTION: &str = "product";

/// Key under which the store places its native identifier.
pub const NATIVE_ID_KEY: &str = "_id";

/// Key of the canonical string identifier exposed to clients.
pub const ID_KEY: &str = "id";

/// Build a raw document from `(key, value)` pairs.
///
/// ```
/// use serde_json::json;
/// use vitrine_core::document;
///
/// let doc = document([("title", json!("Lamp")), ("price", json!(12))]);
/// assert_eq!(doc.len(), 2);
/// ```
pub fn document<K, I>(fields: I) -> RawDocument
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
