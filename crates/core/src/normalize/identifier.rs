//! Conversion between the store's native identifier and its string form.
//!
//! The store exposes record identifiers as an extended-JSON token,
//! `{"$uuid": "<hyphenated uuid>"}`, under the `_id` key. Clients only ever
//! see the hyphenated string under `id`.

use serde_json::{Value, json};

use crate::document::{ID_KEY, NATIVE_ID_KEY, RawDocument};
use crate::types::{IdError, ProductId};

/// Tag of the single-entry object wrapping a native identifier.
pub const NATIVE_ID_TAG: &str = "$uuid";

/// Encode an identifier the way the store keeps it.
#[must_use]
pub fn to_native(id: ProductId) -> Value {
    json!({ NATIVE_ID_TAG: id.to_string() })
}

/// Decode a native identifier token.
///
/// # Errors
///
/// Returns [`IdError::UnrecognizedNative`] if `value` is not a
/// `{"$uuid": ...}` object, or [`IdError::Malformed`] if the wrapped string
/// is not a hyphenated UUID.
pub fn from_native(value: &Value) -> Result<ProductId, IdError> {
    let inner = match value {
        Value::Object(map) if map.len() == 1 => map.get(NATIVE_ID_TAG).and_then(Value::as_str),
        _ => None,
    };
    let inner = inner.ok_or_else(|| IdError::UnrecognizedNative(value.to_string()))?;
    ProductId::parse(inner)
}

/// Canonical external form of an identifier.
#[must_use]
pub fn to_external(id: ProductId) -> String {
    id.to_string()
}

/// Parse a client-supplied identifier.
///
/// Not total: anything but the hyphenated UUID form is rejected. Callers
/// answering a lookup should report a rejection the same way as a missing
/// record.
///
/// # Errors
///
/// Returns [`IdError::Malformed`] if `s` is not a hyphenated UUID.
pub fn from_external(s: &str) -> Result<ProductId, IdError> {
    ProductId::parse(s)
}

/// Move the native `_id` token of a document to a string `id` field.
///
/// Documents without `_id` (or with a null one) are returned unchanged apart
/// from dropping the null. A native id overrides any `id` already present.
///
/// # Errors
///
/// Returns an [`IdError`] if `_id` holds something other than a native
/// identifier token.
pub fn canonicalize(mut doc: RawDocument) -> Result<RawDocument, IdError> {
    match doc.remove(NATIVE_ID_KEY) {
        None | Some(Value::Null) => Ok(doc),
        Some(native) => {
            let id = from_native(&native)?;
            doc.insert(ID_KEY.to_owned(), Value::String(to_external(id)));
            Ok(doc)
        }
    }
}
