//! Default filling for stored product documents.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::NormalizeError;
use crate::document::RawDocument;
use crate::product::ProductRecord;
use crate::types::{Price, ProductId};

/// Title given to stored products that have none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Category given to stored products that have none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Stock flag given to stored products that have none.
pub const DEFAULT_IN_STOCK: bool = true;

/// Every product field as it may appear in storage.
///
/// The outer `Option` is `None` when the key is absent and the inner one is
/// `None` when the key holds an explicit `null`. Keys not listed here are
/// dropped.
#[derive(Debug, Default, Deserialize)]
struct StoredProductFields {
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    price: Option<Option<Price>>,
    #[serde(default, deserialize_with = "present")]
    category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    in_stock: Option<Option<bool>>,
}

/// Marks a key as present, keeping `null` distinguishable from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Value of a non-nullable field: the default only when the key is absent.
fn or_default<T>(
    field: Option<Option<T>>,
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, NormalizeError> {
    match field {
        None => Ok(default()),
        Some(Some(value)) => Ok(value),
        Some(None) => Err(NormalizeError::NullField(name)),
    }
}

impl StoredProductFields {
    fn fill_defaults(self) -> Result<ProductRecord, NormalizeError> {
        let Self {
            id,
            title,
            price,
            category,
            description,
            image,
            in_stock,
        } = self;

        Ok(ProductRecord {
            id,
            title: or_default(title, "title", || DEFAULT_TITLE.to_owned())?,
            price: or_default(price, "price", || Price::ZERO)?,
            category: or_default(category, "category", || DEFAULT_CATEGORY.to_owned())?,
            description: description.flatten(),
            image: image.flatten(),
            in_stock: or_default(in_stock, "in_stock", || DEFAULT_IN_STOCK)?,
        })
    }
}

/// Decode a canonicalized document and fill its defaults.
pub(super) fn fill(doc: RawDocument) -> Result<ProductRecord, NormalizeError> {
    let fields: StoredProductFields = serde_json::from_value(Value::Object(doc))
        .map_err(|e| NormalizeError::InvalidField(e.to_string()))?;
    fields.fill_defaults()
}
