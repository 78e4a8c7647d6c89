//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::RawDocument;
use crate::normalize::{self, NormalizeError};
use crate::types::{Price, PriceError, ProductId};

/// A product as the API exposes it.
///
/// Every field is populated: stored documents missing a field get its
/// default during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl Product {
    /// Normalize a raw store document into a product.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizeError`] if a field has the wrong type, a
    /// non-nullable field is `null`, or the document carries no identifier.
    pub fn from_document(doc: RawDocument) -> Result<Self, NormalizeError> {
        let record = normalize::normalize_record(doc)?;
        let id = record.id.ok_or(NormalizeError::MissingId)?;
        Ok(Self {
            id,
            title: record.title,
            price: record.price,
            category: record.category,
            description: record.description,
            image: record.image,
            in_stock: record.in_stock,
        })
    }
}

impl TryFrom<RawDocument> for Product {
    type Error = NormalizeError;

    fn try_from(doc: RawDocument) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}

/// A fully defaulted product whose identifier may not be assigned yet.
///
/// This is both the output of the record normalizer and the shape written to
/// the store on create (with `id` left out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

/// A record could not be rendered as a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record could not be encoded: {0}")]
pub struct EncodeError(String);

impl ProductRecord {
    /// Render the record as a raw document.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if serialization fails or does not produce a
    /// JSON object.
    pub fn into_document(self) -> Result<RawDocument, EncodeError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(EncodeError(format!("expected an object, got {other}"))),
            Err(e) => Err(EncodeError(e.to_string())),
        }
    }
}

/// Errors that can occur when validating a [`ProductDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Body of a create request: product fields minus the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl ProductDraft {
    /// Validate the draft and turn it into a record ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Price`] if the price is negative.
    pub fn validate(self) -> Result<ProductRecord, DraftError> {
        Ok(ProductRecord {
            id: None,
            title: self.title,
            price: Price::new(self.price)?,
            category: self.category,
            description: self.description,
            image: self.image,
            in_stock: self.in_stock,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::{NATIVE_ID_KEY, document};
    use crate::normalize::identifier::to_native;

    fn draft(price: i64) -> ProductDraft {
        serde_json::from_value(json!({
            "title": "Desk Lamp",
            "price": price,
            "category": "Lighting",
        }))
        .unwrap()
    }

    #[test]
    fn test_draft_defaults() {
        let draft = draft(40);
        assert!(draft.in_stock);
        assert_eq!(draft.description, None);
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_draft_rejects_negative_price() {
        assert!(matches!(
            draft(-5).validate(),
            Err(DraftError::Price(PriceError::Negative(_)))
        ));
    }

    #[test]
    fn test_draft_requires_title() {
        let result = serde_json::from_value::<ProductDraft>(json!({
            "price": 1,
            "category": "Lighting",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_document_has_no_id_key() {
        let doc = draft(40).validate().unwrap().into_document().unwrap();
        assert!(!doc.contains_key("id"));
        assert_eq!(doc.get("description"), Some(&Value::Null));
        assert_eq!(doc.get("in_stock"), Some(&json!(true)));
    }

    #[test]
    fn test_into_document_writes_every_field() {
        let doc = draft(40).validate().unwrap().into_document().unwrap();
        let mut keys: Vec<_> = doc.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["category", "description", "image", "in_stock", "price", "title"]
        );
        assert_eq!(doc.get("price"), Some(&json!(40.0)));
    }

    #[test]
    fn test_encode_error_surfaces_through_normalize() {
        let err: NormalizeError = EncodeError("not an object".into()).into();
        assert_eq!(err.to_string(), "record could not be encoded: not an object");
    }

    #[test]
    fn test_from_document_requires_id() {
        let doc = document([("title", json!("Lamp"))]);
        assert!(matches!(
            Product::from_document(doc),
            Err(NormalizeError::MissingId)
        ));
    }

    #[test]
    fn test_from_document_fills_everything() {
        let id = ProductId::generate();
        let product = Product::from_document(document([(NATIVE_ID_KEY, to_native(id))])).unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.title, "Untitled");
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.category, "General");
        assert_eq!(product.description, None);
        assert_eq!(product.image, None);
        assert!(product.in_stock);
    }

    #[test]
    fn test_product_json_shape() {
        let id = ProductId::generate();
        let product = Product::from_document(document([
            (NATIVE_ID_KEY, to_native(id)),
            ("title", json!("Lamp")),
            ("price", json!(12.5)),
        ]))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({
                "id": id.to_string(),
                "title": "Lamp",
                "price": 12.5,
                "category": "General",
                "description": null,
                "image": null,
                "in_stock": true,
            })
        );
    }
}
