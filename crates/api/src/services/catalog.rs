//! Product catalog operations.

use thiserror::Error;
use vitrine_core::normalize::identifier::from_external;
use vitrine_core::{DraftError, NormalizeError, PRODUCT_COLLECTION, Product, ProductDraft};

use super::seed::{SeedInitializer, SeedRun};
use crate::db::{StoreError, StoreHandle};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A write needs a store and none is available.
    #[error("Database not available")]
    ServiceUnavailable,

    /// No product with this id.
    #[error("Product {0} not found")]
    NotFound(String),

    /// Client input does not fit the product shape.
    #[error("{0}")]
    Validation(String),

    /// The backend failed.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => Self::ServiceUnavailable,
            other => Self::Store(other),
        }
    }
}

impl From<NormalizeError> for CatalogError {
    /// A stored document that does not normalize is bad data on our side,
    /// not bad input.
    fn from(err: NormalizeError) -> Self {
        Self::Store(StoreError::DataCorruption(err.to_string()))
    }
}

impl From<DraftError> for CatalogError {
    fn from(err: DraftError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Catalog service over the product collection.
#[derive(Debug)]
pub struct Catalog {
    store: StoreHandle,
    seeder: SeedInitializer,
}

impl Catalog {
    /// Create a catalog over `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            seeder: SeedInitializer::new(PRODUCT_COLLECTION),
        }
    }

    /// The underlying store handle.
    #[must_use]
    pub const fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// The seed initializer for the product collection.
    #[must_use]
    pub const fn seeder(&self) -> &SeedInitializer {
        &self.seeder
    }

    /// All products, seeding the demo dataset on first sight of an empty
    /// collection. Empty without a store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure or if a stored
    /// document does not normalize.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if !self.store.is_available() {
            return Ok(Vec::new());
        }

        let mut docs = self.store.get_documents(PRODUCT_COLLECTION).await?;
        if docs.is_empty() {
            if let SeedRun::Inserted(count) = self.seeder.ensure_seeded(&self.store).await? {
                tracing::info!(count, "Demo products inserted");
            }
            docs = self.store.get_documents(PRODUCT_COLLECTION).await?;
        } else {
            self.seeder.mark_populated().await;
        }

        docs.into_iter()
            .map(|doc| Product::from_document(doc).map_err(CatalogError::from))
            .collect()
    }

    /// Validate and store a new product, returning it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for a negative price,
    /// [`CatalogError::ServiceUnavailable`] without a store, or
    /// [`CatalogError::Store`] on backend failure.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let record = draft.validate()?;
        let id = self
            .store
            .create_document(
                PRODUCT_COLLECTION,
                record.into_document().map_err(StoreError::from)?,
            )
            .await?;

        let doc = self
            .store
            .find_document(PRODUCT_COLLECTION, id)
            .await?
            .ok_or_else(|| {
                CatalogError::Store(StoreError::DataCorruption(format!(
                    "created document {id} could not be read back"
                )))
            })?;

        let product = Product::from_document(doc)?;
        tracing::info!(id = %product.id, title = %product.title, "Product created");
        Ok(product)
    }

    /// Look a product up by its external id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is malformed or unknown
    /// (including when no store is available).
    pub async fn get_product(&self, raw_id: &str) -> Result<Product, CatalogError> {
        let not_found = || CatalogError::NotFound(raw_id.to_owned());
        let id = from_external(raw_id).map_err(|_| not_found())?;

        let doc = self
            .store
            .find_document(PRODUCT_COLLECTION, id)
            .await?
            .ok_or_else(not_found)?;
        Ok(Product::from_document(doc)?)
    }
}
