//! In-process document store.
//!
//! Everything lives behind one `RwLock`, so the conditional bulk insert is
//! atomic for free. Data is lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrine_core::normalize::identifier::to_native;
use vitrine_core::{NATIVE_ID_KEY, ProductId, RawDocument};

use super::{DocumentStore, SeedOutcome, StoreError, strip_ids};

type Collection = Vec<(ProductId, RawDocument)>;

/// Document store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Collection>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_native_id(id: ProductId, body: &RawDocument) -> RawDocument {
        let mut doc = body.clone();
        doc.insert(NATIVE_ID_KEY.to_owned(), to_native(id));
        doc
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn create_document(
        &self,
        collection: &str,
        record: RawDocument,
    ) -> Result<ProductId, StoreError> {
        let id = ProductId::generate();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push((id, strip_ids(record)));
        Ok(id)
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or_else(Vec::new, |docs| {
            docs.iter()
                .map(|(id, body)| Self::with_native_id(*id, body))
                .collect()
        }))
    }

    async fn find_document(
        &self,
        collection: &str,
        id: ProductId,
    ) -> Result<Option<RawDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| *doc_id == id)
                .map(|(doc_id, body)| Self::with_native_id(*doc_id, body))
        }))
    }

    async fn insert_many_if_empty(
        &self,
        collection: &str,
        records: Vec<RawDocument>,
    ) -> Result<SeedOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();
        if !docs.is_empty() {
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let ids: Vec<ProductId> = records
            .into_iter()
            .map(|record| {
                let id = ProductId::generate();
                docs.push((id, strip_ids(record)));
                id
            })
            .collect();
        Ok(SeedOutcome::Inserted(ids))
    }
}
