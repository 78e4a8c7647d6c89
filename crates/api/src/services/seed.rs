//! One-time demo data for an empty catalog.
//!
//! # States
//!
//! ```text
//! Unseeded ──(empty collection observed)──> Seeding ──(insert ok / already populated)──> Seeded
//!     ^                                        │
//!     └────────────(insert failed)─────────────┘
//! ```
//!
//! `Seeded` is terminal: once the collection has held a product, seeding
//! never runs again in this process, even if the collection is emptied
//! behind our back. Within a process a mutex serialises passes; across
//! processes the store's conditional insert guarantees a single winner.
//! Once `Seeded`, callers return without touching the mutex.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use vitrine_core::{EncodeError, Price, ProductRecord, RawDocument};

use crate::db::{SeedOutcome, StoreError, StoreHandle};

struct DemoProduct {
    title: &'static str,
    description: &'static str,
    price: u32,
    category: &'static str,
    image: &'static str,
}

const DEMO_PRODUCTS: [DemoProduct; 3] = [
    DemoProduct {
        title: "Carbon Wallet",
        description: "Slim carbon fiber wallet with RFID blocking.",
        price: 89,
        category: "Accessories",
        image: "https://images.unsplash.com/photo-1585401586477-2a671e1cae4e?ixlib=rb-4.1.0&w=1600&auto=format&fit=crop&q=80",
    },
    DemoProduct {
        title: "Monochrome Sneakers",
        description: "Minimalist sneakers with premium materials.",
        price: 159,
        category: "Footwear",
        image: "https://images.unsplash.com/photo-1519741497674-611481863552?q=80&w=1600&auto=format&fit=crop",
    },
    DemoProduct {
        title: "Minimal Watch",
        description: "Matte black timepiece with sapphire glass.",
        price: 129,
        category: "Watches",
        image: "https://images.unsplash.com/photo-1524805444758-089113d48a6d?q=80&w=1600&auto=format&fit=crop",
    },
];

/// The demo dataset, as documents ready for insertion.
///
/// # Errors
///
/// Returns [`EncodeError`] if a demo record cannot be encoded.
pub fn demo_documents() -> Result<Vec<RawDocument>, EncodeError> {
    DEMO_PRODUCTS
        .iter()
        .map(|p| {
            ProductRecord {
                id: None,
                title: p.title.to_owned(),
                price: Price::from(p.price),
                category: p.category.to_owned(),
                description: Some(p.description.to_owned()),
                image: Some(p.image.to_owned()),
                in_stock: true,
            }
            .into_document()
        })
        .collect()
}

/// Where the initializer is in its one-time bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedState {
    Unseeded,
    Seeding,
    Seeded,
}

/// What a call to [`SeedInitializer::ensure_seeded`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRun {
    /// This call inserted the demo dataset.
    Inserted(usize),
    /// Nothing to do: seeded earlier, or another writer got there first.
    Skipped,
}

/// Seeds one collection with the demo dataset, at most once.
#[derive(Debug)]
pub struct SeedInitializer {
    collection: String,
    seeded: AtomicBool,
    state: Mutex<SeedState>,
}

impl SeedInitializer {
    /// Create an initializer for `collection`.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            seeded: AtomicBool::new(false),
            state: Mutex::new(SeedState::Unseeded),
        }
    }

    fn is_seeded(&self) -> bool {
        self.seeded.load(Ordering::Acquire)
    }

    fn finish(&self, state: &mut SeedState) {
        *state = SeedState::Seeded;
        self.seeded.store(true, Ordering::Release);
    }

    /// Current state. Waits for an in-flight pass to finish.
    pub async fn state(&self) -> SeedState {
        if self.is_seeded() {
            return SeedState::Seeded;
        }
        *self.state.lock().await
    }

    /// Record that the collection was observed non-empty.
    pub async fn mark_populated(&self) {
        if self.is_seeded() {
            return;
        }
        let mut state = self.state.lock().await;
        if *state != SeedState::Seeded {
            tracing::debug!(collection = %self.collection, "Collection already populated");
            self.finish(&mut state);
        }
    }

    /// Insert the demo dataset unless this collection was ever populated.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the conditional insert fails; the
    /// initializer then goes back to `Unseeded` so a later call can retry.
    pub async fn ensure_seeded(&self, store: &StoreHandle) -> Result<SeedRun, StoreError> {
        if self.is_seeded() {
            return Ok(SeedRun::Skipped);
        }
        let mut state = self.state.lock().await;
        if *state == SeedState::Seeded {
            return Ok(SeedRun::Skipped);
        }

        let records = demo_documents()?;
        *state = SeedState::Seeding;
        tracing::info!(collection = %self.collection, "Seeding empty collection");

        match store.insert_many_if_empty(&self.collection, records).await {
            Ok(SeedOutcome::Inserted(ids)) => {
                self.finish(&mut state);
                tracing::info!(collection = %self.collection, inserted = ids.len(), "Seeding complete");
                Ok(SeedRun::Inserted(ids.len()))
            }
            Ok(SeedOutcome::AlreadyPopulated) => {
                self.finish(&mut state);
                tracing::info!(collection = %self.collection, "Collection populated concurrently, seeding skipped");
                Ok(SeedRun::Skipped)
            }
            Err(e) => {
                *state = SeedState::Unseeded;
                tracing::warn!(collection = %self.collection, error = %e, "Seeding failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::timeout;
    use vitrine_core::{PRODUCT_COLLECTION, ProductId, normalize_record};

    use super::*;
    use crate::db::{DocumentStore, MemoryDocumentStore};

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    #[async_trait]
    impl DocumentStore for ReadOnlyStore {
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }

        async fn create_document(
            &self,
            _collection: &str,
            _record: RawDocument,
        ) -> Result<ProductId, StoreError> {
            Err(StoreError::DataCorruption("read-only".into()))
        }

        async fn get_documents(&self, _collection: &str) -> Result<Vec<RawDocument>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_document(
            &self,
            _collection: &str,
            _id: ProductId,
        ) -> Result<Option<RawDocument>, StoreError> {
            Ok(None)
        }

        async fn insert_many_if_empty(
            &self,
            _collection: &str,
            _records: Vec<RawDocument>,
        ) -> Result<SeedOutcome, StoreError> {
            Err(StoreError::DataCorruption("read-only".into()))
        }
    }

    #[test]
    fn test_demo_documents_are_complete_products() {
        let docs = demo_documents().unwrap();
        assert_eq!(docs.len(), 3);

        for doc in docs {
            let record = normalize_record(doc).unwrap();
            assert!(record.id.is_none());
            assert!(record.in_stock);
            assert!(record.description.is_some());
            assert!(record.image.is_some_and(|url| url.starts_with("https://")));
        }
    }

    #[tokio::test]
    async fn test_seeds_once() {
        let store = StoreHandle::available(MemoryDocumentStore::new());
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
        assert_eq!(seeder.state().await, SeedState::Unseeded);

        assert_eq!(seeder.ensure_seeded(&store).await.unwrap(), SeedRun::Inserted(3));
        assert_eq!(seeder.state().await, SeedState::Seeded);
        assert_eq!(seeder.ensure_seeded(&store).await.unwrap(), SeedRun::Skipped);
        assert_eq!(store.get_documents(PRODUCT_COLLECTION).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_two_initializers_share_one_store() {
        // Stands in for two processes on one database.
        let store = StoreHandle::available(MemoryDocumentStore::new());
        let a = SeedInitializer::new(PRODUCT_COLLECTION);
        let b = SeedInitializer::new(PRODUCT_COLLECTION);

        assert_eq!(a.ensure_seeded(&store).await.unwrap(), SeedRun::Inserted(3));
        assert_eq!(b.ensure_seeded(&store).await.unwrap(), SeedRun::Skipped);
        assert_eq!(b.state().await, SeedState::Seeded);
        assert_eq!(store.get_documents(PRODUCT_COLLECTION).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_passes_seed_once() {
        let store = StoreHandle::available(MemoryDocumentStore::new());
        let seeder = Arc::new(SeedInitializer::new(PRODUCT_COLLECTION));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let seeder = Arc::clone(&seeder);
                tokio::spawn(async move { seeder.ensure_seeded(&store).await.unwrap() })
            })
            .collect();

        let mut inserted = 0;
        for task in tasks {
            if let SeedRun::Inserted(n) = task.await.unwrap() {
                inserted += n;
            }
        }
        assert_eq!(inserted, 3);
        assert_eq!(store.get_documents(PRODUCT_COLLECTION).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_populated_collection_is_never_topped_up() {
        let store = StoreHandle::available(MemoryDocumentStore::new());
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
        seeder.mark_populated().await;

        assert_eq!(seeder.ensure_seeded(&store).await.unwrap(), SeedRun::Skipped);
        assert!(store.get_documents(PRODUCT_COLLECTION).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_callers_skip_the_lock() {
        let store = StoreHandle::available(MemoryDocumentStore::new());
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
        seeder.mark_populated().await;

        // A pass in flight elsewhere holds the lock.
        let _held = seeder.state.lock().await;
        let wait = Duration::from_millis(200);

        assert!(timeout(wait, seeder.mark_populated()).await.is_ok());
        assert_eq!(timeout(wait, seeder.state()).await.unwrap(), SeedState::Seeded);
        assert_eq!(
            timeout(wait, seeder.ensure_seeded(&store)).await.unwrap().unwrap(),
            SeedRun::Skipped
        );
    }

    #[tokio::test]
    async fn test_unseeded_callers_wait_for_the_lock() {
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
        let _held = seeder.state.lock().await;

        assert!(timeout(Duration::from_millis(50), seeder.mark_populated()).await.is_err());
    }

    #[tokio::test]
    async fn test_failure_returns_to_unseeded() {
        let store = StoreHandle::available(ReadOnlyStore);
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);

        assert!(seeder.ensure_seeded(&store).await.is_err());
        assert_eq!(seeder.state().await, SeedState::Unseeded);
    }

    #[tokio::test]
    async fn test_unavailable_store_is_an_error() {
        let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
        assert!(matches!(
            seeder.ensure_seeded(&StoreHandle::Unavailable).await,
            Err(StoreError::Unavailable)
        ));
        assert_eq!(seeder.state().await, SeedState::Unseeded);
    }
}
