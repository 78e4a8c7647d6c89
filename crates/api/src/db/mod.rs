//! Document store adapters.
//!
//! # Contract
//!
//! A [`DocumentStore`] keeps schemaless JSON documents in named collections.
//! It assigns each document a [`ProductId`] on creation and hands documents
//! back as [`RawDocument`]s carrying that id as a native token under `_id`
//! (see `vitrine_core::normalize::identifier`).
//!
//! # Backends
//!
//! - [`PgDocumentStore`] - `PostgreSQL`, one `documents` table with a JSONB body
//! - [`MemoryDocumentStore`] - process-local, selected with `DATABASE_URL=memory://`
//!
//! # Availability
//!
//! Handlers never see a backend directly. They go through [`StoreHandle`],
//! which is either `Available` or `Unavailable` (no `DATABASE_URL`, or the
//! connection failed at startup). An unavailable store reads as empty and
//! refuses writes with [`StoreError::Unavailable`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p vitrine-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use vitrine_core::{EncodeError, ID_KEY, NATIVE_ID_KEY, ProductId, RawDocument};

use crate::config::StoreConfig;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store is configured or reachable.
    #[error("store unavailable")]
    Unavailable,

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document is not a JSON object.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A record could not be turned into a document for writing.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Result of a conditional bulk insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty; these documents were inserted, in order.
    Inserted(Vec<ProductId>),
    /// The collection already held documents; nothing was written.
    AlreadyPopulated,
}

/// Create/read primitives over named collections of schemaless documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the store answers at all.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Names of the collections holding at least one document.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Insert a document and return its newly assigned id.
    ///
    /// Any `_id` or `id` key on `record` is discarded.
    async fn create_document(
        &self,
        collection: &str,
        record: RawDocument,
    ) -> Result<ProductId, StoreError>;

    /// All documents of a collection, in insertion order.
    async fn get_documents(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError>;

    /// The document with the given id, if any.
    async fn find_document(
        &self,
        collection: &str,
        id: ProductId,
    ) -> Result<Option<RawDocument>, StoreError>;

    /// Insert `records` iff the collection is empty, atomically with respect
    /// to every other call on the same collection.
    async fn insert_many_if_empty(
        &self,
        collection: &str,
        records: Vec<RawDocument>,
    ) -> Result<SeedOutcome, StoreError>;
}

/// A document store that may or may not be there.
#[derive(Clone)]
pub enum StoreHandle {
    Available(Arc<dyn DocumentStore>),
    Unavailable,
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("StoreHandle::Available"),
            Self::Unavailable => f.write_str("StoreHandle::Unavailable"),
        }
    }
}

impl StoreHandle {
    /// Wrap a backend.
    pub fn available(store: impl DocumentStore + 'static) -> Self {
        Self::Available(Arc::new(store))
    }

    /// Whether a backend is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Insert a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] without a backend, otherwise
    /// whatever the backend reports.
    pub async fn create_document(
        &self,
        collection: &str,
        record: RawDocument,
    ) -> Result<ProductId, StoreError> {
        match self {
            Self::Available(store) => store.create_document(collection, record).await,
            Self::Unavailable => Err(StoreError::Unavailable),
        }
    }

    /// Read a whole collection. Empty without a backend.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend reports.
    pub async fn get_documents(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        match self {
            Self::Available(store) => store.get_documents(collection).await,
            Self::Unavailable => Ok(Vec::new()),
        }
    }

    /// Look a document up by id. `None` without a backend.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend reports.
    pub async fn find_document(
        &self,
        collection: &str,
        id: ProductId,
    ) -> Result<Option<RawDocument>, StoreError> {
        match self {
            Self::Available(store) => store.find_document(collection, id).await,
            Self::Unavailable => Ok(None),
        }
    }

    /// Conditionally insert a batch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] without a backend, otherwise
    /// whatever the backend reports.
    pub async fn insert_many_if_empty(
        &self,
        collection: &str,
        records: Vec<RawDocument>,
    ) -> Result<SeedOutcome, StoreError> {
        match self {
            Self::Available(store) => store.insert_many_if_empty(collection, records).await,
            Self::Unavailable => Err(StoreError::Unavailable),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url.expose_secret())
        .await
}

/// Open the configured store.
///
/// A failed `PostgreSQL` connection is logged and yields an unavailable
/// handle so that the service still starts and can report the failure.
pub async fn connect(config: &StoreConfig) -> StoreHandle {
    match config {
        StoreConfig::Unconfigured => {
            tracing::warn!("DATABASE_URL not set, running without a document store");
            StoreHandle::Unavailable
        }
        StoreConfig::Memory => {
            tracing::info!("Using in-memory document store");
            StoreHandle::available(MemoryDocumentStore::new())
        }
        StoreConfig::Postgres(url) => match create_pool(url).await {
            Ok(pool) => {
                tracing::info!("Database pool created");
                StoreHandle::available(PgDocumentStore::new(pool))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database, store unavailable");
                StoreHandle::Unavailable
            }
        },
    }
}

/// Drop identifier keys a caller may have left on a record before insertion.
fn strip_ids(mut record: RawDocument) -> RawDocument {
    record.remove(NATIVE_ID_KEY);
    record.remove(ID_KEY);
    record
}
