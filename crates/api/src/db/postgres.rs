//! `PostgreSQL` document store.
//!
//! # Table: `documents`
//!
//! | column       | type          | notes                         |
//! |--------------|---------------|-------------------------------|
//! | `id`         | `uuid`        | primary key, store-assigned   |
//! | `seq`        | `bigint`      | identity, orders reads        |
//! | `collection` | `text`        | collection name               |
//! | `body`       | `jsonb`       | the document, without its id  |
//! | `created_at` | `timestamptz` | insertion time                |
//!
//! Queries are built at runtime so the crate compiles without a database.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use vitrine_core::normalize::identifier::to_native;
use vitrine_core::{NATIVE_ID_KEY, ProductId, RawDocument};

use super::{DocumentStore, SeedOutcome, StoreError, strip_ids};

/// Document store backed by a `PostgreSQL` JSONB table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Attach the native id to a stored body.
fn into_raw(id: ProductId, body: Value) -> Result<RawDocument, StoreError> {
    match body {
        Value::Object(mut doc) => {
            doc.insert(NATIVE_ID_KEY.to_owned(), to_native(id));
            Ok(doc)
        }
        other => Err(StoreError::DataCorruption(format!(
            "document {id} has a non-object body: {other}"
        ))),
    }
}

const INSERT_DOCUMENT: &str = r"
    INSERT INTO documents (collection, body)
    VALUES ($1, $2)
    RETURNING id
";

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT collection
            FROM documents
            ORDER BY collection
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn create_document(
        &self,
        collection: &str,
        record: RawDocument,
    ) -> Result<ProductId, StoreError> {
        let id = sqlx::query_scalar::<_, ProductId>(INSERT_DOCUMENT)
            .bind(collection)
            .bind(Value::Object(strip_ids(record)))
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(collection, %id, "Document created");
        Ok(id)
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        let rows = sqlx::query_as::<_, (ProductId, Value)>(
            r"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            ",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, body)| into_raw(id, body))
            .collect()
    }

    async fn find_document(
        &self,
        collection: &str,
        id: ProductId,
    ) -> Result<Option<RawDocument>, StoreError> {
        let row = sqlx::query_as::<_, (ProductId, Value)>(
            r"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND id = $2
            ",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id, body)| into_raw(id, body)).transpose()
    }

    async fn insert_many_if_empty(
        &self,
        collection: &str,
        records: Vec<RawDocument>,
    ) -> Result<SeedOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Serialises conditional inserts on this collection across every
        // process sharing the database; released at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        let populated = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM documents WHERE collection = $1)",
        )
        .bind(collection)
        .fetch_one(&mut *tx)
        .await?;

        if populated {
            tx.rollback().await?;
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let id = sqlx::query_scalar::<_, ProductId>(INSERT_DOCUMENT)
                .bind(collection)
                .bind(Value::Object(strip_ids(record)))
                .fetch_one(&mut *tx)
                .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(SeedOutcome::Inserted(ids))
    }
}
