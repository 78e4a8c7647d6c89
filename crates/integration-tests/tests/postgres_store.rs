//! Integration tests for the `PostgreSQL` document store.
//!
//! These tests require a migrated database:
//! `DATABASE_URL=postgres://... cargo run -p vitrine-cli -- migrate`
//!
//! Each test writes to its own collection so runs do not interfere.

use secrecy::SecretString;
use serde_json::json;
use uuid::Uuid;
use vitrine_api::db::{DocumentStore, PgDocumentStore, SeedOutcome, create_pool};
use vitrine_core::normalize::identifier::from_native;
use vitrine_core::{NATIVE_ID_KEY, RawDocument, document};

#[allow(clippy::expect_used)]
async fn store() -> PgDocumentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let pool = create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to database");
    PgDocumentStore::new(pool)
}

fn collection() -> String {
    format!("it_{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "Requires migrated PostgreSQL database"]
async fn test_create_then_find() {
    let store = store().await;
    let collection = collection();

    let id = store
        .create_document(&collection, document([("title", json!("Lamp"))]))
        .await
        .expect("Failed to create document");

    let doc = store
        .find_document(&collection, id)
        .await
        .expect("Failed to find document")
        .expect("Document exists");
    assert_eq!(doc.get("title"), Some(&json!("Lamp")));
    let native = doc.get(NATIVE_ID_KEY).expect("native id present");
    assert_eq!(from_native(native).expect("valid native id"), id);

    let all = store
        .get_documents(&collection)
        .await
        .expect("Failed to list documents");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
#[ignore = "Requires migrated PostgreSQL database"]
async fn test_concurrent_conditional_inserts_across_pools() {
    let collection = collection();

    // Separate pools stand in for separate processes.
    let mut tasks = Vec::new();
    for _ in 0..4 {
        let store = store().await;
        let collection = collection.clone();
        tasks.push(tokio::spawn(async move {
            store
                .insert_many_if_empty(&collection, vec![RawDocument::new(); 3])
                .await
                .expect("Conditional insert failed")
        }));
    }

    let mut winners = 0;
    for task in tasks {
        if matches!(task.await.expect("task panicked"), SeedOutcome::Inserted(_)) {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let docs = store()
        .await
        .get_documents(&collection)
        .await
        .expect("Failed to list documents");
    assert_eq!(docs.len(), 3);
}
