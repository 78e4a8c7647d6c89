//! Integration tests for the product catalog.
//!
//! These tests require the API running with a document store:
//! `DATABASE_URL=memory:// cargo run -p vitrine-api`

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;
use vitrine_integration_tests::{api_base_url, client};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_listing_is_never_empty_after_first_call() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    assert!(!products.is_empty());
    for product in &products {
        assert!(product.get("id").and_then(Value::as_str).is_some());
        assert!(product.get("_id").is_none());
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_create_and_fetch_product() {
    let client = client();
    let base_url = api_base_url();
    let title = format!("Integration Lamp {}", Uuid::new_v4());

    let resp = client
        .post(format!("{base_url}/products"))
        .json(&json!({"title": title, "price": 42.5, "category": "Lighting"}))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(created["title"], json!(title));
    assert_eq!(created["price"], json!(42.5));

    let id = created["id"].as_str().expect("id is a string");
    let resp = client
        .get(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_negative_price_is_rejected() {
    let resp = client()
        .post(format!("{}/products", api_base_url()))
        .json(&json!({"title": "Lamp", "price": -5, "category": "Lighting"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_unknown_and_malformed_ids() {
    let client = client();
    let base_url = api_base_url();

    for id in ["not-an-id".to_string(), Uuid::new_v4().to_string()] {
        let resp = client
            .get(format!("{base_url}/products/{id}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{id}");

        let body: Value = resp.json().await.expect("Failed to parse error body");
        assert!(body["detail"].is_string());
    }
}
