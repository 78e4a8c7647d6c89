//! Integration tests for checkout.
//!
//! These tests require the API running (no store needed).

use reqwest::StatusCode;
use serde_json::{Value, json};
use vitrine_integration_tests::{api_base_url, client};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_checkout_total() {
    let resp = client()
        .post(format!("{}/checkout", api_base_url()))
        .json(&json!({
            "items": [
                {"id": "a", "title": "Carbon Wallet", "price": 89, "qty": 1},
                {"id": "b", "title": "Monochrome Sneakers", "price": 159, "qty": 2},
            ],
            "email": "shopper@example.com",
        }))
        .send()
        .await
        .expect("Failed to send checkout");
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: Value = resp.json().await.expect("Failed to parse summary");
    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["total"], json!(407.0));
    assert_eq!(summary["currency"], "USD");
    assert!(summary["redirect_url"].is_null());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_checkout_rejects_zero_quantity() {
    let resp = client()
        .post(format!("{}/checkout", api_base_url()))
        .json(&json!({"items": [{"id": "a", "title": "Wallet", "price": 89, "qty": 0}]}))
        .send()
        .await
        .expect("Failed to send checkout");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
