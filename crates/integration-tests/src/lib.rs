//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API against a migrated database
//! cargo run -p vitrine-cli -- migrate
//! cargo run -p vitrine-api
//!
//! # Run integration tests
//! cargo test -p vitrine-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product listing, creation and lookup over HTTP
//! - `checkout` - Checkout totals over HTTP
//! - `diagnostics` - Health and diagnostic endpoints
//! - `postgres_store` - Document store against a real database

use reqwest::Client;

/// Base URL for the API (configurable via `VITRINE_BASE_URL`).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("VITRINE_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// HTTP client for the API.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
