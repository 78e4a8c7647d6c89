//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Greeting
//! GET  /api/hello        - Greeting
//! GET  /health           - Liveness check
//! GET  /test             - Diagnostic report
//!
//! # Products
//! GET  /products         - Product listing (seeds an empty catalog)
//! POST /products         - Create product
//! GET  /products/{id}    - Product detail
//!
//! # Checkout
//! POST /checkout         - Total a cart
//! ```

pub mod checkout;
pub mod diagnostics;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", get(products::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/api/hello", get(home::hello))
        .route("/health", get(diagnostics::health))
        .route("/test", get(diagnostics::report))
        .nest("/products", product_routes())
        .route("/checkout", post(checkout::create))
}
