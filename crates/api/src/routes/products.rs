//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use vitrine_core::{Product, ProductDraft};

use crate::error::Result;
use crate::state::AppState;

/// List all products, seeding demo data into an empty catalog.
///
/// GET /products
///
/// # Errors
///
/// Returns `AppError` if the store fails or holds unreadable documents.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().list_products().await?))
}

/// Create a product.
///
/// POST /products
///
/// # Errors
///
/// Returns `AppError` for an invalid body (422) or a missing store (503).
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(draft) = body?;
    let product = state.catalog().create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a single product.
///
/// GET /products/{id}
///
/// # Errors
///
/// Returns `AppError` (404) if the id is malformed or unknown.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    Ok(Json(state.catalog().get_product(&id).await?))
}
