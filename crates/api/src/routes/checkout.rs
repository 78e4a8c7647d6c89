//! Checkout route handler.

use axum::{Json, extract::rejection::JsonRejection};
use vitrine_core::{CheckoutRequest, CheckoutSummary};

use crate::error::Result;

/// Total a cart. No payment session is opened yet.
///
/// POST /checkout
///
/// # Errors
///
/// Returns `AppError` (422) for an invalid body or item.
pub async fn create(
    body: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutSummary>> {
    let Json(request) = body?;
    let summary = request.summarize()?;
    tracing::info!(
        items = request.items.len(),
        total = %summary.total,
        "Checkout summarized"
    );
    Ok(Json(summary))
}
