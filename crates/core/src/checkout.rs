//! Checkout total calculation.
//!
//! Payment hand-off is not implemented yet: every summary carries a null
//! `redirect_url`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CurrencyCode;

/// Status reported for an accepted checkout.
pub const CHECKOUT_STATUS: &str = "ok";

/// Message reported for an accepted checkout.
pub const CHECKOUT_MESSAGE: &str = "Checkout session created";

/// Errors that can occur when totalling a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A line item has a price below zero.
    #[error("item {index} ({id}) has a negative price")]
    NegativePrice { index: usize, id: String },

    /// A line item asks for less than one unit.
    #[error("item {index} ({id}) has quantity {qty}, expected at least 1")]
    InvalidQuantity { index: usize, id: String, qty: i64 },

    /// The total does not fit in a decimal.
    #[error("order total is too large")]
    Overflow,
}

/// One line of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub qty: i64,
}

/// A checkout request as submitted by the client.
///
/// `email` is free text and is carried through unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub status: String,
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub currency: CurrencyCode,
    pub redirect_url: Option<String>,
}

impl CheckoutRequest {
    /// Validate the request and compute its summary.
    ///
    /// The total is `Σ price × qty` rounded to two decimal places (banker's
    /// rounding), in USD.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for the first invalid item or if the
    /// total overflows.
    pub fn summarize(&self) -> Result<CheckoutSummary, CheckoutError> {
        let mut total = Decimal::ZERO;
        for (index, item) in self.items.iter().enumerate() {
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CheckoutError::NegativePrice {
                    index,
                    id: item.id.clone(),
                });
            }
            if item.qty < 1 {
                return Err(CheckoutError::InvalidQuantity {
                    index,
                    id: item.id.clone(),
                    qty: item.qty,
                });
            }

            let line = item
                .price
                .checked_mul(Decimal::from(item.qty))
                .ok_or(CheckoutError::Overflow)?;
            total = total.checked_add(line).ok_or(CheckoutError::Overflow)?;
        }

        Ok(CheckoutSummary {
            status: CHECKOUT_STATUS.to_owned(),
            message: CHECKOUT_MESSAGE.to_owned(),
            total: total.round_dp(2),
            currency: CurrencyCode::USD,
            redirect_url: None,
        })
    }
}
