//! Core value types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{CANONICAL_ID_LEN, IdError, ProductId};
pub use price::{CurrencyCode, Price, PriceError};
