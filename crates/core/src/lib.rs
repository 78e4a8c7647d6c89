//! Vitrine Core - catalog types and pure logic.
//!
//! This crate provides shared types for:
//! - `api` - HTTP service exposing the catalog
//! - `cli` - Command-line tools for migrations, seeding and diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Store adapters live in the `api` crate and hand
//! raw documents to the normalizers defined here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and prices
//! - [`document`] - Raw schemaless documents and well-known keys
//! - [`normalize`] - Identifier and record normalization
//! - [`product`] - Products, product records and create drafts
//! - [`checkout`] - Checkout total calculation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod document;
pub mod normalize;
pub mod product;
pub mod types;

pub use checkout::{CheckoutError, CheckoutItem, CheckoutRequest, CheckoutSummary};
pub use document::{ID_KEY, NATIVE_ID_KEY, PRODUCT_COLLECTION, RawDocument, document};
pub use normalize::{NormalizeError, normalize_document, normalize_record};
pub use product::{DraftError, EncodeError, Product, ProductDraft, ProductRecord};
pub use types::*;

#[doc(hidden)]
pub use uuid::Uuid;
