//! Normalization of raw store documents.
//!
//! Two passes, always in this order:
//!
//! 1. [`identifier::canonicalize`] moves the native `_id` token to a string
//!    `id` field.
//! 2. The record pass decodes the known product fields and substitutes a
//!    default for every field whose key is absent. Explicit values, including
//!    `""` and `false`, are kept. Explicit `null` is kept for `description`
//!    and `image` and rejected for the other fields.
//!
//! Both passes are idempotent, so normalizing a normalized document returns
//! it unchanged.

pub mod identifier;
mod record;

use thiserror::Error;

pub use record::{DEFAULT_CATEGORY, DEFAULT_IN_STOCK, DEFAULT_TITLE};

use crate::document::RawDocument;
use crate::product::{EncodeError, ProductRecord};
use crate::types::IdError;

/// Errors raised while normalizing a document. All of them mean the stored
/// data does not fit the product shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The identifier could not be converted.
    #[error("invalid identifier: {0}")]
    Identifier(#[from] IdError),

    /// A non-nullable field holds `null`.
    #[error("field `{0}` must not be null")]
    NullField(&'static str),

    /// A field could not be coerced to its declared type.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// The document has no identifier where one is required.
    #[error("document has no identifier")]
    MissingId,

    /// The normalized record could not be written back as a document.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Canonicalize and default a raw document into a typed record.
///
/// # Errors
///
/// See [`NormalizeError`].
pub fn normalize_record(doc: RawDocument) -> Result<ProductRecord, NormalizeError> {
    let doc = identifier::canonicalize(doc)?;
    record::fill(doc)
}

/// Canonicalize and default a raw document, staying in document form.
///
/// The result has every product field present and is a fixed point of this
/// function.
///
/// # Errors
///
/// See [`NormalizeError`].
pub fn normalize_document(doc: RawDocument) -> Result<RawDocument, NormalizeError> {
    Ok(normalize_record(doc)?.into_document()?)
}
