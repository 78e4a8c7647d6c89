//! Newtype IDs for store-assigned record identifiers.
//!
//! Records are identified by UUIDs assigned by the document store. The
//! `define_id!` macro wraps a UUID in an entity-specific type so that ids of
//! different collections cannot be mixed up, and fixes the one textual form
//! accepted from clients: the 36-character hyphenated representation.

use thiserror::Error;

/// Errors that can occur when converting to or from a record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The string is not a hyphenated UUID.
    #[error("malformed identifier: {0:?}")]
    Malformed(String),

    /// The store handed back an identifier value in an unknown shape.
    #[error("unrecognized native identifier: {0}")]
    UnrecognizedNative(String),
}

/// Length of the canonical hyphenated form (`8-4-4-4-12`).
pub const CANONICAL_ID_LEN: usize = 36;

/// Macro to define a type-safe, UUID-backed ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]` (JSON string)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `generate()`, `from_uuid()`, `as_uuid()` and the strict `parse()`
/// - `Display` / `FromStr` using the canonical lowercase hyphenated form
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use vitrine_core::define_id;
/// define_id!(ShelfId);
///
/// let id = ShelfId::generate();
/// let parsed = ShelfId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// assert!(ShelfId::parse("not-an-id").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::Uuid);

        impl $name {
            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(id: $crate::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> $crate::Uuid {
                self.0
            }

            /// Parse the canonical hyphenated form.
            ///
            /// Braced, URN and simple (unhyphenated) UUID spellings are
            /// rejected so that every id has exactly one external spelling
            /// up to letter case.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Malformed` if the input is not a hyphenated
            /// UUID.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::IdError> {
                if s.len() != $crate::CANONICAL_ID_LEN {
                    return Err($crate::IdError::Malformed(s.to_owned()));
                }
                $crate::Uuid::try_parse(s)
                    .map(Self)
                    .map_err(|_| $crate::IdError::Malformed(s.to_owned()))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$crate::Uuid> for $name {
            fn from(id: $crate::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $crate::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <$crate::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <$crate::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <$crate::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <$crate::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase_hyphenated() {
        let id = ProductId::parse("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_parse_display_round_trip() {
        let id = ProductId::generate();
        assert_eq!(ProductId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_other_spellings() {
        let id = ProductId::generate();
        let simple = id.as_uuid().simple().to_string();
        let braced = id.as_uuid().braced().to_string();
        let urn = id.as_uuid().urn().to_string();

        for input in [simple, braced, urn] {
            assert!(matches!(
                ProductId::parse(&input),
                Err(IdError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "42", "not-an-id", "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"] {
            assert!(ProductId::parse(input).is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_serde_is_a_plain_string() {
        let id = ProductId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"67e55044-10b1-426f-9247-bb680e5fe0c8\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
