//! Business logic services for the API.
//!
//! # Services
//!
//! - `catalog` - Product listing, creation and lookup
//! - `seed` - One-time demo data for an empty catalog
//! - `diagnostics` - Configuration and store health report

pub mod catalog;
pub mod diagnostics;
pub mod seed;

pub use catalog::{Catalog, CatalogError};
pub use diagnostics::{DiagnosticReport, StoreProbe};
pub use seed::{SeedInitializer, SeedRun, SeedState};
