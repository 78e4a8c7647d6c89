//! Seed the product collection with the demo catalog.
//!
//! Runs the same one-time initializer the API runs on first listing, so an
//! already populated collection is left untouched.

use tracing::info;
use vitrine_api::db::{self, StoreHandle};
use vitrine_api::services::{SeedInitializer, SeedRun};
use vitrine_core::PRODUCT_COLLECTION;

/// Insert the demo products if the product collection is empty.
///
/// # Errors
///
/// Returns an error if configuration is invalid, no store is reachable, or
/// the insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;

    let store = db::connect(&config.store).await;
    if matches!(store, StoreHandle::Unavailable) {
        return Err("no document store available, check DATABASE_URL".into());
    }

    let seeder = SeedInitializer::new(PRODUCT_COLLECTION);
    match seeder.ensure_seeded(&store).await? {
        SeedRun::Inserted(count) => info!(count, "Demo products inserted"),
        SeedRun::Skipped => info!("Product collection already populated, nothing to do"),
    }

    Ok(())
}
