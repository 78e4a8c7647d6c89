//! Print the diagnostic report.

use vitrine_api::db;
use vitrine_api::services::diagnostics;

/// Probe the configured store and print the report as pretty JSON.
///
/// # Errors
///
/// Returns an error if configuration is invalid.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let store = db::connect(&config.store).await;

    let report = diagnostics::report(&config, &store).await;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
