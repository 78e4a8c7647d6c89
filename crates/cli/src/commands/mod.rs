//! CLI subcommands.

pub mod diagnose;
pub mod migrate;
pub mod seed;

use vitrine_api::config::ApiConfig;

/// Load the API configuration, including a `.env` file if present.
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    Ok(ApiConfig::from_env()?)
}
