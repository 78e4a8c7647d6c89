//! Configuration and store health report.
//!
//! The report never fails: each probe yields an explicit result, and failures
//! are rendered into the report text instead of becoming errors.

use serde::Serialize;

use crate::config::ApiConfig;
use crate::db::StoreHandle;

/// At most this many collection names are listed.
pub const MAX_COLLECTIONS: usize = 10;

/// Store error messages are cut to this many characters.
pub const MAX_ERROR_CHARS: usize = 50;

const BACKEND_RUNNING: &str = "✅ Running";
const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";
const CONNECTED: &str = "Connected";
const NOT_CONNECTED: &str = "Not Connected";
const WORKING: &str = "✅ Connected & Working";
const NOT_INITIALIZED: &str = "⚠️  Available but not initialized";

/// What probing the store found out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProbe {
    /// No store handle exists.
    NotInitialized,
    /// The store did not answer a ping.
    Unreachable(String),
    /// The store answered; listing collections may still have failed.
    Reachable(Result<Vec<String>, String>),
}

/// Diagnostic report as served by `GET /test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticReport {
    /// Render a probe result and configuration flags into a report.
    #[must_use]
    pub fn from_probe(probe: StoreProbe, database_url_set: bool, database_name_set: bool) -> Self {
        let (database, connection_status, collections) = match probe {
            StoreProbe::NotInitialized => (NOT_INITIALIZED.to_owned(), NOT_CONNECTED, Vec::new()),
            StoreProbe::Unreachable(e) => {
                (format!("❌ Error: {}", truncate(&e)), NOT_CONNECTED, Vec::new())
            }
            StoreProbe::Reachable(Ok(mut names)) => {
                names.truncate(MAX_COLLECTIONS);
                (WORKING.to_owned(), CONNECTED, names)
            }
            StoreProbe::Reachable(Err(e)) => (
                format!("⚠️  Connected but Error: {}", truncate(&e)),
                CONNECTED,
                Vec::new(),
            ),
        };

        Self {
            backend: BACKEND_RUNNING.to_owned(),
            database,
            database_url: flag(database_url_set),
            database_name: flag(database_name_set),
            connection_status: connection_status.to_owned(),
            collections,
        }
    }
}

fn flag(set: bool) -> String {
    let text = if set { SET } else { NOT_SET };
    text.to_owned()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

/// Probe the store: can it be reached, and can its collections be listed?
pub async fn probe_store(store: &StoreHandle) -> StoreProbe {
    let StoreHandle::Available(store) = store else {
        return StoreProbe::NotInitialized;
    };

    if let Err(e) = store.ping().await {
        tracing::warn!(error = %e, "Store ping failed");
        return StoreProbe::Unreachable(e.to_string());
    }

    StoreProbe::Reachable(store.list_collections().await.map_err(|e| {
        tracing::warn!(error = %e, "Listing collections failed");
        e.to_string()
    }))
}

/// Build the full diagnostic report.
pub async fn report(config: &ApiConfig, store: &StoreHandle) -> DiagnosticReport {
    DiagnosticReport::from_probe(
        probe_store(store).await,
        config.store.is_configured(),
        config.database_name.is_some(),
    )
}
