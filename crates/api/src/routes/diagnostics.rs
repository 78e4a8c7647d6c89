//! Diagnostic endpoint.

use axum::{Json, extract::State};

use crate::services::{DiagnosticReport, diagnostics};
use crate::state::AppState;

/// Report configuration and store health. Always 200.
///
/// GET /test
pub async fn report(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(diagnostics::report(state.config(), state.store()).await)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
