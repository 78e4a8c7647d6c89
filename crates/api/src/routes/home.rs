//! Greeting endpoints.

use axum::Json;
use serde::Serialize;

/// Static greeting body.
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

/// GET /
pub async fn home() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the Vitrine backend!",
    })
}

/// GET /api/hello
pub async fn hello() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the backend API!",
    })
}
