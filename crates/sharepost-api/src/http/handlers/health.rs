//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET / - identifies the running integration.
pub async fn installed() -> String {
    format!("Installed SharePostPlugin v{}", env!("CARGO_PKG_VERSION"))
}

/// GET /health - simple health check (no auth required).
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
