use axum::Json;
use serde_json::{json, Value};

use crate::extraction::schema::SCHEMA_VERSION;

/// GET /health
/// Returns a simple status object with service and schema versions.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "schema_version": SCHEMA_VERSION
    }))
}
