use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Static liveness payload; no side effects.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "Backend is running"
    }))
}
