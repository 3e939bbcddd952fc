use axum::Json;

/// GET /api/health: liveness probe, never gated.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
