use axum::Json;
use serde_json::Value;

pub async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn api_info_handler() -> Json<Value> {
    Json(serde_json::json!({
        "app": "Travelmate Recommendations API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/health",
            "GET /api/recommendations/people?user_id=<id>&limit=20",
            "GET /api/recommendations/posts?user_id=<id>&limit=30",
        ],
    }))
}
