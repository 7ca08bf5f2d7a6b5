use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use super::AppState;

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.registry.size(),
    }))
}
