//! Liveness and capability status routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Lexiscope text analysis API",
        "status": "running",
    }))
}

/// GET /health: which capabilities are wired in.
async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let caps = state.pipeline.capabilities();
    let availability = |up: bool| if up { "available" } else { "unavailable" };

    Json(serde_json::json!({
        "status": "healthy",
        "database": caps.database.to_string(),
        "llm": availability(caps.llm.is_up()),
        "nlp": availability(caps.nlp.is_up()),
        "llm_model": caps.llm_model,
        "nlp_pipeline": caps.nlp_pipeline,
    }))
}
