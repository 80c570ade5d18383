//! URL content extraction route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use super::status_for;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract-url", post(extract_url))
}

#[derive(Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    url: String,
}

/// POST /extract-url: fetch a page and return its main text.
async fn extract_url(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> impl IntoResponse {
    match state.pages.extract(&req.url).await {
        Ok(page) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "content": page.content,
                "title": page.title,
                "url": page.url,
                "word_count": page.word_count,
                "extracted_at": page.extracted_at,
            })),
        ),
        Err(e) => {
            warn!("URL extraction failed for {:?}: {}", req.url, e);
            (
                status_for(&e),
                Json(serde_json::json!({ "success": false, "error": e.to_string() })),
            )
        }
    }
}
