//! Stored analysis listing and search routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use lexiscope_core::{Error, SearchQuery};
use serde::Deserialize;
use tracing::{debug, error};

use super::status_for;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search))
        .route("/analyses", get(list_analyses))
        .route("/analyses/{id}", get(get_analysis))
}

#[derive(Deserialize)]
struct SearchParams {
    topic: Option<String>,
    keyword: Option<String>,
    sentiment: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

/// GET /search?topic=&keyword=&sentiment=&sortBy=
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = match SearchQuery::from_params(
        params.topic.as_deref(),
        params.keyword.as_deref(),
        params.sentiment.as_deref(),
        params.sort_by.as_deref(),
    ) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };
    debug!("Search: {:?}", query);

    match state.pipeline.search(&query) {
        Ok(analyses) => (
            StatusCode::OK,
            Json(serde_json::json!({ "analyses": analyses })),
        ),
        Err(e) => error_response(&e),
    }
}

/// GET /analyses: newest first.
async fn list_analyses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.pipeline.list() {
        Ok(analyses) => (
            StatusCode::OK,
            Json(serde_json::json!({ "analyses": analyses })),
        ),
        Err(e) => error_response(&e),
    }
}

async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.pipeline.get(&id) {
        Ok(record) => (StatusCode::OK, Json(serde_json::json!(record))),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = status_for(e);
    let message = if status.is_server_error() {
        error!("Analysis lookup failed: {}", e);
        "Failed to read analyses".to_string()
    } else {
        e.to_string()
    };
    (status, Json(serde_json::json!({ "error": message })))
}
