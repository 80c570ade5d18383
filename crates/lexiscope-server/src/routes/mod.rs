//! HTTP route handlers.

pub mod analyze;
pub mod extract;
pub mod health;
pub mod search;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use lexiscope_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(analyze::routes())
        .merge(extract::routes())
        .merge(search::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP status for an error surfaced to a client.
pub(crate) fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) | Error::Extraction(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
