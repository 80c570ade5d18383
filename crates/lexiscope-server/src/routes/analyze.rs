//! Text analysis route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use lexiscope_runtime::AnalysisReport;
use serde::Deserialize;
use tracing::{error, warn};

use super::status_for;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", post(analyze))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: String,
}

/// POST /analyze: run both analyzers and store the merged record.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    match state.pipeline.analyze(&req.text).await {
        Ok(report) => {
            for reason in &report.degradations {
                warn!("Analysis {} degraded: {}", report.record.id, reason);
            }
            match report_body(&report) {
                Ok(body) => (StatusCode::OK, Json(body)),
                Err(e) => {
                    error!("Failed to serialize analysis {}: {}", report.record.id, e);
                    failure()
                }
            }
        }
        Err(e) if e.is_client_error() => (
            status_for(&e),
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
        Err(e) => {
            error!("Analysis failed: {}", e);
            failure()
        }
    }
}

fn failure() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Analysis failed" })),
    )
}

/// The record without its input text, plus persistence status.
fn report_body(report: &AnalysisReport) -> serde_json::Result<serde_json::Value> {
    let mut body = serde_json::to_value(&report.record)?;
    if let Some(obj) = body.as_object_mut() {
        obj.remove("text");
        obj.insert("persisted".into(), report.persist.is_stored().into());
        if let Some(warning) = report.warning() {
            obj.insert("warning".into(), warning.into());
        }
    }
    Ok(body)
}
