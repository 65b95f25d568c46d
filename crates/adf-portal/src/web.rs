//! HTTP surface: the form page, submissions and a health probe.

use crate::pipeline::{FailureNotice, Outcome, Pipeline};
use crate::render::render_page;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IssueForm {
    #[serde(default)]
    pub issue: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn form_handler() -> Html<String> {
    Html(render_page(None, None))
}

async fn submit_handler(
    State(pipeline): State<Arc<Pipeline>>,
    Form(form): Form<IssueForm>,
) -> Response {
    let outcome = pipeline.submit(&form.issue).await;

    let status = match &outcome {
        Outcome::Failed(FailureNotice::ServiceUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
        Outcome::Failed(FailureNotice::GenerationFailed) => StatusCode::BAD_GATEWAY,
        Outcome::Solved(_) | Outcome::Ignored => StatusCode::OK,
    };

    (status, Html(render_page(Some(&form.issue), Some(&outcome)))).into_response()
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Build the portal router around a shared pipeline
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(form_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}
