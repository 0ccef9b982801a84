//! HTTP routes.

pub mod dequeue;
pub mod pipelines;
pub mod webhook;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the orchestrator's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pipelines", get(pipelines::list_pipelines))
        .route("/webhook", post(webhook::handle_webhook))
        .route("/dequeue", post(dequeue::handle_dequeue))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
