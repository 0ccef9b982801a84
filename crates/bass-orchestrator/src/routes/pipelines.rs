//! `GET /pipelines`

use axum::Json;
use axum::extract::State;
use bass_core::job::PipelineCatalog;

use crate::state::AppState;

pub async fn list_pipelines(State(state): State<AppState>) -> Json<PipelineCatalog> {
    Json((*state.catalog).clone())
}
