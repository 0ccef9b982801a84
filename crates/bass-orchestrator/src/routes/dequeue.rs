//! `POST /dequeue`

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DequeueRequest {
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn handle_dequeue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DequeueRequest>,
) -> Result<Response, ApiError> {
    if !state.worker_keys.is_empty() {
        let presented = headers
            .get("x-api-key")
            .ok_or_else(|| ApiError::Unauthorized("missing X-API-KEY header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized("malformed X-API-KEY header".to_string()))?;

        if !state.worker_keys.contains(presented) {
            return Err(ApiError::Forbidden("unknown worker key".to_string()));
        }
    }

    match state.queue.dequeue_matching(&req.tags) {
        Some(job) => Ok((StatusCode::OK, Json(job)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bass_core::id::ResourceId;
    use bass_core::job::{Job, JobPipeline, OtelConfig};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(
            HashMap::new(),
            Default::default(),
            Default::default(),
            "http://127.0.0.1:1/v1/traces".into(),
            "http://127.0.0.1:1/v1/logs".into(),
        )
    }

    fn sample_job() -> Job {
        Job {
            id: ResourceId::new(),
            name: "demo".into(),
            schedule_time: chrono::Utc::now(),
            env: Default::default(),
            pipeline: JobPipeline {
                repository: "git@example.com:demo.git".into(),
                git_ref: "main".into(),
                worker_tags: vec![],
                cwd: None,
                notifications: None,
                exec: vec!["./pipeline.sh".into()],
                name: "demo".into(),
            },
            changed_refs: vec![],
            otel: OtelConfig {
                traces_endpoint: "http://localhost:4318/v1/traces".into(),
                logs_endpoint: "http://localhost:4318/v1/logs".into(),
                service_name: "bass:pipeline:demo".into(),
                trace_id: "a".repeat(32),
                root_span_id: "b".repeat(16),
            },
            inline_pipeline: None,
        }
    }

    #[tokio::test]
    async fn empty_queue_returns_204() {
        let state = state();
        let app = crate::routes::router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dequeue")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"tags": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn matching_job_returns_200_with_body() {
        let state = state();
        state.queue.enqueue(sample_job());
        let app = crate::routes::router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dequeue")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"tags": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_api_key_is_unauthorized_when_keys_configured() {
        let mut worker_keys = std::collections::HashSet::new();
        worker_keys.insert("secret".to_string());

        let state = AppState::new(
            HashMap::new(),
            worker_keys,
            Default::default(),
            "http://127.0.0.1:1/v1/traces".into(),
            "http://127.0.0.1:1/v1/logs".into(),
        );
        let app = crate::routes::router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dequeue")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"tags": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_api_key_is_forbidden() {
        let mut worker_keys = std::collections::HashSet::new();
        worker_keys.insert("secret".to_string());

        let state = AppState::new(
            HashMap::new(),
            worker_keys,
            Default::default(),
            "http://127.0.0.1:1/v1/traces".into(),
            "http://127.0.0.1:1/v1/logs".into(),
        );
        let app = crate::routes::router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dequeue")
                    .header("content-type", "application/json")
                    .header("x-api-key", "wrong")
                    .body(Body::from(r#"{"tags": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
