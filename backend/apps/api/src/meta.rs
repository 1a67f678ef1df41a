//! Meta Endpoints
//!
//! Deployment introspection for the frontend footer. Ungoverned: no
//! origin guard, no rate limit.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Clone)]
pub struct MetaState {
    pub app_version: String,
    pub started_at: DateTime<Utc>,
    pub log_file: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub app_version: String,
    pub started_at: String,
    pub log_file: Option<String>,
}

/// GET /meta/version
pub async fn version(State(state): State<MetaState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        app_version: state.app_version.clone(),
        started_at: state.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        log_file: state.log_file.clone(),
    })
}

pub fn meta_router(state: MetaState) -> Router {
    Router::new()
        .route("/meta/version", get(version))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_version_payload() {
        let app = meta_router(MetaState {
            app_version: "1.2.3".to_string(),
            started_at: Utc::now(),
            log_file: None,
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/meta/version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["app_version"], "1.2.3");
        assert!(json["started_at"].as_str().unwrap().ends_with('Z'));
        assert!(json["log_file"].is_null());
    }
}
