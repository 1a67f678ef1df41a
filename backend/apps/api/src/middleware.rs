//! HTTP Middleware
//!
//! Cross-cutting request handling: the per-request pipeline (correlation
//! id, response headers, one structured log line per request) and the
//! same-site origin guard applied to the governed API routes.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::RequestId;
use platform::origin::TrustedOriginSet;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const APP_VERSION_HEADER: &str = "x-app-version";

/// State for the request pipeline middleware
#[derive(Clone)]
pub struct PipelineState {
    pub app_version: String,
}

/// Outermost per-request middleware.
///
/// Assigns a correlation id, times the request, stamps the id and the
/// app version on the response, and emits exactly one log line per
/// request: error level for 5xx, warn for 4xx, info otherwise.
pub async fn request_pipeline(
    State(state): State<PipelineState>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = RequestId::new();
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&state.app_version) {
        response.headers_mut().insert(APP_VERSION_HEADER, value);
    }

    if response.status().is_server_error() {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "Request failed"
        );
    } else if response.status().is_client_error() {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "Request rejected"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "Request completed"
        );
    }

    response
}

/// Same-site guard for the governed API routes.
///
/// Runs before any handler (and therefore before rate-limit accounting).
/// Pre-flight requests pass through so the CORS layer can answer them.
pub async fn origin_guard(
    State(origins): State<Arc<TrustedOriginSet>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    let referer = request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());

    if origins.is_allowed(origin, referer) {
        return next.run(request).await;
    }

    tracing::warn!(
        path = %request.uri().path(),
        origin = origin.unwrap_or("-"),
        referer = referer.unwrap_or("-"),
        "Cross-site request rejected"
    );

    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "forbidden origin" })),
    )
        .into_response()
}
