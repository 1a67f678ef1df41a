//! HTTP Handlers

use crate::application::fetch_events::{EventsPayload, FetchEventsUseCase};
use crate::error::CalendarError;
use crate::infra::http::IcsFetcher;
use crate::presentation::dto::EventsResponse;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use platform::client::client_identity;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Shared state for calendar handlers
pub struct CalendarAppState<F, S>
where
    F: IcsFetcher + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    pub use_case: Arc<FetchEventsUseCase<F, S>>,
}

impl<F, S> Clone for CalendarAppState<F, S>
where
    F: IcsFetcher + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            use_case: self.use_case.clone(),
        }
    }
}

/// GET /calendar/events
///
/// Upstream failures degrade to 503 with an empty-events payload so the
/// frontend schedule widget renders an empty list instead of breaking.
pub async fn events<F, S>(
    State(state): State<CalendarAppState<F, S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> Response
where
    F: IcsFetcher + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let identity = client_identity(&headers, Some(addr.ip()));

    match state.use_case.execute(&identity).await {
        Ok(payload) => Json(EventsResponse::from(payload)).into_response(),
        Err(CalendarError::Upstream(detail)) => {
            tracing::error!(detail = %detail, "Calendar fetch failed, serving degraded payload");
            let degraded = EventsPayload::empty(state.use_case.source());
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(EventsResponse::from(degraded)),
            )
                .into_response()
        }
        Err(other) => other.into_response(),
    }
}
