//! Calendar Router

use crate::application::config::CalendarConfig;
use crate::application::fetch_events::{EventsPayload, FetchEventsUseCase};
use crate::infra::http::IcsFetcher;
use crate::presentation::handlers::{self, CalendarAppState};
use axum::{Router, routing::get};
use platform::cache::TtlSlot;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Create the calendar router for any fetcher / rate-limit store pair
pub fn calendar_router<F, S>(fetcher: Arc<F>, limiter: Arc<S>, config: Arc<CalendarConfig>) -> Router
where
    F: IcsFetcher + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let cache = Arc::new(TtlSlot::<EventsPayload>::new(config.cache_ttl));
    let state = CalendarAppState {
        use_case: Arc::new(FetchEventsUseCase::new(fetcher, limiter, cache, config)),
    };

    Router::new()
        .route("/calendar/events", get(handlers::events::<F, S>))
        .with_state(state)
}
