//! Fetch Events Use Case

use crate::application::config::{CalendarConfig, source_label};
use crate::domain::event::CalendarEvent;
use crate::error::{CalendarError, CalendarResult};
use crate::infra::http::IcsFetcher;
use crate::infra::ics::parse_events;
use platform::cache::TtlSlot;
use platform::rate_limit::RateLimitStore;
use serde::Serialize;
use std::sync::Arc;

/// Rate-limit scope label for calendar requests
pub const CALENDAR_SCOPE: &str = "calendar-events";

/// The cached (and served) calendar payload
#[derive(Debug, Clone, Serialize)]
pub struct EventsPayload {
    pub source: String,
    pub count: usize,
    pub events: Vec<CalendarEvent>,
}

impl EventsPayload {
    /// Empty payload used for the degraded 503 response
    pub fn empty(source: String) -> Self {
        Self {
            source,
            count: 0,
            events: Vec::new(),
        }
    }
}

/// Fetch Events Use Case
///
/// Governance order per request: rate limit, then cache, then upstream.
/// The fetch runs without holding the cache lock; on failure the previous
/// cached entry (if any) is left untouched and the error surfaces - stale
/// data is never served in place of a failed refresh.
pub struct FetchEventsUseCase<F, S>
where
    F: IcsFetcher,
    S: RateLimitStore,
{
    fetcher: Arc<F>,
    limiter: Arc<S>,
    cache: Arc<TtlSlot<EventsPayload>>,
    config: Arc<CalendarConfig>,
}

impl<F, S> FetchEventsUseCase<F, S>
where
    F: IcsFetcher,
    S: RateLimitStore,
{
    pub fn new(
        fetcher: Arc<F>,
        limiter: Arc<S>,
        cache: Arc<TtlSlot<EventsPayload>>,
        config: Arc<CalendarConfig>,
    ) -> Self {
        Self {
            fetcher,
            limiter,
            cache,
            config,
        }
    }

    /// Human-facing label for this feed's source
    pub fn source(&self) -> String {
        source_label(&self.config.source_url)
    }

    pub async fn execute(&self, identity: &str) -> CalendarResult<EventsPayload> {
        let result = self
            .limiter
            .check(CALENDAR_SCOPE, identity, &self.config.events_limit)
            .await;
        if !result.allowed {
            return Err(CalendarError::RateLimited {
                retry_after_secs: result.retry_after_secs,
            });
        }

        if let Some(payload) = self.cache.get().await {
            tracing::debug!(count = payload.count, "Calendar cache hit");
            return Ok(payload);
        }

        let ics = self
            .fetcher
            .fetch()
            .await
            .map_err(|e| CalendarError::Upstream(e.to_string()))?;

        let events = parse_events(&ics);
        let payload = EventsPayload {
            source: self.source(),
            count: events.len(),
            events,
        };

        self.cache.store(payload.clone()).await;

        tracing::info!(count = payload.count, "Calendar feed refreshed");

        Ok(payload)
    }
}
