//! Unit and router tests for the calendar crate

#[cfg(test)]
mod support {
    use crate::infra::http::{FetchError, IcsFetcher};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const SAMPLE_ICS: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:run-1\r\n\
SUMMARY:Morning run\r\n\
DTSTART:20260301T070000Z\r\n\
DTEND:20260301T080000Z\r\n\
LOCATION:Han river\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:rest-1\r\n\
SUMMARY:Rest day\r\n\
DTSTART;VALUE=DATE:20260302\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    /// Fetcher that always serves the sample document and counts calls
    pub struct CountingFetcher {
        pub calls: AtomicUsize,
    }

    impl CountingFetcher {
        pub fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl IcsFetcher for CountingFetcher {
        async fn fetch(&self) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SAMPLE_ICS.to_string())
        }
    }

    /// Fetcher standing in for an unreachable upstream
    pub struct FailingFetcher;

    impl IcsFetcher for FailingFetcher {
        async fn fetch(&self) -> Result<String, FetchError> {
            Err(FetchError::Status(502))
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::support::*;
    use crate::application::config::CalendarConfig;
    use crate::application::fetch_events::{EventsPayload, FetchEventsUseCase};
    use crate::error::CalendarError;
    use platform::cache::TtlSlot;
    use platform::rate_limit::{MemoryRateLimitStore, RateLimitConfig};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn config(cache_ttl: Duration) -> CalendarConfig {
        CalendarConfig {
            source_url: "webcal://p44-caldav.icloud.com/published/2/feed".to_string(),
            cache_ttl,
            ..CalendarConfig::default()
        }
    }

    fn use_case<F: crate::infra::http::IcsFetcher>(
        fetcher: Arc<F>,
        config: CalendarConfig,
    ) -> FetchEventsUseCase<F, MemoryRateLimitStore> {
        let cache = Arc::new(TtlSlot::<EventsPayload>::new(config.cache_ttl));
        FetchEventsUseCase::new(
            fetcher,
            Arc::new(MemoryRateLimitStore::new(1000)),
            cache,
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn test_fetch_parses_and_labels_source() {
        let uc = use_case(
            Arc::new(CountingFetcher::new()),
            config(Duration::from_secs(600)),
        );
        let payload = uc.execute("1.2.3.4").await.unwrap();

        assert_eq!(payload.source, "p44-caldav.icloud.com");
        assert_eq!(payload.count, 2);
        assert_eq!(payload.events[0].title, "Morning run");
        assert!(payload.events[1].all_day);
    }

    #[tokio::test]
    async fn test_cached_payload_served_without_refetch() {
        let fetcher = Arc::new(CountingFetcher::new());
        let uc = use_case(fetcher.clone(), config(Duration::from_secs(600)));

        for _ in 0..5 {
            let payload = uc.execute("1.2.3.4").await.unwrap();
            assert_eq!(payload.count, 2);
        }

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_refetch() {
        let fetcher = Arc::new(CountingFetcher::new());
        let uc = use_case(fetcher.clone(), config(Duration::from_millis(50)));

        uc.execute("1.2.3.4").await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        uc.execute("1.2.3.4").await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_as_upstream_error() {
        let uc = use_case(Arc::new(FailingFetcher), config(Duration::from_secs(600)));
        let err = uc.execute("1.2.3.4").await.unwrap_err();

        assert!(matches!(err, CalendarError::Upstream(_)));
        assert_eq!(err.kind().status_code(), 503);
    }

    #[tokio::test]
    async fn test_failed_refresh_does_not_populate_cache() {
        let failing = use_case(Arc::new(FailingFetcher), config(Duration::from_secs(600)));
        failing.execute("1.2.3.4").await.unwrap_err();
        // A second call hits upstream again instead of a poisoned cache
        failing.execute("1.2.3.4").await.unwrap_err();
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let cfg = CalendarConfig {
            events_limit: RateLimitConfig::new(2, 60),
            ..config(Duration::from_secs(600))
        };
        let uc = use_case(Arc::new(CountingFetcher::new()), cfg);

        uc.execute("1.2.3.4").await.unwrap();
        uc.execute("1.2.3.4").await.unwrap();
        let err = uc.execute("1.2.3.4").await.unwrap_err();

        match err {
            CalendarError::RateLimited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= 60);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_checked_before_cache() {
        let cfg = CalendarConfig {
            events_limit: RateLimitConfig::new(1, 60),
            ..config(Duration::from_secs(600))
        };
        let uc = use_case(Arc::new(CountingFetcher::new()), cfg);

        uc.execute("1.2.3.4").await.unwrap();
        // Cached payload exists, but the limit still applies
        let err = uc.execute("1.2.3.4").await.unwrap_err();
        assert!(matches!(err, CalendarError::RateLimited { .. }));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use crate::application::config::CalendarConfig;
    use crate::presentation::router::calendar_router;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use platform::rate_limit::MemoryRateLimitStore;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn request() -> Request<Body> {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        Request::builder()
            .method("GET")
            .uri("/calendar/events")
            .extension(ConnectInfo(addr))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn config() -> Arc<CalendarConfig> {
        Arc::new(CalendarConfig {
            source_url: "https://p44-caldav.icloud.com/published/2/feed".to_string(),
            ..CalendarConfig::default()
        })
    }

    #[tokio::test]
    async fn test_events_happy_path() {
        let app = calendar_router(
            Arc::new(CountingFetcher::new()),
            Arc::new(MemoryRateLimitStore::new(100)),
            config(),
        );

        let response = app.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["source"], "p44-caldav.icloud.com");
        assert_eq!(json["count"], 2);
        assert_eq!(json["events"][0]["title"], "Morning run");
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_503_with_empty_events() {
        let app = calendar_router(
            Arc::new(FailingFetcher),
            Arc::new(MemoryRateLimitStore::new(100)),
            config(),
        );

        let response = app.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["source"], "p44-caldav.icloud.com");
        assert_eq!(json["count"], 0);
        assert_eq!(json["events"].as_array().unwrap().len(), 0);
    }
}
