//! Application Configuration
//!
//! Configuration for the calendar application layer.

use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Calendar application configuration
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Published ICS source (webcal:// is accepted and rewritten)
    pub source_url: String,
    /// How long a fetched payload stays servable
    pub cache_ttl: Duration,
    /// Hard timeout for the upstream fetch
    pub fetch_timeout: Duration,
    /// Rate limit for the calendar-events scope
    pub events_limit: RateLimitConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            cache_ttl: Duration::from_secs(600),
            fetch_timeout: Duration::from_secs(10),
            events_limit: RateLimitConfig::new(30, 60),
        }
    }
}

/// Label shown to clients as the feed source: the host of the source URL,
/// never the full URL (published calendar paths are capability URLs).
pub fn source_label(source_url: &str) -> String {
    source_url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .filter(|host| !host.is_empty())
        .unwrap_or("calendar")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_label_is_host_only() {
        assert_eq!(
            source_label("https://p44-caldav.icloud.com/published/2/secret-path"),
            "p44-caldav.icloud.com"
        );
        assert_eq!(source_label("webcal://example.com/feed"), "example.com");
        assert_eq!(source_label(""), "calendar");
        assert_eq!(source_label("nonsense"), "calendar");
    }
}
