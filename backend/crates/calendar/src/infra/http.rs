//! ICS Fetcher
//!
//! HTTP adapter for the published calendar source.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by an ICS fetcher
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The upstream fetch timed out
    #[error("calendar fetch timed out")]
    Timeout,

    /// The upstream returned a non-success status
    #[error("calendar source returned status {0}")]
    Status(u16),

    /// Network or protocol failure
    #[error("calendar fetch failed: {0}")]
    Request(String),
}

/// Trait for fetching the raw ICS document
#[trait_variant::make(IcsFetcher: Send)]
pub trait LocalIcsFetcher {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Rewrite a `webcal://` subscription URL to plain HTTPS.
pub fn normalize_source_url(url: &str) -> String {
    match url.strip_prefix("webcal://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Reqwest-backed fetcher with a hard request timeout
#[derive(Clone)]
pub struct HttpIcsFetcher {
    http: reqwest::Client,
    url: String,
}

impl HttpIcsFetcher {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: normalize_source_url(url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IcsFetcher for HttpIcsFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.http.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Request(format!("{}", e.without_url()))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Request(format!("{}", e.without_url())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webcal_rewritten_to_https() {
        assert_eq!(
            normalize_source_url("webcal://p44-caldav.icloud.com/published/2/abc"),
            "https://p44-caldav.icloud.com/published/2/abc"
        );
        assert_eq!(
            normalize_source_url("https://example.com/feed.ics"),
            "https://example.com/feed.ics"
        );
    }
}
