//! Calendar Feed Backend Module
//!
//! Serves the crew's published iCloud calendar as JSON: fetch the ICS
//! feed, parse events best-effort, and cache the result so repeated page
//! loads don't hammer the upstream.
//!
//! Clean Architecture structure:
//! - `domain/` - Calendar event entity
//! - `application/` - Fetch-events use case and config
//! - `infra/` - ICS parser and HTTP fetcher
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CalendarConfig;
pub use error::{CalendarError, CalendarResult};
pub use infra::http::HttpIcsFetcher;
pub use presentation::router::calendar_router;

#[cfg(test)]
mod tests;
