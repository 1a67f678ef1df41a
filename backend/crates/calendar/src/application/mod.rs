//! Calendar Application Layer - Use Cases

pub mod config;
pub mod fetch_events;

pub use fetch_events::FetchEventsUseCase;
