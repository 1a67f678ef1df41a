//! Devil Coach Backend Module
//!
//! AI running-coach feature: the `/chat` conversation endpoint and the
//! `/dice-comment` one-liner endpoint, both proxying a generative-AI
//! upstream behind input validation and per-client rate limiting.
//!
//! Clean Architecture structure:
//! - `domain/` - Chat message value objects, gateway trait
//! - `application/` - Use cases (chat, dice comment) and config
//! - `infra/` - Gemini HTTP adapter
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CoachConfig;
pub use error::{CoachError, CoachResult};
pub use infra::gemini::GeminiClient;
pub use presentation::router::coach_router;
