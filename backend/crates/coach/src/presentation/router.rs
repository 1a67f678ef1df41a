//! Coach Router

use crate::application::config::CoachConfig;
use crate::domain::gateway::GenerativeGateway;
use crate::presentation::handlers::{self, CoachAppState};
use axum::{Router, routing::post};
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Create the coach router for any gateway / rate-limit store pair
pub fn coach_router<G, S>(gateway: Arc<G>, limiter: Arc<S>, config: Arc<CoachConfig>) -> Router
where
    G: GenerativeGateway + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = CoachAppState {
        gateway,
        limiter,
        config,
    };

    Router::new()
        .route("/chat", post(handlers::chat::<G, S>))
        .route("/dice-comment", post(handlers::dice_comment::<G, S>))
        .with_state(state)
}
