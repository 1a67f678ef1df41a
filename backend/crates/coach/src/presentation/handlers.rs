//! HTTP Handlers

use crate::application::chat::ChatUseCase;
use crate::application::config::CoachConfig;
use crate::application::dice_comment::DiceCommentUseCase;
use crate::domain::gateway::GenerativeGateway;
use crate::error::CoachResult;
use crate::presentation::dto::{
    ChatRequest, ChatResponse, DiceCommentRequest, DiceCommentResponse,
};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use platform::client::client_identity;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Shared state for coach handlers
pub struct CoachAppState<G, S>
where
    G: GenerativeGateway + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    pub gateway: Arc<G>,
    pub limiter: Arc<S>,
    pub config: Arc<CoachConfig>,
}

impl<G, S> Clone for CoachAppState<G, S>
where
    G: GenerativeGateway + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            limiter: self.limiter.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /chat
pub async fn chat<G, S>(
    State(state): State<CoachAppState<G, S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<ChatRequest>,
) -> CoachResult<Json<ChatResponse>>
where
    G: GenerativeGateway + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let identity = client_identity(&headers, Some(addr.ip()));

    let use_case = ChatUseCase::new(
        state.gateway.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let response = use_case
        .execute(&identity, &req.message, &req.history)
        .await?;

    Ok(Json(ChatResponse { response }))
}

/// POST /dice-comment
pub async fn dice_comment<G, S>(
    State(state): State<CoachAppState<G, S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<DiceCommentRequest>,
) -> CoachResult<Json<DiceCommentResponse>>
where
    G: GenerativeGateway + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let identity = client_identity(&headers, Some(addr.ip()));

    let use_case = DiceCommentUseCase::new(
        state.gateway.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let comment = use_case.execute(&identity, &req.distance).await?;

    Ok(Json(DiceCommentResponse { comment }))
}
