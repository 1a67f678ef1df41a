//! Chat Use Case

use crate::application::config::CoachConfig;
use crate::domain::gateway::{GatewayError, GenerativeGateway};
use crate::domain::message::{clamp_chars, sanitize_history};
use crate::error::{CoachError, CoachResult};
use platform::rate_limit::RateLimitStore;
use serde_json::Value;
use std::sync::Arc;

/// Rate-limit scope label for chat requests
pub const CHAT_SCOPE: &str = "chat";

/// Chat Use Case
pub struct ChatUseCase<G, S>
where
    G: GenerativeGateway,
    S: RateLimitStore,
{
    gateway: Arc<G>,
    limiter: Arc<S>,
    config: Arc<CoachConfig>,
}

impl<G, S> ChatUseCase<G, S>
where
    G: GenerativeGateway,
    S: RateLimitStore,
{
    pub fn new(gateway: Arc<G>, limiter: Arc<S>, config: Arc<CoachConfig>) -> Self {
        Self {
            gateway,
            limiter,
            config,
        }
    }

    pub async fn execute(
        &self,
        identity: &str,
        message: &str,
        raw_history: &[Value],
    ) -> CoachResult<String> {
        // Check rate limit
        let result = self
            .limiter
            .check(CHAT_SCOPE, identity, &self.config.chat_limit)
            .await;
        if !result.allowed {
            return Err(CoachError::RateLimited {
                retry_after_secs: result.retry_after_secs,
            });
        }

        // Validate input
        let message = message.trim();
        if message.is_empty() {
            return Err(CoachError::EmptyMessage);
        }
        if message.chars().count() > self.config.max_message_chars {
            return Err(CoachError::MessageTooLong {
                max: self.config.max_message_chars,
            });
        }

        let history = sanitize_history(
            raw_history,
            self.config.max_history_entries,
            self.config.max_history_entry_chars,
        );

        let reply = self
            .gateway
            .generate(&history, clamp_chars(message, self.config.max_message_chars))
            .await
            .map_err(|e| match e {
                GatewayError::Unavailable => {
                    CoachError::Upstream("gateway not configured".to_string())
                }
                GatewayError::Timeout => CoachError::Upstream("upstream timeout".to_string()),
                GatewayError::Request(detail) => CoachError::Upstream(detail),
            })?;

        tracing::info!(
            history_entries = history.len(),
            message_chars = message.chars().count(),
            reply_chars = reply.chars().count(),
            "Chat completion served"
        );

        Ok(reply)
    }
}
