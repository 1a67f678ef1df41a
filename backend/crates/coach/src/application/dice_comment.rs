//! Dice Comment Use Case
//!
//! One-liner coach comment for the dice-roll mini game. The AI upstream
//! is best-effort here: any gateway failure degrades to a canned drill
//! line so the game never breaks.

use crate::application::config::CoachConfig;
use crate::domain::gateway::GenerativeGateway;
use crate::error::{CoachError, CoachResult};
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Rate-limit scope label for dice-comment requests
pub const DICE_SCOPE: &str = "dice-comment";

/// Fallback line when the AI module is missing or the call fails
pub fn fallback_comment(distance: &str) -> String {
    format!("{} 뛰어라. (AI 모듈 누락)", distance)
}

/// Dice Comment Use Case
pub struct DiceCommentUseCase<G, S>
where
    G: GenerativeGateway,
    S: RateLimitStore,
{
    gateway: Arc<G>,
    limiter: Arc<S>,
    config: Arc<CoachConfig>,
}

impl<G, S> DiceCommentUseCase<G, S>
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

    pub async fn execute(&self, identity: &str, distance: &str) -> CoachResult<String> {
        let result = self
            .limiter
            .check(DICE_SCOPE, identity, &self.config.dice_limit)
            .await;
        if !result.allowed {
            return Err(CoachError::RateLimited {
                retry_after_secs: result.retry_after_secs,
            });
        }

        let distance = distance.trim();
        if distance.is_empty() {
            return Err(CoachError::EmptyDistance);
        }

        let prompt = format!(
            "주사위 결과로 오늘의 러닝 거리가 {}로 정해졌다. \
             악마 교관답게 반말로, 한 문장으로 짧고 굵게 뛰라고 명령해라.",
            distance
        );

        match self.gateway.generate(&[], &prompt).await {
            Ok(comment) => Ok(comment.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, distance, "Dice comment falling back to canned line");
                Ok(fallback_comment(distance))
            }
        }
    }
}
