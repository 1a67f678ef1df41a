//! Coach Error Types
//!
//! Coach-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Coach-specific result type alias
pub type CoachResult<T> = Result<T, CoachError>;

/// Coach-specific error variants
///
/// These map to HTTP status codes and convert to `AppError` for the
/// response body, so the 4xx detail text below is client-visible.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Chat message was empty or whitespace-only
    #[error("Message must not be empty")]
    EmptyMessage,

    /// Chat message exceeded the configured character ceiling
    #[error("Message exceeds the {max} character limit")]
    MessageTooLong { max: usize },

    /// Dice-comment distance was empty
    #[error("Distance must not be empty")]
    EmptyDistance,

    /// Rate limit exceeded for this client
    #[error("Rate limit exceeded, try again later")]
    RateLimited { retry_after_secs: u64 },

    /// Generative upstream failed; detail is logged, never sent to clients
    #[error("AI request failed")]
    Upstream(String),

    /// Internal error
    #[error("Internal error")]
    Internal(String),
}

impl CoachError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoachError::EmptyMessage | CoachError::EmptyDistance => ErrorKind::BadRequest,
            CoachError::MessageTooLong { .. } => ErrorKind::PayloadTooLarge,
            CoachError::RateLimited { .. } => ErrorKind::TooManyRequests,
            CoachError::Upstream(_) | CoachError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CoachError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Coach upstream failure");
            }
            CoachError::Internal(detail) => {
                tracing::error!(detail = %detail, "Coach internal error");
            }
            CoachError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Coach rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Coach input rejected");
            }
        }
    }
}

impl From<CoachError> for AppError {
    fn from(err: CoachError) -> Self {
        let kind = err.kind();
        let app_err = AppError::new(kind, err.to_string());
        match err {
            CoachError::RateLimited { retry_after_secs } => {
                app_err.with_retry_after(retry_after_secs)
            }
            _ => app_err,
        }
    }
}

impl IntoResponse for CoachError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
