//! Calendar Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Calendar-specific result type alias
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Calendar-specific error variants
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Rate limit exceeded for this client
    #[error("Rate limit exceeded, try again later")]
    RateLimited { retry_after_secs: u64 },

    /// The ICS feed could not be fetched; the handler degrades this to a
    /// 503 with an empty-events payload
    #[error("Calendar source unavailable")]
    Upstream(String),

    /// Internal error
    #[error("Internal error")]
    Internal(String),
}

impl CalendarError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalendarError::RateLimited { .. } => ErrorKind::TooManyRequests,
            CalendarError::Upstream(_) => ErrorKind::ServiceUnavailable,
            CalendarError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            CalendarError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Calendar upstream failure");
            }
            CalendarError::Internal(detail) => {
                tracing::error!(detail = %detail, "Calendar internal error");
            }
            CalendarError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Calendar rate limit exceeded");
            }
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        let kind = err.kind();
        let app_err = AppError::new(kind, err.to_string());
        match err {
            CalendarError::RateLimited { retry_after_secs } => {
                app_err.with_retry_after(retry_after_secs)
            }
            _ => app_err,
        }
    }
}

impl IntoResponse for CalendarError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
