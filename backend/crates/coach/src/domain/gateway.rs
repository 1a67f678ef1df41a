//! Generative Gateway Trait
//!
//! Interface to the upstream text-completion service. Implementation is
//! in the infrastructure layer.

use crate::domain::message::ChatMessage;
use thiserror::Error;

/// Errors surfaced by a generative gateway
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No API key configured - the AI module is effectively absent
    #[error("generative gateway is not configured")]
    Unavailable,

    /// The upstream call timed out
    #[error("upstream request timed out")]
    Timeout,

    /// The upstream call failed (network error, bad status, bad payload)
    #[error("upstream request failed: {0}")]
    Request(String),
}

/// Generative text-completion gateway trait
#[trait_variant::make(GenerativeGateway: Send)]
pub trait LocalGenerativeGateway {
    /// Produce a completion for `message` given the prior conversation.
    async fn generate(&self, history: &[ChatMessage], message: &str)
    -> Result<String, GatewayError>;
}
