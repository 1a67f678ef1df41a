//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for POST /chat
///
/// `history` is kept as raw JSON values on purpose: malformed entries are
/// dropped during sanitization instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Value>,
}

/// Response for POST /chat
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Request for POST /dice-comment
#[derive(Debug, Clone, Deserialize)]
pub struct DiceCommentRequest {
    pub distance: String,
}

/// Response for POST /dice-comment
#[derive(Debug, Clone, Serialize)]
pub struct DiceCommentResponse {
    pub comment: String,
}
