//! Chat Message Value Objects
//!
//! The conversation history arrives from the browser as loose JSON so a
//! single malformed entry never fails the whole request; sanitization
//! turns it into well-formed [`ChatMessage`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name used by the Gemini API (`assistant` maps to `model`)
    pub fn gemini_name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

/// One well-formed history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Clamp a string to at most `max_chars` characters (not bytes).
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Sanitize a raw history array into well-formed messages.
///
/// - keeps only the most recent `max_entries` well-formed entries
/// - clamps each content to `max_entry_chars` characters
/// - silently drops non-object entries, unrecognized roles, and entries
///   with missing or empty content
pub fn sanitize_history(raw: &[Value], max_entries: usize, max_entry_chars: usize) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = raw
        .iter()
        .filter_map(|entry| {
            let object = entry.as_object()?;
            let role = match object.get("role")?.as_str()? {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                _ => return None,
            };
            let content = object.get("content")?.as_str()?.trim();
            if content.is_empty() {
                return None;
            }
            Some(ChatMessage::new(role, clamp_chars(content, max_entry_chars)))
        })
        .collect();

    if messages.len() > max_entries {
        messages.drain(..messages.len() - max_entries);
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_keeps_well_formed_entries() {
        let raw = vec![
            json!({"role": "user", "content": "hello"}),
            json!({"role": "assistant", "content": "hi"}),
        ];
        let messages = sanitize_history(&raw, 10, 100);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::new(Role::User, "hello"));
        assert_eq!(messages[1], ChatMessage::new(Role::Assistant, "hi"));
    }

    #[test]
    fn test_sanitize_drops_malformed_entries() {
        let raw = vec![
            json!("not an object"),
            json!(42),
            json!({"role": "system", "content": "sneaky"}),
            json!({"role": "user"}),
            json!({"role": "user", "content": ""}),
            json!({"role": "user", "content": "   "}),
            json!({"role": "user", "content": "kept"}),
        ];
        let messages = sanitize_history(&raw, 10, 100);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "kept");
    }

    #[test]
    fn test_sanitize_keeps_most_recent_entries() {
        let raw: Vec<Value> = (0..5)
            .map(|i| json!({"role": "user", "content": format!("m{}", i)}))
            .collect();
        let messages = sanitize_history(&raw, 2, 100);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "m3");
        assert_eq!(messages[1].content, "m4");
    }

    #[test]
    fn test_sanitize_clamps_content() {
        let raw = vec![json!({"role": "user", "content": "abcdefgh"})];
        let messages = sanitize_history(&raw, 10, 4);
        assert_eq!(messages[0].content, "abcd");
    }

    #[test]
    fn test_clamp_chars_multibyte() {
        // 3 Hangul characters, 9 bytes - clamp counts characters
        assert_eq!(clamp_chars("뛰어라", 2), "뛰어");
        assert_eq!(clamp_chars("뛰어라", 10), "뛰어라");
    }

    #[test]
    fn test_role_gemini_names() {
        assert_eq!(Role::User.gemini_name(), "user");
        assert_eq!(Role::Assistant.gemini_name(), "model");
    }
}
