//! Application Configuration
//!
//! Configuration for the coach application layer.

use platform::rate_limit::RateLimitConfig;

/// Coach application configuration
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Character ceiling for the chat message (413 above this)
    pub max_message_chars: usize,
    /// History entries kept (most recent first to go)
    pub max_history_entries: usize,
    /// Character ceiling per history entry content
    pub max_history_entry_chars: usize,
    /// Rate limit for the chat scope
    pub chat_limit: RateLimitConfig,
    /// Rate limit for the dice-comment scope
    pub dice_limit: RateLimitConfig,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 2000,
            max_history_entries: 20,
            max_history_entry_chars: 2000,
            chat_limit: RateLimitConfig::new(10, 60),
            dice_limit: RateLimitConfig::new(20, 60),
        }
    }
}
