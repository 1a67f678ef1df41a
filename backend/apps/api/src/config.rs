//! Server Configuration
//!
//! All runtime configuration comes from environment variables (a `.env`
//! file is loaded in `main`). Every value has a usable default so the
//! server boots in development with an empty environment; only the AI
//! key and the calendar source genuinely need to be provided.

use calendar::CalendarConfig;
use coach::CoachConfig;
use platform::rate_limit::RateLimitConfig;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Comma-separated trusted site origins
    pub site_origins: String,
    pub static_dir: String,
    /// When set, a daily-rolling log file is written under this directory
    pub log_dir: Option<String>,
    pub app_version: String,
    /// Upper bound on tracked rate-limit buckets
    pub rate_limit_max_keys: usize,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub system_prompt_path: String,
    pub ai_timeout: Duration,
    pub coach: CoachConfig,
    pub calendar: CalendarConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let window_secs: u64 = env_parse("RATE_LIMIT_WINDOW_SECS", 60);

        let coach = CoachConfig {
            max_message_chars: env_parse("CHAT_MAX_MESSAGE_CHARS", 2000),
            max_history_entries: env_parse("CHAT_MAX_HISTORY", 20),
            max_history_entry_chars: env_parse("CHAT_MAX_HISTORY_CHARS", 2000),
            chat_limit: RateLimitConfig::new(env_parse("CHAT_RATE_LIMIT", 10), window_secs),
            dice_limit: RateLimitConfig::new(env_parse("DICE_RATE_LIMIT", 20), window_secs),
        };

        let calendar = CalendarConfig {
            source_url: env_opt("CALENDAR_SOURCE_URL").unwrap_or_default(),
            cache_ttl: Duration::from_secs(env_parse("CALENDAR_CACHE_TTL_SECS", 600)),
            fetch_timeout: Duration::from_secs(10),
            events_limit: RateLimitConfig::new(env_parse("CALENDAR_RATE_LIMIT", 30), window_secs),
        };

        Self {
            bind_addr: env_parse("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113))),
            site_origins: env_opt("SITE_ORIGINS")
                .unwrap_or_else(|| "http://localhost:31113,http://127.0.0.1:31113".to_string()),
            static_dir: env_opt("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            log_dir: env_opt("LOG_DIR"),
            app_version: env_opt("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            rate_limit_max_keys: env_parse("RATE_LIMIT_MAX_KEYS", 10_000),
            google_api_key: env_opt("GOOGLE_API_KEY"),
            gemini_model: env_opt("GEMINI_MODEL").unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            system_prompt_path: env_opt("SYSTEM_PROMPT_PATH")
                .unwrap_or_else(|| "system_prompt.md".to_string()),
            ai_timeout: Duration::from_secs(env_parse("AI_TIMEOUT_SECS", 30)),
            coach,
            calendar,
        }
    }
}
