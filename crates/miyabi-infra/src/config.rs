//! Environment configuration.
//!
//! All credentials come from environment variables; required ones fail fast
//! at startup with `ConfigError::Missing`. The weather notifier is enabled
//! only when `WEATHER_API_KEY` is present.

use std::path::PathBuf;

use miyabi_types::error::ConfigError;

const DEFAULT_MODEL: &str = "mulabo_gpt35";
const DEFAULT_CITY: &str = "Tokyo";

/// Complete process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line: LineConfig,
    pub chat: ChatConfig,
    pub weather: Option<WeatherConfig>,
    /// Directory holding the subscription file.
    pub data_dir: PathBuf,
}

/// Messaging platform credentials.
#[derive(Debug, Clone)]
pub struct LineConfig {
    pub access_token: String,
    pub channel_secret: String,
}

/// Chat completion endpoint settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Weather API settings (notifier enabled iff present).
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub city: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Required: `LINE_CHANNEL_ACCESS_TOKEN`, `LINE_CHANNEL_SECRET`,
    /// `CHAT_API_BASE`, `CHAT_API_KEY`.
    /// Optional: `CHAT_MODEL`, `WEATHER_API_KEY`, `WEATHER_CITY`,
    /// `MIYABI_DATA_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            line: LineConfig {
                access_token: require("LINE_CHANNEL_ACCESS_TOKEN")?,
                channel_secret: require("LINE_CHANNEL_SECRET")?,
            },
            chat: ChatConfig {
                base_url: require("CHAT_API_BASE")?,
                api_key: require("CHAT_API_KEY")?,
                model: optional("CHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            weather: optional("WEATHER_API_KEY").map(|api_key| WeatherConfig {
                api_key,
                city: optional("WEATHER_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string()),
            }),
            data_dir: resolve_data_dir(),
        })
    }
}

/// Resolve the data directory: `MIYABI_DATA_DIR`, else `~/.miyabi`.
pub fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = optional("MIYABI_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".miyabi")
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
