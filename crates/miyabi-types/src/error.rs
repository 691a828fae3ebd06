//! Error taxonomy shared across the workspace.
//!
//! String payloads keep this crate free of reqwest/IO dependencies; the
//! infrastructure layer maps its concrete errors into these at the boundary.

use thiserror::Error;

/// Startup configuration errors. Fatal: the process refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Errors from the messaging platform (reply, push, profile lookup).
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("messaging request failed: {0}")]
    Request(String),

    #[error("messaging API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected messaging response: {0}")]
    InvalidResponse(String),
}

/// Errors from the weather API.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(String),

    #[error("weather API returned status {0}")]
    Status(u16),

    #[error("unexpected weather response: {0}")]
    Parse(String),
}

/// Errors from the notification subscription store.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription storage error: {0}")]
    Storage(String),

    #[error("subscription data is corrupt: {0}")]
    Corrupt(String),
}
