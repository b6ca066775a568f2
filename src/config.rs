//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_AI_URL: &str = "http://127.0.0.1:3000/api/ai";
pub const DEFAULT_AI_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_AI_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 250;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const DEFAULT_LOG_FILTER: &str = "info";
const DATA_DIR_NAME: &str = ".inchdesk";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    ZeroInterval { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub url: String,
    pub timeouts: AiTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub ai: AiConfig,
    pub flush_interval: Duration,
    pub frame_interval: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `INCHDESK_DATA_DIR`: default `$HOME/.inchdesk`, else `./.inchdesk`
    /// - `INCHDESK_LOG`: tracing filter, then `RUST_LOG`, then `info`
    /// - `INCHDESK_AI_URL`: default [`DEFAULT_AI_URL`]
    /// - `INCHDESK_AI_TIMEOUT_SECS`: default 15
    /// - `INCHDESK_AI_CONNECT_TIMEOUT_SECS`: default 5
    /// - `INCHDESK_FLUSH_INTERVAL_MS`: default 250
    /// - `INCHDESK_FRAME_INTERVAL_MS`: default 16
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-HTTP AI URL or a zero interval.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var_os("INCHDESK_DATA_DIR").map_or_else(default_data_dir, PathBuf::from);
        let log_filter = std::env::var("INCHDESK_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let url = std::env::var("INCHDESK_AI_URL").unwrap_or_else(|_| DEFAULT_AI_URL.to_string());
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { var: "INCHDESK_AI_URL", value: url });
        }
        let timeouts = AiTimeouts {
            request_secs: env_parse("INCHDESK_AI_TIMEOUT_SECS", DEFAULT_AI_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("INCHDESK_AI_CONNECT_TIMEOUT_SECS", DEFAULT_AI_CONNECT_TIMEOUT_SECS),
        };

        let flush_interval = interval_ms("INCHDESK_FLUSH_INTERVAL_MS", DEFAULT_FLUSH_INTERVAL_MS)?;
        let frame_interval = interval_ms("INCHDESK_FRAME_INTERVAL_MS", DEFAULT_FRAME_INTERVAL_MS)?;

        Ok(Self { data_dir, log_filter, ai: AiConfig { url, timeouts }, flush_interval, frame_interval })
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from(DATA_DIR_NAME), |home| PathBuf::from(home).join(DATA_DIR_NAME))
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn interval_ms(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env_parse(var, default) {
        0 => Err(ConfigError::ZeroInterval { var }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
