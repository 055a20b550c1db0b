use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::data_models::DEFAULT_REGION;
use crate::query_builder::DEFAULT_RELEVANCE_LANGUAGE;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7860";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process configuration. Read once by the binary at startup and handed
/// to whatever needs it; library code never reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when `API_KEY` is unset or blank.
    pub api_key: Option<String>,
    pub api_base: String,
    pub relevance_language: String,
    pub default_region: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            relevance_language: DEFAULT_RELEVANCE_LANGUAGE.to_string(),
            default_region: DEFAULT_REGION.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        let timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a number, got {raw:?}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_key: non_blank(env::var("API_KEY").ok()),
            api_base: get_env_or_default("YOUTUBE_API_BASE", DEFAULT_API_BASE),
            relevance_language: get_env_or_default(
                "RELEVANCE_LANGUAGE",
                DEFAULT_RELEVANCE_LANGUAGE,
            ),
            default_region: get_env_or_default("DEFAULT_REGION", DEFAULT_REGION),
            bind_addr: get_env_or_default("BIND_ADDR", DEFAULT_BIND_ADDR),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// A key given on the command line wins over the environment.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Config {
        if let Some(key) = non_blank(api_key) {
            self.api_key = Some(key);
        }
        self
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    non_blank(env::var(key).ok()).unwrap_or_else(|| default.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
