//! Client configuration.

use std::time::Duration;

use crate::provider::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

const ENV_API_KEY: &str = "FORGEFLEET_STEAM_API_KEY";
const ENV_API_URL: &str = "FORGEFLEET_STEAM_API_URL";
const ENV_TIMEOUT_SECS: &str = "FORGEFLEET_STEAM_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "FORGEFLEET_STEAM_MAX_ATTEMPTS";

/// Settings for [`SteamWorkshopClient`](crate::SteamWorkshopClient).
#[derive(Debug, Clone)]
pub struct SteamWorkshopConfig {
    /// Web API key. The published-file endpoints work without one, but keyed
    /// requests get a higher rate limit.
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for SteamWorkshopConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl SteamWorkshopConfig {
    /// Builds a config from `FORGEFLEET_STEAM_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                config.api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_env::<u32>(ENV_MAX_ATTEMPTS) {
            config.retry.max_attempts = attempts.max(1);
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
