//! Configuration for the Twitter API client and deletion pacing
//!
//! Tunables come from an optional `deletetweets.yml`; credentials come from
//! the environment only and are gathered once at startup.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default constants (used when no config file is present)
pub const CONFIG_FILE: &str = "deletetweets.yml";
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";
pub const DEFAULT_PACING_MS: u64 = 500;

/// Maximum number of statuses the timeline endpoints return per call.
pub const PAGE_SIZE: u32 = 200;

/// Length of the `window.YTD.tweet.part0 = ` preamble in archive exports.
pub const ARCHIVE_PREFIX_LEN: usize = 25;

/// Source argument that switches from archive mode to live mode.
pub const LIVE_SOURCE: &str = "twitter";

pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const ENV_API_URL: &str = "TWITTER_API_URL";

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    api: Option<ApiConfig>,
    pacing: Option<PacingConfig>,
}

#[derive(Debug, Deserialize)]
struct ApiConfig {
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PacingConfig {
    delay_ms: Option<u64>,
}

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Delay inserted between consecutive API calls.
    pub pacing: Duration,
}

impl Config {
    /// Load an explicit config file, or fall back to [`CONFIG_FILE`] / defaults.
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_from_file(CONFIG_FILE),
            None => Ok(Self::defaults().with_env_overrides()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

        let api_base_url = yaml
            .api
            .and_then(|api| api.base_url)
            .map(resolve_placeholder)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let delay_ms = yaml
            .pacing
            .and_then(|p| p.delay_ms)
            .unwrap_or(DEFAULT_PACING_MS);

        Ok(Self {
            api_base_url,
            pacing: Duration::from_millis(delay_ms),
        }
        .with_env_overrides())
    }

    fn defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }
}

/// Resolve a `${VAR}` placeholder from the environment; other values pass through.
fn resolve_placeholder(value: String) -> String {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        return std::env::var(var_name).unwrap_or_default();
    }
    value
}

/// OAuth 1.0a user-context credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Read all four secrets from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary key lookup, reporting every missing key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |key: &'static str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key);
                String::new()
            }
        };

        let credentials = Self {
            consumer_key: fetch(ENV_CONSUMER_KEY),
            consumer_secret: fetch(ENV_CONSUMER_SECRET),
            access_token: fetch(ENV_ACCESS_TOKEN),
            access_token_secret: fetch(ENV_ACCESS_TOKEN_SECRET),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(Error::MissingCredentials(missing))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}
