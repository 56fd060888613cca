//! Client configuration and credential handling.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::endpoints::Endpoints;
use crate::retry::RetryConfig;
use crate::Platform;

/// Primary environment variable holding the API key.
pub const API_KEY_ENV: &str = "TFTLADDER_API_KEY";

/// Fallback environment variable holding the API key.
pub const FALLBACK_API_KEY_ENV: &str = "RIOT_API_KEY";

/// Directory where fetched payloads land when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Pause between consecutive ladder pages. The API allows 100 requests per two minutes.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key found; set {API_KEY_ENV} or {FALLBACK_API_KEY_ENV}")]
    MissingApiKey,
}

/// An API key that never exposes its value in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    pub fn new(key: String) -> Self {
        Self { inner: key }
    }

    /// Only call this when actually sending the key upstream.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED])")
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

/// Resolve the API key through `lookup`, trying the primary variable first.
///
/// Blank values count as missing.
pub fn resolve_api_key<F>(lookup: F) -> Result<RedactedApiKey, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [API_KEY_ENV, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
        .map(RedactedApiKey::new)
        .ok_or(ConfigError::MissingApiKey)
}

/// Everything a [`LadderClient`](crate::LadderClient) needs to run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: RedactedApiKey,
    pub endpoints: Endpoints,
    pub data_dir: PathBuf,
    pub retry: RetryConfig,
    pub page_delay: Duration,
}

impl ClientConfig {
    pub fn new(api_key: RedactedApiKey, platform: Platform) -> Self {
        Self {
            api_key,
            endpoints: Endpoints::new(platform.base_url(), platform.regional().base_url()),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            retry: RetryConfig::default(),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Build from the process environment.
    pub fn from_env(platform: Platform) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(|name| std::env::var(name).ok())?;
        Ok(Self::new(api_key, platform))
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}
