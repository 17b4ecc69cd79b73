//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Page fetching behavior
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Search engine settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Persisted page cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.connect_timeout_ms == 0 {
            return Err(AppError::validation(
                "fetcher.connect_timeout_ms must be > 0",
            ));
        }
        if self.fetcher.read_timeout_ms == 0 {
            return Err(AppError::validation("fetcher.read_timeout_ms must be > 0"));
        }
        if self.search.endpoint.trim().is_empty() {
            return Err(AppError::validation("search.endpoint is empty"));
        }
        url::Url::parse(&self.search.endpoint)
            .map_err(|e| AppError::validation(format!("search.endpoint is invalid: {e}")))?;
        if self.search.user_agent.trim().is_empty() {
            return Err(AppError::validation("search.user_agent is empty"));
        }
        if self.search.max_results == 0 {
            return Err(AppError::validation("search.max_results must be > 0"));
        }
        if self.cache.path.as_os_str().is_empty() {
            return Err(AppError::validation("cache.path is empty"));
        }
        Ok(())
    }
}

/// HTTP settings for page fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for page requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Connect timeout in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub read_timeout_ms: u64,

    /// Maximum number of redirect hops before giving up
    #[serde(default = "defaults::max_redirects")]
    pub max_redirects: usize,
}

impl FetcherConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            connect_timeout_ms: defaults::timeout_ms(),
            read_timeout_ms: defaults::timeout_ms(),
            max_redirects: defaults::max_redirects(),
        }
    }
}

/// Search engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Query endpoint; the encoded term is appended as `?q=`
    #[serde(default = "defaults::search_endpoint")]
    pub endpoint: String,

    /// Browser-like User-Agent; the engine serves different markup without one
    #[serde(default = "defaults::search_user_agent")]
    pub user_agent: String,

    /// Maximum result URLs to keep
    #[serde(default = "defaults::max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::search_endpoint(),
            user_agent: defaults::search_user_agent(),
            max_results: defaults::max_results(),
        }
    }
}

/// Page cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache file location, relative to the working directory
    #[serde(default = "defaults::cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: defaults::cache_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Fetcher defaults
    pub fn user_agent() -> String {
        concat!("go2web/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout_ms() -> u64 {
        5000
    }
    pub fn max_redirects() -> usize {
        10
    }

    // Search defaults
    pub fn search_endpoint() -> String {
        "https://www.google.com/search".into()
    }
    pub fn search_user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn max_results() -> usize {
        10
    }

    // Cache defaults
    pub fn cache_path() -> PathBuf {
        PathBuf::from("data.cache")
    }
}
