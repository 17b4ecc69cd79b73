// src/error.rs

//! Unified error handling for go2web.

use std::fmt;

use thiserror::Error;

/// Result type alias for go2web operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (DNS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Server answered with a status that is neither success nor a followed redirect
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Redirect response without a usable `Location` header
    #[error("Redirect from {url} has no Location header")]
    MissingLocation { url: String },

    /// Redirect chain exceeded the configured hop limit
    #[error("Too many redirects starting at {url} (limit {limit})")]
    TooManyRedirects { url: String, limit: usize },

    /// Persisted cache could not be read or parsed
    #[error("Cache load error: {0}")]
    CacheLoad(String),

    /// Persisted cache could not be written
    #[error("Cache save error: {0}")]
    CacheSave(String),

    /// Percent-decoding of a search result target failed
    #[error("Decode error for '{input}': {message}")]
    Decode { input: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a cache load error.
    pub fn cache_load(message: impl fmt::Display) -> Self {
        Self::CacheLoad(message.to_string())
    }

    /// Create a cache save error.
    pub fn cache_save(message: impl fmt::Display) -> Self {
        Self::CacheSave(message.to_string())
    }

    /// Create a decode error for a single extracted value.
    pub fn decode(input: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            input: input.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error came from the network layer or the remote server.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::MissingLocation { .. }
        )
    }
}
