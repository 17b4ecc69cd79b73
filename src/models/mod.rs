// src/models/mod.rs

//! Domain models for go2web.

mod config;
mod page;

// Re-export all public types
pub use config::{CacheConfig, Config, FetcherConfig, SearchConfig};
pub use page::{ExtractedContent, Link, Page, SearchResults};
