// src/pipeline/run.rs

use crate::error::Result;
use crate::models::Config;
use crate::storage::{CacheStore, PageCache};

use super::fetch::run_fetch;
use super::search::run_search;

/// A single user-requested operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Fetch a URL and render its headings and links
    Fetch { url: String, strip_tags: bool },
    /// Query the search engine
    Search { term: String },
}

impl Operation {
    /// Prefix for the diagnostic printed when the operation fails.
    pub fn failure_label(&self) -> &'static str {
        match self {
            Operation::Fetch { .. } => "Error fetching URL",
            Operation::Search { .. } => "Error performing search",
        }
    }
}

/// Run one operation inside the cache lifecycle.
///
/// The cache is loaded from `store` before the operation and saved after it,
/// whether or not the operation succeeded. A failed save is reported but
/// does not change the operation's result.
pub async fn run_operation(
    config: &Config,
    store: &dyn CacheStore,
    operation: &Operation,
) -> Result<String> {
    let mut cache = PageCache::load(store).await;

    let result = match operation {
        Operation::Fetch { url, strip_tags } => {
            run_fetch(config, &mut cache, url, *strip_tags).await
        }
        Operation::Search { term } => run_search(config, term).await,
    };

    if let Err(e) = cache.save(store).await {
        log::error!("Error saving cache: {}", e);
    }

    result
}
