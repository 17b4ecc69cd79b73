// src/pipeline/search.rs

//! Search pipeline.

use crate::error::Result;
use crate::models::Config;
use crate::services::SearchClient;

/// Search for `term` and return one result URL per line.
pub async fn run_search(config: &Config, term: &str) -> Result<String> {
    let client = SearchClient::new(config)?;
    let results = client.search(term).await?;

    if results.is_empty() {
        log::warn!("No results found for '{}'", term);
    }

    Ok(results.render())
}
