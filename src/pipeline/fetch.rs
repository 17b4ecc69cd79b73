// src/pipeline/fetch.rs

//! Fetch-and-display pipeline.

use crate::error::Result;
use crate::models::Config;
use crate::services::Fetcher;
use crate::services::extractor::{extract_content, render, strip_content};
use crate::storage::PageCache;

/// Header printed above rendered page content.
pub const CONTENT_HEADER: &str = "Content of the page:";

/// Fetch `url` through `cache` and render its headings and links.
pub async fn run_fetch(
    config: &Config,
    cache: &mut PageCache,
    url: &str,
    strip_tags: bool,
) -> Result<String> {
    let mut fetcher = Fetcher::new(&config.fetcher, cache)?;
    let page = fetcher.fetch(url).await?;

    let mut content = extract_content(&page.body);
    if strip_tags {
        content = strip_content(content);
    }
    if content.is_empty() {
        log::warn!("No headings or links found on {}", page.final_url);
    }
    log::debug!(
        "{} headings, {} links from {}",
        content.headings.len(),
        content.links.len(),
        page.final_url
    );

    let rendered = render(&content);
    if rendered.is_empty() {
        Ok(CONTENT_HEADER.to_string())
    } else {
        Ok(format!("{CONTENT_HEADER}\n{rendered}"))
    }
}
