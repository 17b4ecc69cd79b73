// src/utils/http.rs

//! HTTP client utilities.

use reqwest::redirect::Policy;

use crate::error::Result;
use crate::models::{FetcherConfig, SearchConfig};

/// Create the client used for page fetches.
///
/// Redirects are not followed automatically; the fetcher walks them itself.
pub fn create_fetch_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(config.connect_timeout())
        .read_timeout(config.read_timeout())
        .redirect(Policy::none())
        .build()?;
    Ok(client)
}

/// Create the client used for search requests.
pub fn create_search_client(
    search: &SearchConfig,
    fetcher: &FetcherConfig,
) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&search.user_agent)
        .connect_timeout(fetcher.connect_timeout())
        .read_timeout(fetcher.read_timeout())
        .build()?;
    Ok(client)
}

/// Read a whole response body as UTF-8, replacing invalid sequences.
pub async fn read_body(response: reqwest::Response) -> Result<String> {
    let bytes = response.bytes().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
