//! Page fetcher with manual redirect handling.
//!
//! Each hop first consults the page cache; only a miss goes to the network.
//! 301/302/303 responses are followed one at a time up to a hop limit.

use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FetcherConfig, Page};
use crate::storage::PageCache;
use crate::utils::{http, normalize_url, resolve_url};

/// Fetches pages through a borrowed [`PageCache`].
pub struct Fetcher<'c> {
    client: Client,
    cache: &'c mut PageCache,
    max_redirects: usize,
}

impl<'c> Fetcher<'c> {
    /// Create a fetcher with a client built from `config`.
    pub fn new(config: &FetcherConfig, cache: &'c mut PageCache) -> Result<Self> {
        let client = http::create_fetch_client(config)?;
        Ok(Self::with_client(client, cache, config.max_redirects))
    }

    /// Create a fetcher around an existing client.
    ///
    /// The client must not follow redirects on its own.
    pub fn with_client(client: Client, cache: &'c mut PageCache, max_redirects: usize) -> Self {
        Self {
            client,
            cache,
            max_redirects,
        }
    }

    /// Fetch `url`, following redirects and filling the cache.
    ///
    /// A body fetched from the network is cached under the requested URL,
    /// even when it was served by a redirect target.
    pub async fn fetch(&mut self, url: &str) -> Result<Page> {
        let requested = normalize_url(url);
        let mut current = requested.clone();
        let mut redirects = Vec::new();

        loop {
            if let Some(body) = self.cache.get(&current) {
                log::info!("Cache hit for URL: {}", current);
                return Ok(Page {
                    requested_url: requested,
                    final_url: current,
                    body: body.to_string(),
                    from_cache: true,
                    redirects,
                });
            }

            let parsed = Url::parse(&current)?;
            log::debug!("GET {}", parsed);
            let response = self.client.get(parsed.clone()).send().await?;
            let status = response.status();

            if is_followed_redirect(status) {
                if redirects.len() >= self.max_redirects {
                    return Err(AppError::TooManyRedirects {
                        url: requested,
                        limit: self.max_redirects,
                    });
                }

                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| AppError::MissingLocation {
                        url: current.clone(),
                    })?;
                let next = resolve_url(&parsed, location.trim());

                log::info!("Redirecting to: {}", next);
                redirects.push(next.clone());
                current = next;
                continue;
            }

            if !status.is_success() {
                return Err(AppError::Status {
                    url: current,
                    status: status.as_u16(),
                });
            }

            let body = http::read_body(response).await?;
            log::debug!("Fetched {} bytes from {}", body.len(), current);
            self.cache.put(requested.clone(), body.clone());

            return Ok(Page {
                requested_url: requested,
                final_url: current,
                body,
                from_cache: false,
                redirects,
            });
        }
    }
}

/// Redirect statuses the fetcher follows itself.
fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER
    )
}
