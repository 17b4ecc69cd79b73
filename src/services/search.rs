//! Search engine client.
//!
//! Every search is a live request: the page cache is never consulted.

use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, SearchResults};
use crate::services::extractor::extract_search_result_urls_limited;
use crate::utils::http;

/// Runs queries against the configured search endpoint.
pub struct SearchClient {
    client: Client,
    endpoint: String,
    max_results: usize,
}

impl SearchClient {
    /// Create a search client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_search_client(&config.search, &config.fetcher)?;
        Ok(Self::with_client(
            client,
            &config.search.endpoint,
            config.search.max_results,
        ))
    }

    pub fn with_client(client: Client, endpoint: &str, max_results: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            max_results,
        }
    }

    /// Build the query URL for `term`.
    pub fn query_url(&self, term: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}q={}",
            self.endpoint,
            separator,
            urlencoding::encode(term)
        )
    }

    /// Search for `term` and return the result URLs found on the page.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let url = self.query_url(term);
        log::debug!("Searching: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = http::read_body(response).await?;
        let urls = extract_search_result_urls_limited(&body, self.max_results);
        log::debug!("Found {} results for '{}'", urls.len(), term);

        Ok(SearchResults {
            term: term.to_string(),
            urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn client_for(endpoint: &str) -> SearchClient {
        let mut config = Config::default();
        config.search.endpoint = endpoint.to_string();
        SearchClient::new(&config).unwrap()
    }

    #[test]
    fn test_query_url_encodes_term() {
        let client = client_for("https://www.google.com/search");
        assert_eq!(
            client.query_url("rust & go?"),
            "https://www.google.com/search?q=rust%20%26%20go%3F"
        );

        let client = client_for("https://engine.test/find?hl=en");
        assert_eq!(client.query_url("x"), "https://engine.test/find?hl=en&q=x");
    }

    #[tokio::test]
    async fn test_search_sends_user_agent_and_extracts() {
        let mock_server = MockServer::start().await;
        let body = concat!(
            r#"<a href="/url?q=https://www.rust-lang.org/&amp;sa=U">Rust</a>"#,
            r#"<a href="/url?q=/settings&amp;sa=U">Settings</a>"#,
            r#"<a href="/url?q=https%3A%2F%2Fdoc.rust-lang.org%2Fbook%2F&amp;sa=U">Book</a>"#,
        );
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust lang"))
            .and(header("User-Agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&format!("{}/search", mock_server.uri()));
        let results = client.search("rust lang").await.unwrap();

        assert_eq!(results.term, "rust lang");
        assert_eq!(
            results.urls,
            vec!["https://www.rust-lang.org/", "https://doc.rust-lang.org/book/"]
        );
        assert_eq!(
            results.render(),
            "https://www.rust-lang.org/\nhttps://doc.rust-lang.org/book/"
        );
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = client_for(&format!("{}/search", mock_server.uri()));
        let err = client.search("anything").await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_search_respects_max_results() {
        let mock_server = MockServer::start().await;
        let body: String = (0..20)
            .map(|i| format!(r#"<a href="/url?q=https://r{i}.test/&amp;sa=U">r</a>"#))
            .collect();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        let client = client_for(&format!("{}/search", mock_server.uri()));
        let results = client.search("many").await.unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results.urls[0], "https://r0.test/");
        assert_eq!(results.urls[9], "https://r9.test/");
    }
}
