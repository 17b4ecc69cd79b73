//! Fetched pages and content extracted from them.

/// A page body returned by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL passed to `fetch`
    pub requested_url: String,
    /// URL whose response (or cache entry) produced the body
    pub final_url: String,
    pub body: String,
    /// True when the body came from the page cache
    pub from_cache: bool,
    /// Redirect targets followed, in order
    pub redirects: Vec<String>,
}

impl Page {
    pub fn redirect_count(&self) -> usize {
        self.redirects.len()
    }
}

/// A hyperlink found in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
}

impl Link {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Headings and links pulled out of a page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub headings: Vec<String>,
    pub links: Vec<Link>,
}

impl ExtractedContent {
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.links.is_empty()
    }
}

/// Result URLs of a search, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub term: String,
    pub urls: Vec<String>,
}

impl SearchResults {
    /// One URL per line.
    pub fn render(&self) -> String {
        self.urls.join("\n")
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_render_joins_lines() {
        let results = SearchResults {
            term: "rust".to_string(),
            urls: vec!["https://a.test/".to_string(), "https://b.test/".to_string()],
        };
        assert_eq!(results.render(), "https://a.test/\nhttps://b.test/");
        assert_eq!(SearchResults::default().render(), "");
    }
}
