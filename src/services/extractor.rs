//! Pattern-based content extraction.
//!
//! Pulls headings, links and search-result targets out of raw HTML with
//! regular expressions. Nothing here parses the DOM: malformed markup simply
//! yields fewer matches. All scraping patterns for the search engine's result
//! page live in this module.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{ExtractedContent, Link};

/// Result URLs kept from a search page when no limit is configured.
pub const MAX_SEARCH_RESULTS: usize = 10;

static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h([1-6])[^>]*>").expect("valid heading pattern"));

/// `</h1>` through `</h6>`, indexed by level - 1.
static HEADING_CLOSE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| Regex::new(&format!("(?i)</h{level}>")).expect("valid heading pattern"))
        .collect()
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s+(?:[^>]*?\s+)?href="([^"]*)"[^>]*>(.*?)</a>"#)
        .expect("valid link pattern")
});

static SEARCH_RESULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="/url\?q=(.*?)&"#).expect("valid search pattern"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Extract `<h1>`..`<h6>` texts in document order.
///
/// The closing tag must have the same level as the opening one, so
/// `<h2>Open</h3>` yields nothing.
pub fn extract_headings(html: &str) -> Vec<String> {
    let mut headings = Vec::new();
    let mut pos = 0;
    // Per level: offset from which no closing tag of that level exists.
    let mut no_close_from: [Option<usize>; 6] = [None; 6];

    while let Some(caps) = HEADING_OPEN.captures_at(html, pos) {
        let (Some(open), Some(level)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let index = usize::from(level.as_str().as_bytes()[0] - b'1');

        if no_close_from[index].is_some_and(|from| open.end() >= from) {
            pos = open.start() + 1;
            continue;
        }

        match HEADING_CLOSE[index].find_at(html, open.end()) {
            Some(close) => {
                headings.push(html[open.end()..close.start()].trim().to_string());
                pos = close.end();
            }
            // No matching close for this opener; retry just past its '<'.
            None => {
                no_close_from[index] = Some(open.end());
                pos = open.start() + 1;
            }
        }
    }

    headings
}

/// Extract `<a href="...">label</a>` pairs in document order.
///
/// Hrefs are returned as written; relative links are not resolved.
pub fn extract_links(html: &str) -> Vec<Link> {
    LINK.captures_iter(html)
        .map(|caps| {
            let href = caps.get(1).map_or("", |m| m.as_str());
            let label = caps.get(2).map_or("", |m| m.as_str());
            Link::new(href.trim(), label.trim())
        })
        .collect()
}

/// Extract headings and links together.
pub fn extract_content(html: &str) -> ExtractedContent {
    ExtractedContent {
        headings: extract_headings(html),
        links: extract_links(html),
    }
}

/// Extract up to [`MAX_SEARCH_RESULTS`] result URLs from a search page.
pub fn extract_search_result_urls(html: &str) -> Vec<String> {
    extract_search_result_urls_limited(html, MAX_SEARCH_RESULTS)
}

/// Extract up to `limit` result URLs from a search page.
///
/// Targets are taken from `href="/url?q=<target>&` anchors, percent-decoded,
/// and kept only when they start with `http`. A target that fails to decode
/// is logged and skipped.
pub fn extract_search_result_urls_limited(html: &str, limit: usize) -> Vec<String> {
    let mut urls = Vec::new();
    if limit == 0 {
        return urls;
    }

    for caps in SEARCH_RESULT.captures_iter(html) {
        let Some(raw) = caps.get(1) else { continue };

        let decoded = match decode_target(raw.as_str()) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("Error decoding URL: {}", e);
                continue;
            }
        };

        if !decoded.starts_with("http") {
            log::debug!("Skipping non-http search target: {}", decoded);
            continue;
        }

        urls.push(decoded);
        if urls.len() == limit {
            break;
        }
    }

    urls
}

/// Decode a form-encoded query value (`+` is a space, `%XX` is a byte).
///
/// Fails on a `%` not followed by two hex digits or when the decoded bytes
/// are not UTF-8.
pub fn decode_target(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(AppError::decode(
                    raw,
                    format!("malformed escape sequence at byte {i}"),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| AppError::decode(raw, e))
}

/// Remove tags and decode the few entities common in headings and labels.
pub fn strip_html(html: &str) -> String {
    TAG.replace_all(html, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
}

/// Apply [`strip_html`] to every heading and link label.
pub fn strip_content(content: ExtractedContent) -> ExtractedContent {
    ExtractedContent {
        headings: content
            .headings
            .iter()
            .map(|h| strip_html(h).trim().to_string())
            .collect(),
        links: content
            .links
            .into_iter()
            .map(|link| Link {
                label: strip_html(&link.label).trim().to_string(),
                href: link.href,
            })
            .collect(),
    }
}

/// Render extracted content as console lines.
///
/// Headings become `  - <text>`; links become `Link: <href><label>` with the
/// label written directly after the href.
pub fn render(content: &ExtractedContent) -> String {
    let headings = content.headings.iter().map(|h| format!("  - {h}"));
    let links = content
        .links
        .iter()
        .map(|link| format!("Link: {}{}", link.href, link.label));
    headings.chain(links).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_same_level() {
        assert_eq!(
            extract_headings("<h2>Title</h2><h3>Sub</h3>"),
            vec!["Title", "Sub"]
        );
    }

    #[test]
    fn test_headings_mismatched_levels() {
        assert!(extract_headings("<h2>Open</h3>").is_empty());
    }

    #[test]
    fn test_headings_case_attributes_and_whitespace() {
        let html = "<H1 class=\"big\">  Hello \n</h1><p>x</p><h6 id=a>\tSix </H6>";
        assert_eq!(extract_headings(html), vec!["Hello", "Six"]);
    }

    #[test]
    fn test_headings_unclosed_opener_does_not_hide_later_ones() {
        let html = "<h1>never closed <h2>Inner</h2>";
        assert_eq!(extract_headings(html), vec!["Inner"]);
    }

    #[test]
    fn test_headings_many_unclosed_openers() {
        let mut html = "<h2>".repeat(20_000);
        html.push_str("<h1>x</h1>");
        html.push_str(&"<H3 class=a>".repeat(20_000));
        html.push_str("<h4>y</h4>");

        let start = std::time::Instant::now();
        assert_eq!(extract_headings(&html), vec!["x", "y"]);
        assert!(start.elapsed() < std::time::Duration::from_secs(5));

        assert!(extract_headings(&"<h1>".repeat(20_000)).is_empty());
    }

    #[test]
    fn test_headings_lazy_match_spans_other_levels() {
        assert_eq!(extract_headings("<h2>a</h3>b</h2>"), vec!["a</h3>b"]);
    }

    #[test]
    fn test_headings_ignore_hr_and_header() {
        assert!(extract_headings("<hr><header>x</header><h7>y</h7>").is_empty());
    }

    #[test]
    fn test_links_basic() {
        assert_eq!(
            extract_links("<a href=\"http://x\">Go</a>"),
            vec![Link::new("http://x", "Go")]
        );
    }

    #[test]
    fn test_links_attributes_before_href_and_case() {
        let html = r#"<A class="nav" id='x' HREF="/about"> About us </A>
            <a href="relative.html" target="_blank">Rel</a>"#;
        assert_eq!(
            extract_links(html),
            vec![
                Link::new("/about", "About us"),
                Link::new("relative.html", "Rel"),
            ]
        );
    }

    #[test]
    fn test_links_unclosed_anchor_is_skipped() {
        assert!(extract_links("<a href=\"http://x\">dangling").is_empty());
        assert!(extract_links("<abbr href=\"http://x\">no</abbr>").is_empty());
    }

    #[test]
    fn test_render_format() {
        let content = ExtractedContent {
            headings: vec!["Title".to_string()],
            links: vec![Link::new("http://x", "Go")],
        };
        assert_eq!(render(&content), "  - Title\nLink: http://xGo");
        assert_eq!(render(&ExtractedContent::default()), "");
    }

    #[test]
    fn test_extract_content_combines_both() {
        let content = extract_content("<h1>T</h1><a href=\"/a\">A</a>");
        assert_eq!(content.headings, vec!["T"]);
        assert_eq!(content.links, vec![Link::new("/a", "A")]);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<b>Fish</b> &amp; chips&nbsp;&lt;3 &quot;ok&quot;"),
            "Fish & chips <3 \"ok\""
        );
    }

    #[test]
    fn test_strip_content() {
        let content =
            extract_content("<h1><span>Deep</span></h1><a href=\"/x\"><img> Pic &amp; text</a>");
        let stripped = strip_content(content);
        assert_eq!(stripped.headings, vec!["Deep"]);
        assert_eq!(stripped.links, vec![Link::new("/x", "Pic & text")]);
    }

    #[test]
    fn test_decode_target() {
        assert_eq!(
            decode_target("https://example.com/a%3Fb%3D1").unwrap(),
            "https://example.com/a?b=1"
        );
        assert_eq!(decode_target("a+b%2Bc").unwrap(), "a b+c");
        assert_eq!(decode_target("%E2%9C%93").unwrap(), "✓");
    }

    #[test]
    fn test_decode_target_rejects_malformed() {
        assert!(decode_target("http://x/%zz").is_err());
        assert!(decode_target("http://x/%4").is_err());
        assert!(decode_target("http://x/%FF%FE").is_err());
    }

    fn result_anchor(target: &str) -> String {
        format!(r#"<div><a href="/url?q={target}&amp;sa=U&amp;ved=0">r</a></div>"#)
    }

    #[test]
    fn test_search_results_filter_and_cap() {
        let mut html = String::new();
        let mut expected = Vec::new();
        for i in 0..15 {
            if i == 1 || i == 4 || i == 7 {
                html.push_str(&result_anchor(&format!("/search%3Fq%3Dinternal{i}")));
            } else {
                html.push_str(&result_anchor(&format!("https%3A%2F%2Fsite{i}.test%2F")));
                expected.push(format!("https://site{i}.test/"));
            }
        }
        expected.truncate(10);

        let urls = extract_search_result_urls(&html);
        assert_eq!(urls.len(), 10);
        assert_eq!(urls, expected);
        assert!(urls.iter().all(|u| !u.contains("internal")));
    }

    #[test]
    fn test_search_results_skip_undecodable() {
        let html = format!(
            "{}{}",
            result_anchor("https://bad.test/%zz"),
            result_anchor("https://good.test/")
        );
        assert_eq!(extract_search_result_urls(&html), vec!["https://good.test/"]);
    }

    #[test]
    fn test_search_results_keep_duplicates_in_order() {
        let html = format!(
            "{}{}{}",
            result_anchor("https://b.test/"),
            result_anchor("https://a.test/"),
            result_anchor("https://b.test/")
        );
        assert_eq!(
            extract_search_result_urls(&html),
            vec!["https://b.test/", "https://a.test/", "https://b.test/"]
        );
    }

    #[test]
    fn test_search_results_limit() {
        let html = (0..5)
            .map(|i| result_anchor(&format!("http://r{i}.test/")))
            .collect::<String>();
        assert_eq!(extract_search_result_urls_limited(&html, 2).len(), 2);
        assert!(extract_search_result_urls_limited(&html, 0).is_empty());
        assert!(extract_search_result_urls("<a href=\"/url?q=http://x\">no amp</a>").is_empty());
    }
}
