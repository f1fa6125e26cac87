// src/extract/links.rs
// =============================================================================
// This module extracts candidate links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// Any element with an href counts (<a>, <link>, <area>, ...), but hrefs that
// point at obviously non-text files are skipped right here, so they never
// reach the frontier.
//
// Note: we resolve relative links against the page URL, but we do NOT
// normalize them. "/a" and "/a/" stay two different URLs.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Endings of links that will never contain words
const SKIPPED_EXTENSIONS: [&str; 6] = [".js", ".css", ".png", ".jpg", ".gif", ".pdf"];

// Extracts all followable links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: absolute URLs, in document order, duplicates included
// (the frontier is the one place that decides what is new)
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Our selector is a constant and known to be valid
    let selector = Selector::parse("[href]").unwrap();

    let base = Url::parse(page_url).ok();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !has_skipped_extension(href))
        .filter_map(|href| resolve_link(base.as_ref(), href))
        .collect()
}

// Is this link an image/script/stylesheet/pdf?
fn has_skipped_extension(href: &str) -> bool {
    SKIPPED_EXTENSIONS.iter().any(|ext| href.ends_with(ext))
}

// Resolves a link (possibly relative) to an absolute URL
//
// Absolute hrefs are passed through untouched, even when they point at
// another host: scoping is the frontier's job, not ours.
fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }

    base?.join(href).ok().map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_link_is_resolved() {
        let links = extract_links(r#"<a href="/docs">Docs</a>"#, "https://example.com/page");
        assert_eq!(links, vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_absolute_link_kept_verbatim() {
        // No trailing slash gets added: the frontier compares exact strings
        let links = extract_links(r#"<a href="https://other.com">x</a>"#, "https://example.com/");
        assert_eq!(links, vec!["https://other.com"]);
    }

    #[test]
    fn test_non_text_extensions_skipped() {
        let html = r#"
            <link rel="stylesheet" href="/site.css">
            <script src="/app.js"></script>
            <a href="/logo.png">a</a>
            <a href="/photo.jpg">b</a>
            <a href="/anim.gif">c</a>
            <a href="/paper.pdf">d</a>
            <a href="/about">e</a>
        "#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/about"]);
    }

    #[test]
    fn test_any_element_with_href_counts() {
        let html = r#"<link rel="alternate" href="/feed"><area href="/map">"#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/feed", "http://a.test/map"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r##"
            <a href="#top">top</a>
            <a href="mailto:me@a.test">mail</a>
            <a href="tel:123">call</a>
            <a href="javascript:void(0)">js</a>
        "##;
        assert!(extract_links(html, "http://a.test/").is_empty());
    }

    #[test]
    fn test_duplicates_are_not_removed() {
        let html = r#"<a href="/x">1</a><a href="/x">2</a>"#;
        assert_eq!(extract_links(html, "http://a.test/").len(), 2);
    }
}
