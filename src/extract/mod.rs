// src/extract/mod.rs
// =============================================================================
// This module pulls the two things the crawler cares about out of a page:
//
// - links: where to go next (handed to the frontier as candidates)
// - words: what to write into the word list
//
// Both functions are pure: HTML in, strings out. No networking here.
// =============================================================================

mod links;
mod words;

pub use links::extract_links;
pub use words::extract_words;

// Parsed result of one page
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub links: Vec<String>,
    pub words: Vec<String>,
}

// Runs both extractors over raw page bytes
//
// Pages are not always valid UTF-8, so invalid sequences are replaced
// instead of throwing the whole page away.
pub fn extract_page(body: &[u8], page_url: &str) -> PageContent {
    let html = String::from_utf8_lossy(body);
    PageContent {
        links: extract_links(&html, page_url),
        words: extract_words(&html),
    }
}
