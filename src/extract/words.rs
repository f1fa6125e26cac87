// src/extract/words.rs
// =============================================================================
// This module turns an HTML page into a flat list of word tokens.
//
// Where words come from (in this order):
// 1. <title>
// 2. <meta name="description" content="...">
// 3. All text in the document, minus <script> and <style> contents
//
// A "word" is simply a whitespace-separated token. We don't lower-case,
// strip punctuation or dedupe here: "Hello," and "hello" are different
// words, and the word collector handles duplicates.
// =============================================================================

use scraper::{Html, Node, Selector};

// Elements whose text is code, not prose
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

// Extracts word tokens from HTML content
pub fn extract_words(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut words = Vec::new();

    words.extend(tokens(&title_text(&document)));
    if let Some(description) = meta_description(&document) {
        words.extend(tokens(&description));
    }
    words.extend(tokens(&visible_text(&document)));

    words
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_string)
}

// Text of every <title> element, glued together
fn title_text(document: &Html) -> String {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .flat_map(|title| title.text())
        .collect()
}

// Content of the meta description; the last one wins if a page has several
fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta").unwrap();
    document
        .select(&selector)
        .filter(|meta| meta.value().attr("name") == Some("description"))
        .filter_map(|meta| meta.value().attr("content"))
        .last()
        .map(str::to_string)
}

// All text nodes of the document that are not inside <script> or <style>
//
// Text nodes are concatenated without separators, the same way a browser's
// textContent works, so "<b>foo</b>bar" yields the single token "foobar".
fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            text.push_str(chunk);
        }
    }

    text
}
