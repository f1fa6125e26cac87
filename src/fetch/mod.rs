// src/fetch/mod.rs
// =============================================================================
// This module retrieves raw pages for the crawler.
//
// The crawl pipeline never talks to reqwest directly. It only knows about
// the Fetcher trait, so tests can swap in an in-memory site and the real
// binary uses HttpFetcher.
//
// Submodules:
// - http: the reqwest-backed implementation (TLS toggle, SOCKS5 proxy)
// =============================================================================

mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpFetcher;

// Why a page could not be retrieved
//
// Every variant is a per-page failure: the crawler logs it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid proxy address '{addr}': {source}")]
    Proxy {
        addr: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timed out fetching {0}")]
    Timeout(String),
}

// Anything that can turn a URL into page bytes
//
// Implementations must be shareable between worker tasks (Send + Sync),
// because the dispatcher runs many fetches at once.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
