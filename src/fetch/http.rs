// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP(S) with reqwest.
//
// Key functionality:
// - One shared Client for every worker (connection pooling)
// - Optional "insecure" mode that accepts any TLS certificate (-k)
// - Optional SOCKS5 proxy (-p host:port), DNS resolved by the proxy
// - A per-request timeout so a slow server can't stall a worker forever
//
// We deliberately do NOT treat 404/500 responses as failures: error pages
// still contain words worth collecting. Only transport problems (DNS,
// connect, TLS, timeout, broken body) count as a failed fetch.
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::debug;

use super::{FetchError, Fetcher};
use crate::config::Config;

// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client from the crawl settings
    //
    // Fails only on startup problems (bad proxy address, TLS backend
    // unavailable), which are fatal for the whole run.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.ssl_ignore);

        if let Some(addr) = &config.proxy_addr {
            // socks5h = let the proxy resolve hostnames (works with Tor)
            let proxy = Proxy::all(format!("socks5h://{}", addr)).map_err(|source| {
                FetchError::Proxy {
                    addr: addr.clone(),
                    source,
                }
            })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "non-success response, keeping body");
        }

        let body = response.bytes().await.map_err(|e| categorize_error(url, e))?;
        Ok(body.to_vec())
    }
}

// Timeouts get their own variant so the log line reads clearly;
// everything else is passed through as the reqwest error.
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Request(error)
    }
}
