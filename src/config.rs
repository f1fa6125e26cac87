// src/config.rs
// =============================================================================
// This module turns parsed command-line arguments into the crawl settings.
//
// The Config is built ONCE at startup and then shared (read-only) by every
// stage of the crawl through an Arc<Config>. Nothing mutates it afterwards.
//
// What gets validated here:
// - The seed URL must parse and must have a host
// - At least one worker thread, and no more than the dispatcher's
//   semaphore can hold
// - A non-zero request timeout
//
// Anything that fails here is a fatal startup error: we never start a
// partial crawl with bad settings.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use url::Url;

use crate::cli::Cli;

// Errors that can happen while building the Config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL has no host: {0}")]
    MissingHost(String),

    #[error("thread count must be at least 1")]
    NoThreads,

    #[error("thread count {given} is above the limit of {max}")]
    TooManyThreads { given: usize, max: usize },

    #[error("timeout must be at least 1 second")]
    NoTimeout,
}

// Immutable crawl settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of pages fetched at the same time
    pub threads: usize,
    /// The first page of the crawl, exactly as the user typed it
    pub seed_url: String,
    /// Host (plus explicit port, if any) every crawled URL must match
    pub seed_host: String,
    /// Word list file, created if absent and appended to otherwise
    pub output_path: PathBuf,
    /// Link hops allowed from the seed page
    pub max_depth: usize,
    /// Skip TLS certificate verification
    pub ssl_ignore: bool,
    /// SOCKS5 proxy in host:port form
    pub proxy_addr: Option<String>,
    /// Per-request timeout for page fetches
    pub timeout: Duration,
}

impl Config {
    // Builds the Config from parsed CLI arguments
    //
    // The seed URL is kept as the original string (no normalization) so the
    // visited set sees exactly what the user passed in.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let seed = Url::parse(&cli.url).map_err(|source| ConfigError::InvalidSeed {
            url: cli.url.clone(),
            source,
        })?;

        let seed_host = host_key(&seed).ok_or_else(|| ConfigError::MissingHost(cli.url.clone()))?;

        if cli.threads == 0 {
            return Err(ConfigError::NoThreads);
        }

        // The dispatcher's semaphore can't hold more permits than this
        if cli.threads > Semaphore::MAX_PERMITS {
            return Err(ConfigError::TooManyThreads {
                given: cli.threads,
                max: Semaphore::MAX_PERMITS,
            });
        }

        // A zero timeout would fail every fetch instantly
        if cli.timeout == 0 {
            return Err(ConfigError::NoTimeout);
        }

        Ok(Self {
            threads: cli.threads,
            seed_url: cli.url.clone(),
            seed_host,
            output_path: cli.output.clone(),
            max_depth: cli.depth,
            ssl_ignore: cli.insecure,
            proxy_addr: cli.proxy.clone().filter(|p| !p.is_empty()),
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

// Returns the "host[:port]" string used for scope checks
//
// Two URLs are in the same scope only if this string is identical, so
// "a.test" and "www.a.test" differ, and so do "a.test" and "a.test:8080".
// The url crate hides the port when it is the scheme default, which means
// "http://a.test:80/" and "http://a.test/" land in the same scope.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
