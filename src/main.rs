// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up diagnostics logging (RUST_LOG, defaults to warnings only)
// 3. Build the Config, the HTTP client and the output file. Any failure
//    here aborts before a single page is fetched.
// 4. Run the crawl and print a summary
// 5. Exit with proper code (0 = success, 2 = startup error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated crawl settings
mod crawl;         // src/crawl/ - the crawl pipeline
mod extract;       // src/extract/ - links and words from HTML
mod fetch;         // src/fetch/ - downloading pages

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use crawl::{CrawlSummary, FileSink};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never mix with the progress lines
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    if cli.url.is_empty() {
        println!("No URL given, nothing to spider. Try: wordspider -u https://example.com");
        return Ok(0);
    }

    let config = Arc::new(Config::from_cli(&cli)?);

    print_banner(&config);

    let fetcher = HttpFetcher::new(&config).context("could not build HTTP client")?;
    let sink = FileSink::open(&config.output_path).with_context(|| {
        format!("can't open output file {}", config.output_path.display())
    })?;

    println!("🕷️  Starting spider..");
    let summary = crawl::crawl_website(config.clone(), Arc::new(fetcher), sink).await?;

    print_summary(&summary, &config);
    Ok(0)
}

fn print_banner(config: &Config) {
    println!("{}", "=".repeat(40));
    println!("wordspider v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(40));
    println!("🔍 Seed URL:  {}", config.seed_url);
    println!("📊 Max depth: {}", config.max_depth);
    println!("🧵 Threads:   {}", config.threads);
    println!("📄 Output:    {}", config.output_path.display());
    if config.ssl_ignore {
        println!("🔓 TLS certificate checks disabled");
    }
    if let Some(proxy) = &config.proxy_addr {
        println!("🧦 Proxy set to: {}", proxy);
    }
    println!();
}

fn print_summary(summary: &CrawlSummary, config: &Config) {
    println!();
    println!("📊 Summary:");
    println!("   🔗 URLs queued:   {}", summary.urls_accepted);
    println!("   ✅ Pages crawled: {}", summary.pages_fetched);
    println!("   ❌ Pages failed:  {}", summary.pages_failed);
    println!("   📋 New words:     {}", summary.words_written);
    println!("   ⏱️  Took:          {:.1?}", summary.elapsed);
    println!("   💾 Written to:    {}", config.output_path.display());
}
