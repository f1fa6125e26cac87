// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The flags are short single letters on purpose, so the tool feels like the
// classic word list spiders people already know:
//
//   wordspider -u https://example.com -t 8 -d 2 -o words.txt
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "wordspider",
    version = "0.1.0",
    about = "Spider a website and build a unique word list from its pages",
    long_about = "wordspider crawls a website starting from a seed URL, stays on the seed's host, \
                  and appends every new word it finds (title, meta description and visible text) \
                  to an output file. Handy for building custom password-cracking word lists."
)]
pub struct Cli {
    /// URL to spider (nothing happens if left empty)
    #[arg(short = 'u', default_value = "")]
    pub url: String,

    /// Number of pages fetched concurrently
    #[arg(short = 't', default_value_t = 1)]
    pub threads: usize,

    /// Maximum crawl depth (the seed page is depth 0)
    #[arg(short = 'd', default_value_t = 3)]
    pub depth: usize,

    /// Word list file (created if missing, appended to if it exists)
    #[arg(short = 'o', default_value = "./cewl.txt")]
    pub output: PathBuf,

    /// Skip TLS certificate verification
    #[arg(short = 'k')]
    pub insecure: bool,

    /// SOCKS5 proxy in the form ip:port, e.g. 127.0.0.1:9050
    #[arg(short = 'p')]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}
