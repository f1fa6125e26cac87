// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl as a pipeline of cooperating stages.
//
//   seed ──► Frontier ──tasks──► Dispatcher ──spawns──► PageWorker (x threads)
//               ▲                                          │      │
//               └───────────── candidates (depth+1) ───────┘      │
//                                                                 ▼
//                                             WordCollector ◄── words
//
// - Frontier: the only owner of the visited set; vets every candidate
// - Dispatcher: runs at most `threads` workers at a time
// - PageWorker: fetch + extract + forward, one page per worker
// - WordCollector: the only owner of the word set and the output file
// - CompletionTracker: counts in-flight items; zero means we're done
//
// All queues are unbounded. The frontier and collector have no concurrency
// limit of their own, so a bounded queue feeding back into them could
// deadlock on a page with many links.
// =============================================================================

mod collector;
mod dispatcher;
mod frontier;
mod stats;
mod task;
mod tracker;
mod worker;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::debug;

pub use collector::{FileSink, WordSink};
pub use stats::CrawlSummary;

use collector::WordCollector;
use dispatcher::Dispatcher;
use frontier::Frontier;
use stats::CrawlStats;
use task::CrawlTask;
use tracker::CompletionTracker;
use worker::PageWorker;

use crate::config::Config;
use crate::fetch::Fetcher;

// Crawls a website starting from config.seed_url
//
// Parameters:
//   config: crawl settings, shared read-only by every stage
//   fetcher: how pages are downloaded (HttpFetcher in the real binary)
//   sink: where new words are written (FileSink in the real binary)
//
// Returns once every reachable, in-scope, in-depth page has been processed
// and every discovered word has been written.
pub async fn crawl_website<S>(
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    sink: S,
) -> Result<CrawlSummary>
where
    S: WordSink + 'static,
{
    let started = Instant::now();
    let tracker = CompletionTracker::new();
    let stats = Arc::new(CrawlStats::default());

    let (task_tx, task_rx) = mpsc::unbounded_channel();
    let (candidate_tx, candidate_rx) = mpsc::unbounded_channel();
    let (word_tx, word_rx) = mpsc::unbounded_channel();

    // The seed is counted before any stage starts, so the tracker begins
    // at 1 and can't report "done" before the first page is even fetched
    let mut frontier = Frontier::new(config.clone(), task_tx, tracker.clone(), stats.clone());
    frontier.admit_seed(CrawlTask::seed(&config.seed_url));

    let worker = Arc::new(PageWorker::new(
        fetcher,
        config.clone(),
        candidate_tx,
        word_tx,
        tracker.clone(),
        stats.clone(),
    ));
    let dispatcher = Dispatcher::new(config.threads, worker, tracker.clone());
    let collector = WordCollector::new(sink, stats.clone());

    let frontier_handle = tokio::spawn(frontier.run(candidate_rx));
    let collector_handle = tokio::task::spawn_blocking(move || collector.run(word_rx));
    let dispatcher_handle = tokio::spawn(dispatcher.run(task_rx));

    tracker.wait().await;
    debug!("nothing left in flight, shutting down");

    // Dispatcher exits first and drops the senders it holds; that closes
    // the candidate and word queues and lets the other two stages finish
    dispatcher_handle.await.context("dispatcher task failed")?;
    let visited = frontier_handle.await.context("frontier task failed")?;
    let unique_words = collector_handle.await.context("word collector task failed")?;
    debug!(visited, unique_words, "all stages stopped");

    Ok(stats.summary(started.elapsed()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an mpsc channel?
//    - "multi-producer, single-consumer" queue between async tasks
//    - Many workers hold a Sender clone, exactly one stage holds the Receiver
//    - recv() returns None once every Sender is dropped, which is how our
//      stages learn that the crawl is over
//
// 2. Why unbounded channels?
//    - A bounded channel makes send() wait when it is full
//    - Workers feed the frontier, the frontier feeds workers: with small
//      bounds both sides can end up waiting on each other forever
//
// 3. Why spawn_blocking for the word collector?
//    - It calls fsync after every word, which blocks the thread
//    - Async worker threads should never block, or every task on them stalls
//    - spawn_blocking runs the closure on a separate thread pool meant for this
//
// 4. What is Arc<dyn Fetcher>?
//    - A shared pointer to "some type that implements Fetcher"
//    - Real runs pass HttpFetcher, tests pass an in-memory FakeSite
// -----------------------------------------------------------------------------
