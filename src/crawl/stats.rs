// src/crawl/stats.rs
// =============================================================================
// Running counters for progress lines and the final summary.
//
// Every stage bumps these from its own task, so they are plain atomics.
// They are informational only: nothing in the crawl logic reads them to
// make a decision.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CrawlStats {
    urls_accepted: AtomicUsize,
    pages_started: AtomicUsize,
    pages_fetched: AtomicUsize,
    pages_failed: AtomicUsize,
    words_written: AtomicUsize,
}

impl CrawlStats {
    pub fn url_accepted(&self) {
        self.urls_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_started(&self) {
        self.pages_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn word_written(&self) {
        self.words_written.fetch_add(1, Ordering::Relaxed);
    }

    // Accepted URLs that no worker has picked up yet
    pub fn queued(&self) -> usize {
        let accepted = self.urls_accepted.load(Ordering::Relaxed);
        accepted.saturating_sub(self.pages_started.load(Ordering::Relaxed))
    }

    pub fn words(&self) -> usize {
        self.words_written.load(Ordering::Relaxed)
    }

    pub fn summary(&self, elapsed: Duration) -> CrawlSummary {
        CrawlSummary {
            urls_accepted: self.urls_accepted.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            words_written: self.words(),
            elapsed,
        }
    }
}

// What a finished crawl reports back to main
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// URLs the frontier accepted (seed included)
    pub urls_accepted: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// New words appended to the output file during this run
    pub words_written: usize,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_is_accepted_minus_started() {
        let stats = CrawlStats::default();
        stats.url_accepted();
        stats.url_accepted();
        stats.url_accepted();
        stats.page_started();
        assert_eq!(stats.queued(), 2);
    }

    #[test]
    fn test_summary_snapshot() {
        let stats = CrawlStats::default();
        stats.url_accepted();
        stats.page_started();
        stats.page_failed();
        stats.word_written();

        let summary = stats.summary(Duration::from_secs(1));
        assert_eq!(summary.urls_accepted, 1);
        assert_eq!(summary.pages_fetched, 0);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.words_written, 1);
    }
}
