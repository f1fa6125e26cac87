// src/crawl/worker.rs
// =============================================================================
// A page worker processes exactly one crawl task:
//
// 1. Fetch the page
// 2. Pull out its links and words
// 3. Send each link to the frontier as a candidate one level deeper
//    (skipped when this page already sits at the depth limit)
// 4. Send each word to the word collector
// 5. Resolve the task
//
// A failed fetch is not an error for the crawl as a whole: we log it,
// resolve the task with nothing discovered, and the crawl carries on.
//
// Ordering matters in step 5: every candidate and word is counted as
// pending BEFORE the task's own pending item is resolved, so the tracker
// can never see zero while this page's discoveries are still in flight.
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::stats::CrawlStats;
use super::task::{Candidate, CrawlTask};
use super::tracker::{CompletionTracker, Pending};
use crate::config::Config;
use crate::extract::extract_page;
use crate::fetch::Fetcher;

pub struct PageWorker {
    fetcher: Arc<dyn Fetcher>,
    config: Arc<Config>,
    candidates: UnboundedSender<Pending<Candidate>>,
    words: UnboundedSender<Pending<String>>,
    tracker: CompletionTracker,
    stats: Arc<CrawlStats>,
}

impl PageWorker {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        config: Arc<Config>,
        candidates: UnboundedSender<Pending<Candidate>>,
        words: UnboundedSender<Pending<String>>,
        tracker: CompletionTracker,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            fetcher,
            config,
            candidates,
            words,
            tracker,
            stats,
        }
    }

    pub async fn process(&self, task: Pending<CrawlTask>) {
        // Keep the guard alive until the very end: it IS this task's
        // pending item. Early returns drop it, which resolves the task.
        let (task, guard) = task.into_parts();
        self.stats.page_started();

        println!(
            "  Crawling [depth {}]: {}  (queue {}, words {})",
            task.depth,
            task.url,
            self.stats.queued(),
            self.stats.words()
        );

        let body = match self.fetcher.fetch(&task.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %task.url, error = %e, "failed to fetch page");
                self.stats.page_failed();
                return;
            }
        };
        self.stats.page_fetched();

        let page = extract_page(&body, &task.url);

        if task.depth < self.config.max_depth {
            for link in page.links {
                let candidate = self.tracker.track(task.child(link));
                if self.candidates.send(candidate).is_err() {
                    break;
                }
            }
        }

        for word in page.words {
            if self.words.send(self.tracker.track(word)).is_err() {
                break;
            }
        }

        guard.resolve();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct OnePage(&'static str);

    #[async_trait]
    impl Fetcher for OnePage {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            if url.ends_with("/broken") {
                return Err(FetchError::Timeout(url.to_string()));
            }
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct Harness {
        worker: PageWorker,
        candidates: mpsc::UnboundedReceiver<Pending<Candidate>>,
        words: mpsc::UnboundedReceiver<Pending<String>>,
        tracker: CompletionTracker,
        stats: Arc<CrawlStats>,
    }

    fn harness(page: &'static str, max_depth: usize) -> Harness {
        let config = Arc::new(Config {
            threads: 1,
            seed_url: "http://a.test/".to_string(),
            seed_host: "a.test".to_string(),
            output_path: PathBuf::from("unused.txt"),
            max_depth,
            ssl_ignore: false,
            proxy_addr: None,
            timeout: Duration::from_secs(1),
        });
        let (candidate_tx, candidates) = mpsc::unbounded_channel();
        let (word_tx, words) = mpsc::unbounded_channel();
        let tracker = CompletionTracker::new();
        let stats = Arc::new(CrawlStats::default());
        let worker = PageWorker::new(
            Arc::new(OnePage(page)),
            config,
            candidate_tx,
            word_tx,
            tracker.clone(),
            stats.clone(),
        );
        Harness {
            worker,
            candidates,
            words,
            tracker,
            stats,
        }
    }

    fn task(tracker: &CompletionTracker, url: &str, depth: usize) -> Pending<CrawlTask> {
        tracker.track(CrawlTask {
            url: url.to_string(),
            depth,
        })
    }

    #[tokio::test]
    async fn test_links_go_one_level_deeper() {
        let mut h = harness(r#"<a href="/x">go</a>"#, 3);
        h.worker.process(task(&h.tracker, "http://a.test/", 1)).await;

        let candidate = h.candidates.try_recv().unwrap();
        assert_eq!(candidate.url, "http://a.test/x");
        assert_eq!(candidate.depth, 2);
        assert_eq!(h.words.try_recv().unwrap().as_str(), "go");
    }

    #[tokio::test]
    async fn test_page_at_depth_limit_only_yields_words() {
        let mut h = harness(r#"<a href="/x">go</a>"#, 1);
        h.worker.process(task(&h.tracker, "http://a.test/x", 1)).await;

        assert!(h.candidates.try_recv().is_err());
        assert_eq!(h.words.try_recv().unwrap().as_str(), "go");
    }

    #[tokio::test]
    async fn test_discoveries_stay_pending_after_task_resolves() {
        let mut h = harness(r#"<a href="/x">one two</a>"#, 3);
        h.worker.process(task(&h.tracker, "http://a.test/", 0)).await;

        // task resolved; 1 candidate + 2 words still in flight
        assert_eq!(h.tracker.pending(), 3);
        assert!(!h.tracker.is_terminated());

        drop(h.candidates.try_recv().unwrap());
        drop(h.words.try_recv().unwrap());
        drop(h.words.try_recv().unwrap());
        assert!(h.tracker.is_terminated());
    }

    #[tokio::test]
    async fn test_failed_fetch_resolves_task_quietly() {
        let mut h = harness(r#"<a href="/x">never</a>"#, 3);
        h.worker.process(task(&h.tracker, "http://a.test/broken", 0)).await;

        assert!(h.candidates.try_recv().is_err());
        assert!(h.words.try_recv().is_err());
        assert!(h.tracker.is_terminated());
        assert_eq!(h.stats.summary(Duration::ZERO).pages_failed, 1);
    }
}
