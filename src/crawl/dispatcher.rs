// src/crawl/dispatcher.rs
// =============================================================================
// The dispatcher hands accepted tasks to page workers, never running more
// than `threads` of them at once.
//
// How it works:
// - A Semaphore holds one permit per allowed worker
// - For each task: wait for a permit, then spawn a worker task that OWNS
//   the permit
// - When the worker finishes (or panics) the permit is dropped and the
//   slot frees up, so every acquired slot is released exactly once
//
// The loop stops when the completion tracker says the crawl is over. At
// that point it drops its handle on the PageWorker, which (once the last
// running worker is gone) closes the candidate and word queues so the
// frontier and word collector can shut down too.
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Semaphore;
use tracing::debug;

use super::task::CrawlTask;
use super::tracker::{CompletionTracker, Pending};
use super::worker::PageWorker;

pub struct Dispatcher {
    slots: Arc<Semaphore>,
    worker: Arc<PageWorker>,
    tracker: CompletionTracker,
}

impl Dispatcher {
    pub fn new(threads: usize, worker: Arc<PageWorker>, tracker: CompletionTracker) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(threads)),
            worker,
            tracker,
        }
    }

    pub async fn run(self, mut tasks: UnboundedReceiver<Pending<CrawlTask>>) {
        loop {
            let task = tokio::select! {
                task = tasks.recv() => match task {
                    Some(task) => task,
                    None => break,
                },
                _ = self.tracker.wait() => break,
            };

            // Blocks here while all slots are busy. The semaphore is never
            // closed, but if it were, dropping the task resolves it.
            let permit = match Arc::clone(&self.slots).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let worker = Arc::clone(&self.worker);
            tokio::spawn(async move {
                worker.process(task).await;
                drop(permit);
            });
        }

        debug!("dispatcher finished");
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Semaphore?
//    - A counter of available "slots"
//    - acquire_owned() waits until a slot is free and hands back a permit
//    - Dropping the permit gives the slot back
//
// 2. Why acquire_owned() instead of acquire()?
//    - acquire() borrows the semaphore, so the permit can't outlive this loop
//    - acquire_owned() works on an Arc<Semaphore>, so the permit can move
//      into the spawned worker task and live as long as it does
//
// 3. What does tokio::select! do?
//    - Waits on several futures at once and runs the branch of whichever
//      finishes first
//    - Here: "a new task arrived" vs "the crawl is finished"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crawl::stats::CrawlStats;
    use crate::fetch::{FetchError, Fetcher};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct SlowPage {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for SlowPage {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_runs_every_task_within_slot_limit() {
        let config = Arc::new(Config {
            threads: 2,
            seed_url: "http://a.test/".to_string(),
            seed_host: "a.test".to_string(),
            output_path: PathBuf::from("unused.txt"),
            max_depth: 1,
            ssl_ignore: false,
            proxy_addr: None,
            timeout: Duration::from_secs(1),
        });
        let fetcher = Arc::new(SlowPage::default());
        let tracker = CompletionTracker::new();
        let (candidate_tx, _candidates) = mpsc::unbounded_channel();
        let (word_tx, _words) = mpsc::unbounded_channel();
        let worker = Arc::new(PageWorker::new(
            fetcher.clone(),
            config,
            candidate_tx,
            word_tx,
            tracker.clone(),
            Arc::new(CrawlStats::default()),
        ));

        let (task_tx, task_rx) = mpsc::unbounded_channel();
        for n in 0..6 {
            let task = CrawlTask {
                url: format!("http://a.test/{n}"),
                depth: 0,
            };
            task_tx.send(tracker.track(task)).unwrap();
        }

        let dispatcher = Dispatcher::new(2, worker, tracker.clone());
        tokio::time::timeout(Duration::from_secs(5), dispatcher.run(task_rx))
            .await
            .expect("dispatcher should stop once the tracker terminates");

        assert!(tracker.is_terminated());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 6);
        assert!(fetcher.peak.load(Ordering::SeqCst) <= 2);
    }
}
