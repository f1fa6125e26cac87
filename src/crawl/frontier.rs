// src/crawl/frontier.rs
// =============================================================================
// The frontier is the ONLY place that decides whether a URL gets crawled.
//
// A candidate is accepted only if, in this order:
// 1. it parses as a URL
// 2. we have never accepted this exact string before
// 3. its depth is below the configured maximum
// 4. its host (and explicit port) is exactly the seed's
//
// The frontier runs as a single task and owns the visited set outright.
// Candidates are handled one at a time in arrival order, so the set needs
// no lock: nobody else can even see it.
//
// Known limitation: URLs are compared as raw strings. "http://a.test/x"
// and "http://a.test/x/" are two different pages as far as we're concerned.
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};
use url::Url;

use super::stats::CrawlStats;
use super::task::{Candidate, CrawlTask};
use super::tracker::{CompletionTracker, Pending};
use crate::config::{host_key, Config};

// Outcome of vetting one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

// Why a candidate was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Malformed,
    AlreadyVisited,
    TooDeep,
    OutOfScope,
}

pub struct Frontier {
    config: Arc<Config>,
    visited: HashSet<String>,
    tasks: UnboundedSender<Pending<CrawlTask>>,
    tracker: CompletionTracker,
    stats: Arc<CrawlStats>,
}

impl Frontier {
    pub fn new(
        config: Arc<Config>,
        tasks: UnboundedSender<Pending<CrawlTask>>,
        tracker: CompletionTracker,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            config,
            visited: HashSet::new(),
            tasks,
            tracker,
            stats,
        }
    }

    // Queues the seed page
    //
    // The seed skips the depth and scope rules (it defines the scope, and
    // it is fetched even with a max depth of 0), but it IS recorded as
    // visited so a link back to it later is ignored.
    pub fn admit_seed(&mut self, seed: CrawlTask) {
        self.visited.insert(seed.url.clone());
        self.enqueue(seed);
    }

    // Vets one candidate and queues it as a task if it passes
    pub fn accept(&mut self, candidate: Candidate) -> Verdict {
        let parsed = match Url::parse(&candidate.url) {
            Ok(url) => url,
            Err(_) => return Verdict::Rejected(Rejection::Malformed),
        };

        if self.visited.contains(&candidate.url) {
            return Verdict::Rejected(Rejection::AlreadyVisited);
        }

        if candidate.depth >= self.config.max_depth {
            return Verdict::Rejected(Rejection::TooDeep);
        }

        if host_key(&parsed).as_deref() != Some(self.config.seed_host.as_str()) {
            return Verdict::Rejected(Rejection::OutOfScope);
        }

        self.visited.insert(candidate.url.clone());
        self.enqueue(candidate.into());
        Verdict::Accepted
    }

    fn enqueue(&self, task: CrawlTask) {
        debug!(
            url = %task.url,
            depth = task.depth,
            pending = self.tracker.pending(),
            "queued page"
        );
        self.stats.url_accepted();

        // If the dispatcher is already gone the task comes back inside the
        // error and is dropped, which resolves its pending item
        if self.tasks.send(self.tracker.track(task)).is_err() {
            debug!("task queue closed, dropping task");
        }
    }

    // Main loop: vet candidates until every producer has gone away
    //
    // Returns how many distinct URLs were accepted over the whole run.
    pub async fn run(mut self, mut candidates: UnboundedReceiver<Pending<Candidate>>) -> usize {
        while let Some(pending) = candidates.recv().await {
            let (candidate, guard) = pending.into_parts();
            let url = candidate.url.clone();

            if let Verdict::Rejected(reason) = self.accept(candidate) {
                trace!(%url, ?reason, "rejected candidate");
            }

            // Any task created above is already counted, so resolving the
            // candidate now can't make the count touch zero early
            guard.resolve();
        }

        debug!(visited = self.visited.len(), "frontier finished");
        self.visited.len()
    }
}
