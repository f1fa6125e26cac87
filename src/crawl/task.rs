// src/crawl/task.rs
// =============================================================================
// The two kinds of URL that travel through the crawl pipeline.
//
// - Candidate: a link found on a page, not checked yet
// - CrawlTask: a candidate the frontier accepted, waiting to be fetched
//
// They carry the same data but mean different things, so they are separate
// types: a worker can only ever be handed something the frontier vetted.
// =============================================================================

// A discovered link, not yet checked for scope/depth/duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    /// Link hops from the seed (parent depth + 1)
    pub depth: usize,
}

// An accepted URL waiting for a page worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: usize,
}

impl CrawlTask {
    // The first page of the crawl lives at depth 0
    pub fn seed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            depth: 0,
        }
    }

    // A link found on this page, one hop deeper
    pub fn child(&self, url: String) -> Candidate {
        Candidate {
            url,
            depth: self.depth + 1,
        }
    }
}

impl From<Candidate> for CrawlTask {
    fn from(candidate: Candidate) -> Self {
        Self {
            url: candidate.url,
            depth: candidate.depth,
        }
    }
}
