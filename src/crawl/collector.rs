// src/crawl/collector.rs
// =============================================================================
// The word collector is the single writer of the output word list.
//
// For each word that arrives:
// - seen before during this run?  -> drop it, no I/O
// - new?                          -> remember it, append "word\n", fsync
//
// Syncing after every word is slow-ish, but it means an abrupt kill loses at
// most the word being written, never a chunk of buffered output.
//
// Only this stage touches the word set and the file, so neither needs a
// lock. Because the writes are blocking file I/O, the collector runs on a
// dedicated blocking thread (tokio::task::spawn_blocking) rather than on an
// async worker thread.
//
// Words already present in the file from an EARLIER run are not known to
// us; the word set starts empty every time.
// =============================================================================

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};

use super::stats::CrawlStats;
use super::tracker::Pending;

// Somewhere to durably append words
pub trait WordSink: Send {
    fn append(&mut self, word: &str) -> io::Result<()>;
}

// The output file, opened in append mode
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    // Creates the file if needed; existing content is kept
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl WordSink for FileSink {
    fn append(&mut self, word: &str) -> io::Result<()> {
        // One write per line so a line is never split across writes
        let mut line = String::with_capacity(word.len() + 1);
        line.push_str(word);
        line.push('\n');

        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()
    }
}

pub struct WordCollector<S> {
    seen: HashSet<String>,
    sink: S,
    stats: Arc<CrawlStats>,
}

impl<S: WordSink> WordCollector<S> {
    pub fn new(sink: S, stats: Arc<CrawlStats>) -> Self {
        Self {
            seen: HashSet::new(),
            sink,
            stats,
        }
    }

    // Records a word, writing it out if it is new
    //
    // Returns true when the word had not been seen before. A failed write
    // is logged and the word still counts as seen: there are no retries.
    pub fn offer(&mut self, word: String) -> bool {
        if self.seen.contains(&word) {
            return false;
        }

        match self.sink.append(&word) {
            Ok(()) => self.stats.word_written(),
            Err(e) => error!(%word, error = %e, "failed to write word"),
        }

        self.seen.insert(word);
        true
    }

    // Main loop, meant for spawn_blocking
    //
    // Runs until every producer has dropped its sender. Returns the number
    // of distinct words seen during the run.
    pub fn run(mut self, mut words: UnboundedReceiver<Pending<String>>) -> usize {
        while let Some(pending) = words.blocking_recv() {
            let (word, guard) = pending.into_parts();
            self.offer(word);
            // Acknowledge only after the write has been synced
            guard.resolve();
        }

        debug!(unique = self.seen.len(), "word collector finished");
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::tracker::CompletionTracker;
    use std::fs;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct Lines(Vec<String>);

    impl WordSink for Lines {
        fn append(&mut self, word: &str) -> io::Result<()> {
            self.0.push(word.to_string());
            Ok(())
        }
    }

    struct Broken;

    impl WordSink for Broken {
        fn append(&mut self, _word: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let stats = Arc::new(CrawlStats::default());
        let mut collector = WordCollector::new(Lines::default(), stats.clone());

        assert!(collector.offer("Hello".to_string()));
        assert!(collector.offer("World".to_string()));
        assert!(!collector.offer("Hello".to_string()));
        // Case matters
        assert!(collector.offer("hello".to_string()));

        assert_eq!(collector.sink.0, vec!["Hello", "World", "hello"]);
        assert_eq!(stats.words(), 3);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let stats = Arc::new(CrawlStats::default());
        let mut collector = WordCollector::new(Broken, stats.clone());

        assert!(collector.offer("lost".to_string()));
        assert!(!collector.offer("lost".to_string()));
        assert_eq!(stats.words(), 0);
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "existing\n").unwrap();

        let mut sink = FileSink::open(&path).unwrap();
        sink.append("alpha").unwrap();
        sink.append("beta").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nalpha\nbeta\n");
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        FileSink::open(&path).unwrap().append("first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn test_unopenable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/words.txt");
        assert!(FileSink::open(&path).is_err());
    }

    #[tokio::test]
    async fn test_run_resolves_each_word() {
        let tracker = CompletionTracker::new();
        let stats = Arc::new(CrawlStats::default());
        let (tx, rx) = mpsc::unbounded_channel();

        for word in ["a", "b", "a"] {
            tx.send(tracker.track(word.to_string())).unwrap();
        }
        drop(tx);

        let collector = WordCollector::new(Lines::default(), stats);
        let unique = tokio::task::spawn_blocking(move || collector.run(rx)).await.unwrap();

        assert_eq!(unique, 2);
        assert!(tracker.is_terminated());
    }
}
