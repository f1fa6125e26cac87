// src/crawl/tracker.rs
// =============================================================================
// This module decides when the crawl is finished.
//
// How it works:
// - Every item that enters a queue (a task, a candidate URL, a word) bumps
//   a shared counter when it is created...
// - ...and lowers it once its consumer is completely done with it
// - When the counter drops back to zero nothing is in flight anywhere, so
//   no new work can ever appear: the crawl is over
//
// The tracker has exactly two states: Running and Terminated. Terminated is
// entered once, the first time the count reaches zero, and never left.
//
// Instead of calling increment()/decrement() by hand everywhere, the
// pipeline wraps each queued item in a Pending<T>. Creating one increments,
// dropping it decrements, so an item can't be forgotten (even if a worker
// panics, unwinding drops the guard).
// =============================================================================

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::error;

// Shared count of outstanding work items
//
// Cloning is cheap: all clones point at the same counter.
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
    inner: Arc<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    pending: AtomicUsize,
    terminated: AtomicBool,
    notify: Notify,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // One more item in flight
    pub fn increment(&self) {
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
    }

    // One item fully consumed
    //
    // Going below zero would mean an item was resolved twice. That is a bug
    // in the pipeline, so we log it loudly and leave the count at zero.
    pub fn decrement(&self) {
        let previous = self
            .inner
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        match previous {
            Ok(1) => self.terminate(),
            Ok(_) => {}
            Err(_) => error!("pending count decremented below zero"),
        }
    }

    fn terminate(&self) {
        // swap() makes sure only the first caller wakes the waiters
        if !self.inner.terminated.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::SeqCst)
    }

    // Resolves once the count has returned to zero
    //
    // A tracker that has never counted anything is still Running, so
    // callers must track their first item before waiting.
    pub async fn wait(&self) {
        loop {
            // Register interest BEFORE checking the flag, otherwise a
            // notify_waiters() landing in between would be missed
            let notified = self.inner.notify.notified();
            if self.is_terminated() {
                return;
            }
            notified.await;
        }
    }

    // Wraps an item so it counts as pending until dropped
    pub fn track<T>(&self, item: T) -> Pending<T> {
        self.increment();
        Pending {
            item,
            guard: PendingGuard {
                tracker: self.clone(),
            },
        }
    }
}

// Decrements the tracker exactly once, when dropped
#[derive(Debug)]
pub struct PendingGuard {
    tracker: CompletionTracker,
}

impl PendingGuard {
    // Same as dropping, but reads better at the end of a stage
    pub fn resolve(self) {}
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.tracker.decrement();
    }
}

// An item travelling through a queue together with its pending-count token
#[derive(Debug)]
pub struct Pending<T> {
    item: T,
    guard: PendingGuard,
}

impl<T> Pending<T> {
    // Splits the item from its guard so a consumer can keep the item
    // "in flight" while it works on it
    pub fn into_parts(self) -> (T, PendingGuard) {
        (self.item, self.guard)
    }
}

impl<T> Deref for Pending<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}
